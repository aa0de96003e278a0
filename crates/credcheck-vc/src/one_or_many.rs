use serde::{Deserialize, Serialize};

/// A value that JSON credentials may carry either bare or as an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn any<F>(&self, f: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        match self {
            Self::One(value) => f(value),
            Self::Many(values) => values.iter().any(f),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> Option<&T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first(),
        }
    }
}

impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::One(value) => vec![value].into_iter(),
            Self::Many(values) => values.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value).iter(),
            OneOrMany::Many(values) => values.iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_round_trips_as_bare_value() {
        let one: OneOrMany<String> = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(one, OneOrMany::One("a".to_string()));
        assert_eq!(serde_json::to_string(&one).unwrap(), "\"a\"");
    }

    #[test]
    fn many_round_trips_as_array() {
        let many: OneOrMany<String> = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many.first().map(String::as_str), Some("a"));
        assert_eq!(serde_json::to_string(&many).unwrap(), "[\"a\",\"b\"]");
    }

    #[test]
    fn empty_array_is_empty() {
        let none: OneOrMany<String> = serde_json::from_str("[]").unwrap();
        assert!(none.is_empty());
        assert_eq!(none.first(), None);
        assert!(!none.any(|_| true));
    }

    #[test]
    fn borrowing_iteration() {
        let many = OneOrMany::Many(vec![1, 2, 3]);
        assert_eq!((&many).into_iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
        let one = OneOrMany::One(7);
        assert_eq!((&one).into_iter().copied().collect::<Vec<_>>(), [7]);
    }
}
