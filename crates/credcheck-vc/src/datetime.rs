use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

/// An RFC 3339 date-time that re-serializes the way it arrived.
///
/// Signed documents are hashed from their serialized form, so a timestamp
/// must not silently change between `Z` and `+00:00` on the way through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct VcDateTime {
    date_time: DateTime<FixedOffset>,
    /// Whether to write UTC as `Z` rather than `+00:00`.
    use_z: bool,
}

impl VcDateTime {
    pub fn date_time(&self) -> DateTime<FixedOffset> {
        self.date_time
    }
}

impl FromStr for VcDateTime {
    type Err = chrono::format::ParseError;

    fn from_str(date_time: &str) -> Result<Self, Self::Err> {
        let use_z = date_time.ends_with('Z');
        let date_time = DateTime::parse_from_rfc3339(date_time)?;
        Ok(Self { date_time, use_z })
    }
}

impl TryFrom<String> for VcDateTime {
    type Error = chrono::format::ParseError;

    fn try_from(date_time: String) -> Result<Self, Self::Error> {
        Self::from_str(&date_time)
    }
}

impl From<VcDateTime> for String {
    fn from(date_time: VcDateTime) -> String {
        date_time
            .date_time
            .to_rfc3339_opts(SecondsFormat::AutoSi, date_time.use_z)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for VcDateTime
where
    DateTime<FixedOffset>: From<DateTime<Tz>>,
{
    fn from(date_time: DateTime<Tz>) -> Self {
        Self {
            date_time: date_time.into(),
            use_z: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_suffix_survives_round_trip() {
        let parsed: VcDateTime = serde_json::from_str("\"2022-07-26T18:05:54Z\"").unwrap();
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            "\"2022-07-26T18:05:54Z\""
        );
    }

    #[test]
    fn offset_survives_round_trip() {
        let parsed: VcDateTime = serde_json::from_str("\"2022-07-26T18:05:54+02:00\"").unwrap();
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            "\"2022-07-26T18:05:54+02:00\""
        );
    }

    #[test]
    fn rejects_non_rfc3339() {
        assert!(serde_json::from_str::<VcDateTime>("\"yesterday\"").is_err());
    }
}
