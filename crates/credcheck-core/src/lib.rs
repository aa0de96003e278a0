//! Check and outcome primitives shared by every credential verification step.
//!
//! A [`Check`] examines one subject and reports exactly one [`Outcome`]. The
//! surrounding report machinery that schedules checks and aggregates their
//! outcomes lives outside this workspace; these types are the contract it
//! consumes.

use core::fmt;

use async_trait::async_trait;

/// Result of running a single check against a subject.
///
/// A negative outcome always carries a reason naming the exact condition that
/// failed, so two different failures are never ambiguous to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The check passed.
    Success,
    /// The subject is unacceptable for an expected, nameable reason.
    Rejected(String),
    /// The check itself could not be completed. More severe than
    /// [`Outcome::Rejected`]: the verification process broke down, and the
    /// reason describes the breakdown rather than the subject.
    Fatal(String),
}

impl Outcome {
    pub fn rejected(reason: impl ToString) -> Self {
        Self::Rejected(reason.to_string())
    }

    pub fn fatal(reason: impl ToString) -> Self {
        Self::Fatal(reason.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Reason attached to a negative outcome.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Rejected(reason) | Self::Fatal(reason) => Some(reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
            Self::Fatal(reason) => write!(f, "fatal: {reason}"),
        }
    }
}

/// A single verification step run against a subject.
///
/// Implementations must be cheap to share: one check instance is reused
/// across credentials and may run concurrently.
#[async_trait]
pub trait Check: Send + Sync {
    /// Subject type this check inspects.
    type Subject: ?Sized + Sync;

    /// Identifier used by reports to name this check.
    fn id(&self) -> &'static str;

    /// Runs the check once. Every terminating condition maps to an
    /// [`Outcome`]; implementations do not panic on malformed subjects.
    async fn run(&self, subject: &Self::Subject) -> Outcome;
}
