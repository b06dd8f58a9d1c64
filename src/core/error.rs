use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while building slots or running the matcher
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    #[error("Invalid interval: {reason}")]
    InvalidInterval { reason: IntervalFault },

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// What is wrong with a rejected interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntervalFault {
    #[error("missing start bound")]
    MissingStart,

    #[error("missing end bound")]
    MissingEnd,

    #[error("start {start} is not before end {end}")]
    NotBefore {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl From<IntervalFault> for MatchingError {
    fn from(reason: IntervalFault) -> Self {
        MatchingError::InvalidInterval { reason }
    }
}

impl MatchingError {
    pub fn is_invalid_interval(&self) -> bool {
        matches!(self, MatchingError::InvalidInterval { .. })
    }
}
