use chrono::NaiveDate;
use thiserror::Error;

use crate::core::MatchingError;
use crate::models::{AvailabilitySlot, MatchRecord, RequestSlot};

/// Errors that can occur when reading or writing slots and matches
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid slot: {0}")]
    InvalidSlot(#[from] MatchingError),
}

/// Source of a day's slots and sink for the matches computed from them
pub trait SlotStore {
    /// Request slots scheduled on `day`
    fn request_slots(&self, day: NaiveDate) -> Result<Vec<RequestSlot>, StoreError>;

    /// Availability slots scheduled on `day`
    fn availability_slots(&self, day: NaiveDate) -> Result<Vec<AvailabilitySlot>, StoreError>;

    fn save_matches(&mut self, matches: &[MatchRecord]) -> Result<(), StoreError>;

    /// Delete matches dated strictly before `cutoff`, returning how many went
    fn delete_matches_before(&mut self, cutoff: NaiveDate) -> Result<usize, StoreError>;

    fn matches(&self) -> Result<Vec<MatchRecord>, StoreError>;
}
