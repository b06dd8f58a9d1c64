use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{AvailabilitySlot, RequestSlot};

/// One persisted pairing of an isolate with a volunteer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    #[serde(rename = "isolateId")]
    pub isolate_id: Option<String>,
    #[serde(rename = "volunteerId")]
    pub volunteer_id: Option<String>,
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub ticket: Option<String>,
}

impl MatchRecord {
    /// Record a request served by a volunteer slot
    ///
    /// The delivery window is the request's. `day` is used when the request
    /// carries no date of its own.
    pub fn from_pair(request: &RequestSlot, availability: &AvailabilitySlot, day: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            isolate_id: request.isolate_id().map(str::to_string),
            volunteer_id: availability.volunteer_id().map(str::to_string),
            date: request.date.unwrap_or(day),
            start: request.slot.start(),
            end: request.slot.end(),
            ticket: request.ticket.clone(),
        }
    }
}

/// Report of one matching run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub day: NaiveDate,
    pub requests: usize,
    pub availabilities: usize,
    pub matched: usize,
    pub purged: usize,
    pub phases: usize,
}
