use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::MatchingError;
use crate::models::domain::{AvailabilitySlot, RequestSlot, TimeSlot};

/// Stored form of an isolate's delivery window
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestSlotDocument {
    #[validate(length(min = 1))]
    #[serde(rename = "isolateId")]
    pub isolate_id: String,
    #[serde(rename = "ticketKey", default)]
    pub ticket_key: Option<String>,
    pub date: NaiveDate,
    #[serde(rename = "startTime", default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(rename = "endTime", default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl TryFrom<RequestSlotDocument> for RequestSlot {
    type Error = MatchingError;

    fn try_from(document: RequestSlotDocument) -> Result<Self, Self::Error> {
        let slot = TimeSlot::new(
            document.start_time,
            document.end_time,
            Some(document.isolate_id),
        )?;

        let request = RequestSlot::new(slot).with_date(document.date);
        Ok(match document.ticket_key {
            Some(ticket) => request.with_ticket(ticket),
            None => request,
        })
    }
}

/// Stored form of a volunteer's availability window
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AvailabilitySlotDocument {
    #[validate(length(min = 1))]
    #[serde(rename = "userId")]
    pub user_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl TryFrom<AvailabilitySlotDocument> for AvailabilitySlot {
    type Error = MatchingError;

    fn try_from(document: AvailabilitySlotDocument) -> Result<Self, Self::Error> {
        let slot = TimeSlot::new(document.start, document.end, Some(document.user_id))?;
        Ok(AvailabilitySlot::new(slot))
    }
}
