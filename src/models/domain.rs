use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::core::{IntervalFault, MatchingError};

/// Which side of the bipartite graph a slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// An isolate asking for help
    Request,
    /// A volunteer offering help
    Availability,
}

/// A closed window of time owned by a registered user
///
/// `start < end` always holds; it is checked once in [`TimeSlot::new`].
/// Two slots are equal when start, end and owner are all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    owner: Option<String>,
}

impl TimeSlot {
    /// Build a slot from possibly-missing bounds
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        owner: Option<String>,
    ) -> Result<Self, MatchingError> {
        let start = start.ok_or(IntervalFault::MissingStart)?;
        let end = end.ok_or(IntervalFault::MissingEnd)?;
        Self::between(start, end, owner)
    }

    /// Build a slot from two known bounds
    pub fn between(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        owner: Option<String>,
    ) -> Result<Self, MatchingError> {
        if start >= end {
            return Err(IntervalFault::NotBefore { start, end }.into());
        }

        Ok(Self { start, end, owner })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Check whether `other` fits entirely inside this slot
    ///
    /// Bounds are compared inclusively, so a slot contains itself.
    #[inline]
    pub fn contains(&self, other: &TimeSlot) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.owner.cmp(&other.owner))
    }
}

/// A window during which an isolate needs help
#[derive(Debug, Clone, Serialize)]
pub struct RequestSlot {
    pub slot: TimeSlot,
    /// Day the delivery is scheduled on
    pub date: Option<NaiveDate>,
    /// Key of the ticket that motivated this request
    pub ticket: Option<String>,
}

impl RequestSlot {
    pub fn new(slot: TimeSlot) -> Self {
        Self {
            slot,
            date: None,
            ticket: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_ticket(mut self, ticket: impl Into<String>) -> Self {
        self.ticket = Some(ticket.into());
        self
    }

    pub fn isolate_id(&self) -> Option<&str> {
        self.slot.owner()
    }
}

impl PartialEq for RequestSlot {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl Eq for RequestSlot {}

impl Hash for RequestSlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
    }
}

/// A window during which a volunteer can help
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AvailabilitySlot {
    pub slot: TimeSlot,
}

impl AvailabilitySlot {
    pub fn new(slot: TimeSlot) -> Self {
        Self { slot }
    }

    pub fn volunteer_id(&self) -> Option<&str> {
        self.slot.owner()
    }

    /// Whether this volunteer can serve the whole of `request`
    #[inline]
    pub fn can_serve(&self, request: &RequestSlot) -> bool {
        self.slot.contains(&request.slot)
    }
}
