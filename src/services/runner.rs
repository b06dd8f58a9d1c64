use chrono::{Days, NaiveDate, Utc};
use thiserror::Error;

use crate::core::Matcher;
use crate::models::{AvailabilitySlot, MatchRecord, RequestSlot, RunSummary};
use crate::services::store::{SlotStore, StoreError};

/// Errors that can abort a matching run
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Day offset {offset} from {today} is out of range")]
    InvalidDay { today: NaiveDate, offset: i64 },
}

/// Shift `today` by a signed number of days
pub fn offset_day(today: NaiveDate, offset: i64) -> Result<NaiveDate, RunnerError> {
    let days = Days::new(offset.unsigned_abs());
    let day = if offset >= 0 {
        today.checked_add_days(days)
    } else {
        today.checked_sub_days(days)
    };

    day.ok_or(RunnerError::InvalidDay { today, offset })
}

/// Runs the matcher over one day's slots and stores the result
///
/// Slots are pulled from the store unless they were handed in up front.
pub struct MatchingRunner<S: SlotStore> {
    store: S,
    matcher: Matcher,
    requests: Option<Vec<RequestSlot>>,
    availabilities: Option<Vec<AvailabilitySlot>>,
}

impl<S: SlotStore> MatchingRunner<S> {
    pub fn new(store: S, matcher: Matcher) -> Self {
        Self {
            store,
            matcher,
            requests: None,
            availabilities: None,
        }
    }

    /// Match these request slots instead of the stored ones
    pub fn with_request_slots(mut self, requests: Vec<RequestSlot>) -> Self {
        self.requests = Some(requests);
        self
    }

    /// Match these availability slots instead of the stored ones
    pub fn with_availability_slots(mut self, availabilities: Vec<AvailabilitySlot>) -> Self {
        self.availabilities = Some(availabilities);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Match tomorrow's slots
    ///
    /// With `delete_previous_matches`, matches dated before today are
    /// removed first; today's are kept.
    pub fn run(&mut self, delete_previous_matches: bool) -> Result<RunSummary, RunnerError> {
        let today = Utc::now().date_naive();
        let tomorrow = offset_day(today, 1)?;
        self.run_for(tomorrow, today, delete_previous_matches)
    }

    /// Match the slots scheduled on `day`
    pub fn run_for(
        &mut self,
        day: NaiveDate,
        today: NaiveDate,
        delete_previous_matches: bool,
    ) -> Result<RunSummary, RunnerError> {
        tracing::info!("Running matching for {}", day);

        let requests = match &self.requests {
            Some(requests) => requests.clone(),
            None => self.store.request_slots(day)?,
        };
        let availabilities = match &self.availabilities {
            Some(availabilities) => availabilities.clone(),
            None => self.store.availability_slots(day)?,
        };

        let purged = if delete_previous_matches {
            let purged = self.store.delete_matches_before(today)?;
            tracing::info!("Deleted {} matches scheduled before {}", purged, today);
            purged
        } else {
            0
        };

        let matching = self.matcher.match_all(&requests, &availabilities);

        let records: Vec<MatchRecord> = matching
            .pairs()
            .map(|(request, availability)| MatchRecord::from_pair(request, availability, day))
            .collect();
        self.store.save_matches(&records)?;

        let summary = RunSummary {
            day,
            requests: requests.len(),
            availabilities: availabilities.len(),
            matched: records.len(),
            purged,
            phases: matching.phases(),
        };

        tracing::info!(
            "Stored {} matches for {} ({} requests left unmatched)",
            summary.matched,
            day,
            summary.requests - summary.matched
        );

        Ok(summary)
    }
}
