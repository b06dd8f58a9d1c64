use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    AvailabilitySlot, AvailabilitySlotDocument, MatchRecord, RequestSlot, RequestSlotDocument,
};
use crate::services::store::{SlotStore, StoreError};

/// Everything a [`MemoryStore`] holds, in its on-disk JSON shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub requests: Vec<RequestSlotDocument>,
    #[serde(default)]
    pub availabilities: Vec<AvailabilitySlotDocument>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

/// Slot store kept in memory and optionally backed by a JSON file
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: StoreSnapshot,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let snapshot: StoreSnapshot = serde_json::from_reader(reader)?;

        tracing::debug!(
            "Loaded {} request slots, {} availability slots and {} matches from {}",
            snapshot.requests.len(),
            snapshot.availabilities.len(),
            snapshot.matches.len(),
            path.as_ref().display()
        );

        Ok(Self { snapshot })
    }

    /// Write the current snapshot to a JSON file
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(&mut writer, &self.snapshot)?;
        writer.flush()?;

        tracing::debug!("Persisted store snapshot to {}", path.as_ref().display());
        Ok(())
    }

    pub fn snapshot(&self) -> &StoreSnapshot {
        &self.snapshot
    }

    pub fn add_request(&mut self, document: RequestSlotDocument) {
        self.snapshot.requests.push(document);
    }

    pub fn add_availability(&mut self, document: AvailabilitySlotDocument) {
        self.snapshot.availabilities.push(document);
    }
}

impl SlotStore for MemoryStore {
    fn request_slots(&self, day: NaiveDate) -> Result<Vec<RequestSlot>, StoreError> {
        self.snapshot
            .requests
            .iter()
            .filter(|document| document.date == day)
            .map(|document| -> Result<RequestSlot, StoreError> {
                document.validate()?;
                Ok(RequestSlot::try_from(document.clone())?)
            })
            .collect()
    }

    fn availability_slots(&self, day: NaiveDate) -> Result<Vec<AvailabilitySlot>, StoreError> {
        self.snapshot
            .availabilities
            .iter()
            .filter(|document| document.date == day)
            .map(|document| -> Result<AvailabilitySlot, StoreError> {
                document.validate()?;
                Ok(AvailabilitySlot::try_from(document.clone())?)
            })
            .collect()
    }

    fn save_matches(&mut self, matches: &[MatchRecord]) -> Result<(), StoreError> {
        self.snapshot.matches.extend_from_slice(matches);
        Ok(())
    }

    fn delete_matches_before(&mut self, cutoff: NaiveDate) -> Result<usize, StoreError> {
        let before = self.snapshot.matches.len();
        self.snapshot.matches.retain(|record| record.date >= cutoff);
        Ok(before - self.snapshot.matches.len())
    }

    fn matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(self.snapshot.matches.clone())
    }
}
