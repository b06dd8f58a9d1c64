// Model exports
pub mod documents;
pub mod domain;
pub mod records;

pub use documents::{AvailabilitySlotDocument, RequestSlotDocument};
pub use domain::{AvailabilitySlot, RequestSlot, Side, TimeSlot};
pub use records::{MatchRecord, RunSummary};
