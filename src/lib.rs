//! Slot Matcher - maximum matching of help requests to volunteer availability
//!
//! Isolates ask for help during a window of time; volunteers offer windows of
//! availability. A volunteer can serve a request whose window fits entirely
//! inside their own. This library pairs each volunteer with at most one
//! request so that as many requests as possible are served, using the
//! Hopcroft-Karp algorithm.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatcherOptions, Matching, MatchingError};
pub use crate::models::{AvailabilitySlot, MatchRecord, RequestSlot, RunSummary, TimeSlot};
pub use crate::services::{MatchingRunner, MemoryStore, SlotStore};
