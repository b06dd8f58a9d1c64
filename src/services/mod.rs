// Service exports
pub mod memory;
pub mod runner;
pub mod store;

pub use memory::{MemoryStore, StoreSnapshot};
pub use runner::{offset_day, MatchingRunner, RunnerError};
pub use store::{SlotStore, StoreError};
