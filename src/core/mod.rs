// Core algorithm exports
pub mod error;
pub mod graph;
pub mod matcher;

pub use error::{IntervalFault, MatchingError};
pub use graph::{Distance, Layering, NodeId, PairTarget, SlotGraph};
pub use matcher::{Matcher, MatcherOptions, Matching};
