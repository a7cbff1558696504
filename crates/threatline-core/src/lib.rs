//! # Threatline Core Library
//!
//! Shared data models for the threat-intelligence timeline aggregator:
//! actor groups, enriched campaigns, derived timeline events and the
//! atomically-published snapshot that holds one refresh result.

pub mod dates;
pub mod model;

pub use dates::*;
pub use model::*;
