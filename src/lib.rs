//! Symptom and diagnosis frequency statistics, and transparent rule-based diagnosis suggestions
//! built on them.
//!
//! Records go into [index::build] to produce a [FrequencyIndex]. That index answers
//! [matcher::suggest] queries and feeds the top-N tables in [report].

pub mod dataset;
pub mod error;
pub mod index;
pub mod matcher;
pub mod record;
pub mod report;

pub use error::{Error, Result};
pub use index::FrequencyIndex;
pub use matcher::{suggest, Query, RankedSuggestion};
pub use record::Record;
