//! Core data models for Zenodo records and search operations.

mod fields;
mod files;
mod record;
mod search;

pub use fields::{FieldValue, RecordMap};
pub use files::{FileRef, FileSequence};
pub use record::{Record, RecordSet};
pub use search::{ResponseInfo, SearchQuery};
