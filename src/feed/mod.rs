//! Feed-item ingestion: loading, ordering, and truncation.
//!
//! This module owns the first half of the pipeline:
//!
//! - [`loader`] - Parse the JSON input into validated [`FeedItem`] records
//! - [`order`] - Stable-sort newest first and cap at the configured limit
//!
//! Records are immutable once loaded; the ordering stage only reorders or
//! drops whole records, never individual fields.

mod loader;
mod order;

pub use loader::{load_items, parse_items, read_items, FeedItem, LoadError};
pub use order::{resolve_date, sort_and_truncate};
