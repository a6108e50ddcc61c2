//! Loader and writer implementations for plan documents.
//!
//! - [`JsonFileStore`]: the document of record, one JSON file per plan
//! - [`MirrorWriter`]: wraps any writer and refreshes SQLite query tables
//!   after each save

pub mod json;
pub mod mirror;

pub use json::JsonFileStore;
pub use mirror::MirrorWriter;
