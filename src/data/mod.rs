//! Gallery data module
//!
//! Tags and cards are immutable snapshots supplied by the static data source.
//! The controller only filters them.

pub mod catalog;
pub mod models;

pub use catalog::Catalog;
pub use models::{ALL_TAG_ID, Card, Tag, slugify};
