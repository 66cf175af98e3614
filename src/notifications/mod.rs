//! Notification interpretation: tag parsing, fallback extraction,
//! classification and enrichment of free-text ticket notifications.
//!
//! Data flows one way: raw message → classify → extract (tags first,
//! regex fallback) → [`EnrichedNotification`] → presentation.

pub mod classifier;
pub mod enricher;
pub mod extractors;
pub mod presentation;
pub mod tags;
pub mod types;

pub use classifier::classify;
pub use enricher::{enrich, enrich_all};
pub use types::{Category, EnrichedNotification, RawNotification, Role};
