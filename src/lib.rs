//! Defensive normalization of stored fact-check analysis results.
//!
//! The analysis payload is produced elsewhere and stored as JSON text in a
//! session slot. [`normalize::normalize`] turns it into a [`types::DisplayModel`]
//! that is always fully populated, and [`scoring`] derives the presentation
//! values (inverted score, colour tones, traffic lights) from it.

pub mod config;
pub mod error;
pub mod normalize;
pub mod render;
pub mod scoring;
pub mod server;
pub mod store;
pub mod types;

pub use normalize::{normalize, normalize_bytes, normalize_value};
pub use scoring::ResultsView;
pub use types::{ClaimBreakdownEntry, ClaimStatus, Decision, DisplayModel, WebResult};
