//! Derivative matching module
//!
//! Pure functions over an already-loaded snapshot:
//! - Counting derivatives and documents by role (counts.rs)
//! - Pairing documents with their thumbnails by filename (thumbnail.rs)
//!
//! Nothing here does I/O or keeps state between calls.

pub mod counts;
pub mod thumbnail;

pub use counts::{classify_counts, Counts};
pub use thumbnail::{
    base_token, match_all, match_document_to_thumbnail, standalone_images, summarize,
    DocumentMatch, MatchSummary,
};
