//! Diagnostics for cached media-archive query responses.
//!
//! `state` turns a query dump into plain media items, `matcher` counts
//! derivatives and pairs documents with their thumbnails, and `report`
//! prints the results for the `derivative-audit` binary.

pub mod matcher;
pub mod report;
pub mod state;
