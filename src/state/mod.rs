//! State module
//!
//! This module holds the loaded snapshot, including:
//! - Shared data structures (data.rs)
//! - Loading a cached query response from disk (library.rs)

pub mod data;
pub mod library;
