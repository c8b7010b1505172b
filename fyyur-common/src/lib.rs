//! # Fyyur Common Library
//!
//! Shared code for the Fyyur listing service:
//! - Database schema, models and per-table queries
//! - Listing, aggregation and search over venues, artists and shows
//! - Genre list codec
//! - Bootstrap configuration loading
//! - Timestamp helpers

pub mod config;
pub mod db;
pub mod error;
pub mod genres;
pub mod listing;
pub mod time;

pub use error::{Error, Result};
