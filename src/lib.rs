//! # Spirit Tracker
//!
//! A local game log and statistics engine for Spirit Island.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (profiles, games, statistics, catalog)
//! - **calculate**: Scoring and comparison statistics
//! - **storage**: Filesystem data store (JSONL records, picture files)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;

use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
