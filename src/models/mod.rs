//! Core data models for the spirit tracker.

pub mod catalog;
mod game;
mod ids;
mod profile;
mod stats;

pub use game::*;
pub use ids::*;
pub use profile::*;
pub use stats::*;
