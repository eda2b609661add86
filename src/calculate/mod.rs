//! Scoring and statistics engine.
//!
//! Pure functions over in-memory games:
//! - Single-game scoring
//! - Order-agnostic spirit combination matching
//! - Comparative statistics against a game history
//! - Profile-wide summaries

pub mod comparison;
pub mod score;
pub mod spirits;
pub mod summary;

pub use comparison::*;
pub use score::*;
pub use spirits::*;
pub use summary::*;

/// Round to the nearest integer with halves going up (2.5 -> 3, -2.5 -> -2).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
