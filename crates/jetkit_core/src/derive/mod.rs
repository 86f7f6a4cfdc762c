//! Pure derived views over collection snapshots.
//!
//! # Invariants
//! - Every function is total and deterministic.
//! - Inputs are borrowed and never mutated.
//! - Lookups that find nothing return `None`/empty, never an error.

pub mod tip;
pub mod trivia;
pub mod views;

pub use tip::{per_person, tip_amount};
pub use trivia::{AnswerOutcome, TriviaProgress};
pub use views::{
    books_for_user, compute_stats, find_favorite, is_favorite, is_highly_rated,
    partition_by_status, preferred_unit, ReadingStats, StatusBuckets,
};
