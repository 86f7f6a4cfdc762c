//! Use-case services, one per app.
//!
//! # Responsibility
//! - Wire producers and entity stores into fetch controllers and
//!   observable collections.
//! - Expose app-level operations and derived views to the UI surface.
//!
//! # Invariants
//! - Services never bypass store validation/persistence contracts.
//! - Derived views are computed from the latest published snapshot.

pub mod note_service;
pub mod reading_service;
pub mod trivia_service;
pub mod weather_service;
