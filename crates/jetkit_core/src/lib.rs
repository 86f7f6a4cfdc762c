//! Core domain logic for the jetkit demo apps.
//! This crate is the single source of truth for async state, persistence and
//! derived views; UI surfaces only consume what it publishes.

pub mod config;
pub mod db;
pub mod derive;
pub mod logging;
pub mod model;
pub mod reactive;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use derive::{
    compute_stats, is_favorite, partition_by_status, ReadingStats, StatusBuckets,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookId, BookVolume, ReadingStatus};
pub use model::favorite::{Favorite, UnitSetting, UnitSystem};
pub use model::note::{Note, NoteId};
pub use model::question::Question;
pub use model::weather::WeatherReport;
pub use model::ValidationError;
pub use reactive::{
    producer_fn, AsyncResult, CollectionSubscription, FetchController, FetchError,
    FetchErrorKind, FetchTicket, MutationError, ObservableCollection, Producer,
};
pub use repo::{RepoError, RepoResult};
pub use service::note_service::NoteService;
pub use service::reading_service::ReadingService;
pub use service::trivia_service::TriviaService;
pub use service::weather_service::WeatherService;
pub use store::{Database, EntityStore, Table};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
