//! Asynchronous state containers consumed by the UI surface.
//!
//! # Responsibility
//! - Represent "value being fetched, may fail, may arrive late" as
//!   `AsyncResult`.
//! - Drive keyed fetches with last-issued-key-wins publishing.
//! - Propagate entity store changes as deduplicated full snapshots.
//!
//! # Invariants
//! - Failures are published, never raised to the caller of `fetch`.
//! - Published state is only replaced, never mutated in place.

pub mod async_result;
pub mod collection;
pub mod fetch;

pub use async_result::{AsyncResult, FetchError, FetchErrorKind};
pub use collection::{CollectionSubscription, MutationError, ObservableCollection};
pub use fetch::{producer_fn, FetchController, FetchTicket, FnProducer, Producer};
