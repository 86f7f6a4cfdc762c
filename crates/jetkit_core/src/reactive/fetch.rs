//! Keyed fetch driver publishing `AsyncResult` snapshots.
//!
//! # Responsibility
//! - Run one producer call per accepted key on the tokio runtime.
//! - Publish `Loading` immediately and the outcome on completion.
//!
//! # Invariants
//! - At most one fetch for the current key is in flight; re-issuing an equal
//!   key while it is in flight is a no-op.
//! - Only the most recently issued fetch may publish its outcome. Superseded
//!   fetches keep running and their outcome is discarded.
//! - Producer errors and panics become `AsyncResult::Failure`.

use super::async_result::{AsyncResult, FetchError, FetchErrorKind};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Remote or local call that resolves one key into a value.
///
/// Implementations are stateless from the controller's point of view and
/// must not retry on their own; callers retry by fetching again.
#[async_trait]
pub trait Producer<K: Send + 'static, T: Send + 'static>: Send + Sync {
    async fn produce(&self, key: K) -> Result<T, FetchError>;
}

/// Adapter turning an async closure into a `Producer`.
pub struct FnProducer<F>(F);

/// Wraps `f` so it can be handed to `FetchController::new`.
pub fn producer_fn<F>(f: F) -> FnProducer<F> {
    FnProducer(f)
}

#[async_trait]
impl<K, T, F, Fut> Producer<K, T> for FnProducer<F>
where
    K: Send + 'static,
    T: Send + 'static,
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    async fn produce(&self, key: K) -> Result<T, FetchError> {
        (self.0)(key).await
    }
}

/// Outcome of a `fetch` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Generation of the fetch that is current after this call.
    pub generation: u64,
    /// `false` when an equal key was already in flight.
    pub accepted: bool,
}

struct FetchState<K> {
    generation: u64,
    current_key: Option<K>,
    in_flight: bool,
}

/// Drives keyed fetches and exposes the latest `AsyncResult`.
pub struct FetchController<K, T> {
    name: &'static str,
    producer: Arc<dyn Producer<K, T>>,
    state: Arc<Mutex<FetchState<K>>>,
    publisher: Arc<watch::Sender<AsyncResult<T>>>,
    runtime: Handle,
}

impl<K, T> FetchController<K, T>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates a controller bound to the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside of a tokio runtime. Use `with_runtime`
    /// to bind an explicit handle instead.
    pub fn new(name: &'static str, producer: impl Producer<K, T> + 'static) -> Self {
        Self::with_runtime(name, producer, Handle::current())
    }

    /// Creates a controller that spawns its fetches on `runtime`.
    ///
    /// `fetch` may then be called from threads outside of the runtime.
    pub fn with_runtime(
        name: &'static str,
        producer: impl Producer<K, T> + 'static,
        runtime: Handle,
    ) -> Self {
        let (publisher, _) = watch::channel(AsyncResult::loading());
        Self {
            name,
            producer: Arc::new(producer),
            state: Arc::new(Mutex::new(FetchState {
                generation: 0,
                current_key: None,
                in_flight: false,
            })),
            publisher: Arc::new(publisher),
            runtime,
        }
    }

    /// Issues a fetch for `key`.
    ///
    /// Publishes `Loading` before returning unless an equal key is already in
    /// flight, in which case nothing is published.
    pub fn fetch(&self, key: K) -> FetchTicket {
        let generation = {
            let mut state = lock_state(&self.state);
            if state.in_flight && state.current_key.as_ref() == Some(&key) {
                debug!(
                    "event=fetch_deduplicated module=fetch controller={} generation={}",
                    self.name, state.generation
                );
                return FetchTicket {
                    generation: state.generation,
                    accepted: false,
                };
            }

            state.generation += 1;
            state.current_key = Some(key.clone());
            state.in_flight = true;
            // Published under the state lock so an older completion cannot
            // land between the generation bump and this `Loading`.
            self.publisher.send_replace(AsyncResult::loading());
            state.generation
        };

        info!(
            "event=fetch_start module=fetch controller={} generation={}",
            self.name, generation
        );

        let name = self.name;
        let producer = Arc::clone(&self.producer);
        let state = Arc::clone(&self.state);
        let publisher = Arc::clone(&self.publisher);
        let runtime = self.runtime.clone();
        self.runtime.spawn(async move {
            let call = runtime.spawn(async move { producer.produce(key).await });
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(FetchError::new(
                    FetchErrorKind::Panicked,
                    format!("producer task failed: {join_error}"),
                )),
            };

            let mut state = lock_state(&state);
            if state.generation != generation {
                debug!(
                    "event=fetch_discarded module=fetch controller={} generation={} current_generation={}",
                    name, generation, state.generation
                );
                return;
            }
            state.in_flight = false;

            match &outcome {
                Ok(_) => info!(
                    "event=fetch_finish module=fetch status=ok controller={} generation={}",
                    name, generation
                ),
                Err(cause) => warn!(
                    "event=fetch_finish module=fetch status=error controller={} generation={} error={}",
                    name, generation, cause
                ),
            }
            publisher.send_replace(AsyncResult::from(outcome));
        });

        FetchTicket {
            generation,
            accepted: true,
        }
    }

    /// Re-issues the last key. Returns `None` when nothing was fetched yet.
    pub fn refresh(&self) -> Option<FetchTicket> {
        let key = lock_state(&self.state).current_key.clone()?;
        Some(self.fetch(key))
    }

    /// Receiver observing every published state, starting with the current one.
    pub fn subscribe(&self) -> watch::Receiver<AsyncResult<T>> {
        self.publisher.subscribe()
    }

    /// Latest published state.
    pub fn current(&self) -> AsyncResult<T> {
        self.publisher.borrow().clone()
    }

    /// Key of the most recently accepted fetch.
    pub fn current_key(&self) -> Option<K> {
        lock_state(&self.state).current_key.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        lock_state(&self.state).in_flight
    }

    /// Waits until the latest accepted fetch has published its outcome.
    ///
    /// Before the first `fetch` the state is `Loading` and this waits for it.
    pub async fn settled(&self) -> AsyncResult<T> {
        let mut receiver = self.publisher.subscribe();
        loop {
            let snapshot = receiver.borrow_and_update().clone();
            if !snapshot.is_loading() {
                return snapshot;
            }
            if receiver.changed().await.is_err() {
                return snapshot;
            }
        }
    }
}

fn lock_state<K>(state: &Mutex<FetchState<K>>) -> MutexGuard<'_, FetchState<K>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
