//! Live, store-backed entity sequence.
//!
//! # Responsibility
//! - Re-read the full sequence from an `EntityStore` after every change
//!   notification and publish it to subscribers.
//! - Delegate mutations to the store without touching published state.
//!
//! # Invariants
//! - `Loading` means "first read not delivered yet"; an empty store is
//!   `Success(vec![])`.
//! - Two consecutive published snapshots are never equal.
//! - A mutation returns only after a snapshot reflecting it was published.
//! - The pump task stops when the collection is dropped.

use super::async_result::{AsyncResult, FetchError, FetchErrorKind};
use crate::repo::{RepoError, RepoResult};
use crate::store::EntityStore;
use log::{debug, error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Mutation failure returned to the initiating caller.
#[derive(Debug)]
pub enum MutationError {
    /// The store rejected or failed the operation.
    Store {
        operation: &'static str,
        source: RepoError,
    },
    /// The blocking worker running the operation did not complete.
    Interrupted {
        operation: &'static str,
        message: String,
    },
}

impl MutationError {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Store { operation, .. } | Self::Interrupted { operation, .. } => operation,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Store {
                source: RepoError::NotFound(_),
                ..
            }
        )
    }
}

impl Display for MutationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store { operation, source } => write!(f, "{operation} failed: {source}"),
            Self::Interrupted { operation, message } => {
                write!(f, "{operation} interrupted: {message}")
            }
        }
    }
}

impl Error for MutationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store { source, .. } => Some(source),
            Self::Interrupted { .. } => None,
        }
    }
}

type Snapshot<T> = AsyncResult<Vec<T>>;

/// Subscribable view over an entity store.
pub struct ObservableCollection<S: EntityStore> {
    store: Arc<S>,
    snapshots: Arc<watch::Sender<Snapshot<S::Record>>>,
    /// Store revision covered by the latest published snapshot.
    synced: watch::Receiver<Option<u64>>,
    pump: JoinHandle<()>,
}

impl<S: EntityStore> ObservableCollection<S> {
    /// Starts propagating `store` changes.
    ///
    /// # Panics
    /// Panics when called outside of a tokio runtime.
    pub fn open(store: Arc<S>) -> Self {
        let (sender, _) = watch::channel(AsyncResult::loading());
        let snapshots = Arc::new(sender);
        let (synced_tx, synced) = watch::channel(None);
        let pump = tokio::spawn(pump_changes(
            Arc::clone(&store),
            Arc::clone(&snapshots),
            synced_tx,
        ));
        Self {
            store,
            snapshots,
            synced,
            pump,
        }
    }

    /// Starts a new subscription delivering the current snapshot first.
    pub fn subscribe(&self) -> CollectionSubscription<S::Record> {
        CollectionSubscription {
            receiver: self.snapshots.subscribe(),
            delivered_first: false,
        }
    }

    /// Latest published snapshot.
    pub fn current(&self) -> Snapshot<S::Record> {
        self.snapshots.borrow().clone()
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn insert(&self, record: S::Record) -> Result<S::Id, MutationError> {
        self.apply("insert", move |store| store.insert(&record)).await
    }

    pub async fn update(&self, record: S::Record) -> Result<(), MutationError> {
        self.apply("update", move |store| store.update(&record)).await
    }

    pub async fn delete(&self, id: S::Id) -> Result<(), MutationError> {
        self.apply("delete", move |store| store.delete(&id)).await
    }

    /// Removes every record and returns how many were removed.
    pub async fn delete_all(&self) -> Result<usize, MutationError> {
        self.apply("delete_all", |store| store.delete_all()).await
    }

    /// Runs `op` against the store on a blocking worker.
    ///
    /// `operation` labels log events and errors. On success this waits until
    /// the pump has published a snapshot at least as new as the store
    /// revision observed after `op`.
    pub async fn apply<R>(
        &self,
        operation: &'static str,
        op: impl FnOnce(&S) -> RepoResult<R> + Send + 'static,
    ) -> Result<R, MutationError>
    where
        R: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let name = store.name();
        match tokio::task::spawn_blocking(move || op(&store)).await {
            Ok(Ok(value)) => {
                let revision = *self.store.changes().borrow();
                self.wait_synced(revision).await;
                debug!(
                    "event=collection_mutate module=collection status=ok store={} op={} revision={}",
                    name, operation, revision
                );
                Ok(value)
            }
            Ok(Err(source)) => {
                warn!(
                    "event=collection_mutate module=collection status=error store={} op={} error={}",
                    name, operation, source
                );
                Err(MutationError::Store { operation, source })
            }
            Err(join_error) => {
                error!(
                    "event=collection_mutate module=collection status=error store={} op={} error_code=worker_failed",
                    name, operation
                );
                Err(MutationError::Interrupted {
                    operation,
                    message: join_error.to_string(),
                })
            }
        }
    }

    async fn wait_synced(&self, revision: u64) {
        let mut synced = self.synced.clone();
        loop {
            let seen = *synced.borrow_and_update();
            if seen.is_some_and(|seen| seen >= revision) {
                return;
            }
            if synced.changed().await.is_err() {
                return;
            }
        }
    }
}

impl<S: EntityStore> Drop for ObservableCollection<S> {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Stream of snapshots for one subscriber.
///
/// Dropping it and calling `subscribe` again restarts from the latest
/// snapshot.
pub struct CollectionSubscription<T> {
    receiver: watch::Receiver<Snapshot<T>>,
    delivered_first: bool,
}

impl<T: Clone> CollectionSubscription<T> {
    /// Waits for the next snapshot.
    ///
    /// The first call returns as soon as a first read was delivered, later
    /// calls wait for a different snapshot. Returns `None` once the
    /// collection has shut down.
    pub async fn next(&mut self) -> Option<Snapshot<T>> {
        if self.delivered_first {
            self.receiver.changed().await.ok()?;
        }
        loop {
            let snapshot = self.receiver.borrow_and_update().clone();
            if !snapshot.is_loading() {
                self.delivered_first = true;
                return Some(snapshot);
            }
            self.receiver.changed().await.ok()?;
        }
    }

    /// Latest snapshot without waiting.
    pub fn latest(&self) -> Snapshot<T> {
        self.receiver.borrow().clone()
    }
}

async fn pump_changes<S: EntityStore>(
    store: Arc<S>,
    snapshots: Arc<watch::Sender<Snapshot<S::Record>>>,
    synced: watch::Sender<Option<u64>>,
) {
    let name = store.name();
    let mut changes = store.changes();
    loop {
        // Marked seen before reading so a write racing the read triggers
        // another pass.
        let revision = *changes.borrow_and_update();

        let reader = Arc::clone(&store);
        let next = match tokio::task::spawn_blocking(move || reader.get_all()).await {
            Ok(Ok(records)) => AsyncResult::success(records),
            Ok(Err(err)) => {
                warn!(
                    "event=collection_read module=collection status=error store={} revision={} error={}",
                    name, revision, err
                );
                AsyncResult::failure(FetchError::from(err))
            }
            Err(join_error) => AsyncResult::failure(FetchError::new(
                FetchErrorKind::Panicked,
                format!("store read failed: {join_error}"),
            )),
        };

        let len = next.value().map_or(0, Vec::len);
        let emitted = snapshots.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        debug!(
            "event=collection_emit module=collection store={} revision={} emitted={} len={}",
            name, revision, emitted, len
        );
        synced.send_replace(Some(revision));

        if changes.changed().await.is_err() {
            debug!(
                "event=collection_close module=collection store={} reason=store_closed",
                name
            );
            return;
        }
    }
}
