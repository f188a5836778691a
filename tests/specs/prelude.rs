//! Shared harness for the scenario suite.

use std::sync::Arc;
use std::time::Duration;

use fx_core::{
    Drainer, DrainerConfig, FakeStatusClient, KvStore, LockStore, MemoryKvStore, PendingQueue,
    RequestGate, SequentialIdGen,
};
use fx_store::FileKvStore;
use tempfile::TempDir;

pub use fx_core::{FocusTarget, GateOutcome, StatusError};

pub const LOCK_KEY: &str = "locked";
pub const QUEUE_PREFIX: &str = "queue/";

/// One logical deployment: lock, queue, and upstream client sharing a store.
/// Gates and drainers are minted per test so a scenario can run several of
/// either against the same state.
pub struct Harness {
    pub lock: LockStore,
    pub queue: PendingQueue<SequentialIdGen>,
    pub client: Arc<FakeStatusClient>,
}

impl Harness {
    pub fn in_memory() -> Self {
        Self::over(Arc::new(MemoryKvStore::new()))
    }

    /// Open over an existing state directory, as the daemon does on startup.
    pub fn on_disk(dir: &TempDir) -> Self {
        Self::over(Arc::new(FileKvStore::open(dir.path()).unwrap()))
    }

    pub fn over(store: Arc<dyn KvStore>) -> Self {
        let lock = LockStore::new(Arc::clone(&store), LOCK_KEY);
        let queue = PendingQueue::new(store, QUEUE_PREFIX, SequentialIdGen::default());
        Self {
            lock,
            queue,
            client: Arc::new(FakeStatusClient::new()),
        }
    }

    pub fn gate(&self) -> RequestGate<FakeStatusClient, SequentialIdGen> {
        RequestGate::new(
            self.lock.clone(),
            self.queue.clone(),
            Arc::clone(&self.client),
        )
    }

    pub fn drainer(&self) -> Drainer<FakeStatusClient, SequentialIdGen> {
        Drainer::new(
            self.lock.clone(),
            self.queue.clone(),
            Arc::clone(&self.client),
            fast_config(),
        )
    }

    /// Targets currently queued, in drain order.
    pub fn queued_targets(&self) -> Vec<FocusTarget> {
        self.queue
            .list_all()
            .unwrap()
            .into_iter()
            .map(|(_, op)| op.target)
            .collect()
    }
}

/// Tight intervals so scenarios that wait on the poller finish quickly.
pub fn fast_config() -> DrainerConfig {
    DrainerConfig {
        poll_interval: Duration::from_millis(10),
        retry_backoff: Duration::from_millis(20),
    }
}

/// Poll a condition until it holds, failing the test after five seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        if tokio::time::Instant::now() > deadline {
            panic!("condition not met within 5s");
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
