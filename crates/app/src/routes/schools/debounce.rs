use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Quiet period before a typed search is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Cancellable trailing-edge timer.
///
/// Every [`schedule`](Debouncer::schedule) supersedes the previous one; only
/// the ticket from the most recent call survives its wait.
#[derive(Clone, Debug)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
    delay: Duration,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            delay,
        }
    }

    pub fn schedule(&self) -> DebounceTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        DebounceTicket {
            generation,
            current: self.generation.clone(),
            delay: self.delay,
        }
    }

    /// Drop whatever is pending.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct DebounceTicket {
    generation: u64,
    current: Arc<AtomicU64>,
    delay: Duration,
}

impl DebounceTicket {
    /// Sleep out the quiet period. `true` if nothing superseded this ticket.
    pub async fn wait(self) -> bool {
        sleep(self.delay).await;
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(delay: Duration) {
    gloo_timers::future::sleep(delay).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await;
}
