use std::sync::Arc;

use tokio::sync::watch;

/// Tracks whether the consumer of a fetch is still around.
///
/// Clones share state. Once [`Liveness::end`] is called, pending fetches
/// resolve to [`SignalError::Cancelled`](crate::errors::SignalError::Cancelled)
/// and late results are discarded instead of being delivered.
#[derive(Debug, Clone)]
pub struct Liveness {
    alive: Arc<watch::Sender<bool>>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        let (alive, _) = watch::channel(true);
        Self {
            alive: Arc::new(alive),
        }
    }

    pub fn is_alive(&self) -> bool {
        *self.alive.borrow()
    }

    pub fn end(&self) {
        self.alive.send_replace(false);
    }

    /// Resolves once [`Liveness::end`] has been called.
    pub async fn ended(&self) {
        let mut rx = self.alive.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|alive| !*alive).await;
    }
}
