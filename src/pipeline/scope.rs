use std::sync::Arc;
use tokio::sync::watch;

/// Lifetime that a pipeline's scheduled work is bound to.
///
/// Clones observe the same state. Once cancelled, a scope stays cancelled:
/// pending timers of every pipeline built with it stop, and lookups still in
/// flight are discarded when they return.
#[derive(Debug, Clone)]
pub struct CancellationScope {
    cancelled: Arc<watch::Sender<bool>>,
}

impl CancellationScope {
    pub fn new() -> Self {
        let (cancelled, _) = watch::channel(false);
        Self {
            cancelled: Arc::new(cancelled),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Resolves once the scope is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.cancelled.subscribe();
        // the sender lives in `self`, so the channel cannot close here
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Returns a guard that cancels the scope when dropped.
    pub fn drop_guard(&self) -> ScopeGuard {
        ScopeGuard {
            scope: self.clone(),
        }
    }
}

impl Default for CancellationScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancels its [`CancellationScope`] on drop.
#[derive(Debug)]
#[must_use = "the scope is cancelled as soon as the guard is dropped"]
pub struct ScopeGuard {
    scope: CancellationScope,
}

impl ScopeGuard {
    pub fn scope(&self) -> &CancellationScope {
        &self.scope
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
