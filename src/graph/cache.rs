//! One-shot memoization slot for probed schemas.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

/// An optional cached value behind an async mutex.
///
/// The first successful initialization is kept until [`SchemaCache::invalidate`].
/// Failed initializations leave the slot empty.
pub struct SchemaCache<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> Default for SchemaCache<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<T> SchemaCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value or runs `init` to produce it.
    ///
    /// The lock is held across `init`, so concurrent callers wait for the
    /// first one instead of probing twice.
    pub async fn get_or_try_init<E, F, Fut>(&self, init: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }
        let value = Arc::new(init().await?);
        *slot = Some(Arc::clone(&value));
        Ok(value)
    }

    /// Clears the slot.
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }
}
