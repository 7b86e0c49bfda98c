#![forbid(unsafe_code)]

//! Thread-safe handle around a [`SelectionEngine`].
//!
//! The catalog and selected collections of a branch form one unit of mutual
//! exclusion: a transfer holds the lock from lookup to insertion. Observers
//! registered here run after the lock is released, so they may read the
//! engine again without deadlocking.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::engine::{SelectionEngine, TransferOutcome, TransferResult};
use crate::error::Result;
use crate::item::Side;

type SharedObserver = Arc<dyn Fn(&TransferResult) + Send + Sync>;

/// Cloneable, `Send + Sync` engine handle.
#[derive(Clone)]
pub struct SharedEngine {
    engine: Arc<Mutex<SelectionEngine>>,
    observers: Arc<Mutex<Vec<SharedObserver>>>,
}

impl std::fmt::Debug for SharedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEngine").finish_non_exhaustive()
    }
}

impl SharedEngine {
    #[must_use]
    pub fn new(engine: SelectionEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            observers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Exclusive access for reads or batched updates.
    ///
    /// A poisoned lock is recovered: every engine mutation is
    /// validate-then-mutate, so a panic elsewhere cannot leave it half done.
    pub fn lock(&self) -> MutexGuard<'_, SelectionEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a callback run after each transfer made through this handle.
    pub fn subscribe(&self, observer: impl Fn(&TransferResult) + Send + Sync + 'static) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }

    /// # Errors
    ///
    /// See [`SelectionEngine::transfer`].
    pub fn transfer(&self, name: &str, from: Side) -> Result<TransferResult> {
        let result = self.lock().transfer(name, from)?;
        self.notify(&result);
        Ok(result)
    }

    /// # Errors
    ///
    /// See [`SelectionEngine::transfer_with_reflow`].
    pub fn transfer_with_reflow(&self, name: &str, from: Side) -> Result<TransferOutcome> {
        let outcome = self.lock().transfer_with_reflow(name, from)?;
        self.notify(&outcome.result);
        Ok(outcome)
    }

    fn notify(&self, result: &TransferResult) {
        let observers: Vec<SharedObserver> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in observers {
            observer(result);
        }
    }
}
