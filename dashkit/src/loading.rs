// dashkit/src/loading.rs
//
// Scoped loading flag: a guard's lifetime is exactly one in-flight analysis
//

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Raises the flag unless it is already raised; at most one guard exists at a time.
    pub fn try_acquire(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard { flag: self.clone() })
    }
}

/// Lowers the flag on drop, whichever way the analysis ends.
#[derive(Debug)]
#[must_use = "dropping the guard ends the loading window immediately"]
pub struct LoadingGuard {
    flag: LoadingFlag,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.0.store(false, Ordering::Release);
    }
}
