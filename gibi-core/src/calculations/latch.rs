use std::sync::atomic::{AtomicBool, Ordering};

use tracing::trace;

/// An "already computing" latch for a single call site.
///
/// Calculations are pure, so overlapping runs are safe; the latch only drops
/// redundant re-triggers while one run is still in flight.
///
/// # Example
///
/// ```
/// use gibi_core::CalculationLatch;
///
/// let latch = CalculationLatch::new();
///
/// let guard = latch.try_begin().expect("latch starts idle");
/// assert!(latch.try_begin().is_none());
///
/// drop(guard);
/// assert!(latch.try_begin().is_some());
/// ```
#[derive(Debug, Default)]
pub struct CalculationLatch {
    busy: AtomicBool,
}

/// Holds the latch until dropped.
#[derive(Debug)]
#[must_use = "the latch is released as soon as the guard is dropped"]
pub struct LatchGuard<'a> {
    latch: &'a CalculationLatch,
}

impl CalculationLatch {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Claims the latch, or returns `None` if a calculation is in flight.
    pub fn try_begin(&self) -> Option<LatchGuard<'_>> {
        match self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
        {
            Ok(_) => Some(LatchGuard { latch: self }),
            Err(_) => {
                trace!("calculation already in flight; re-trigger dropped");
                None
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        self.latch.busy.store(false, Ordering::Release);
    }
}
