
use alloc::sync::Arc;
use portable_atomic::{AtomicBool, Ordering};

use crate::core::disposable::Disposable;

/// Cancellation handle for a scheduled task.
///
/// Workers check the handle before each invocation; disposing prevents any
/// further run but does not interrupt one already executing.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
  cancelled: Arc<AtomicBool>,
}

impl SchedulerHandle {
  /// Creates a live handle.
  #[must_use]
  pub fn new() -> Self {
    Self { cancelled: Arc::new(AtomicBool::new(false)) }
  }

  /// Returns `true` once the handle has been disposed.
  #[must_use]
  pub fn is_disposed(&self) -> bool {
    self.cancelled.load(Ordering::Acquire)
  }
}

impl Default for SchedulerHandle {
  fn default() -> Self {
    Self::new()
  }
}

impl Disposable for SchedulerHandle {
  fn dispose(&self) {
    self.cancelled.store(true, Ordering::Release);
  }
}
