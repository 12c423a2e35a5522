use alloc::sync::Arc;

use crate::core::subscription::Subscription;

/// Capability to release a resource exactly once.
///
/// Repeated `dispose` calls are no-ops.
pub trait Disposable {
  /// Releases the underlying resource.
  fn dispose(&self);
}

impl Disposable for Arc<dyn Subscription> {
  fn dispose(&self) {
    self.cancel();
  }
}
