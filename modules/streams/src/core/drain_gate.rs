
use portable_atomic::{AtomicU32, Ordering};

/// Work-in-progress counter electing a single drain holder per subscription.
///
/// A thread that fails to `enter` has its work recorded by the increment; the
/// holder keeps looping until `settle` reports that every recorded pass has
/// been retired. This yields the single-writer property without holding a
/// lock across signal callbacks.
#[derive(Debug)]
pub struct DrainGate {
  wip: AtomicU32,
}

impl DrainGate {
  /// Creates an idle gate.
  #[must_use]
  pub const fn new() -> Self {
    Self { wip: AtomicU32::new(0) }
  }

  /// Registers a drain pass; returns `true` when the caller became the holder.
  pub fn enter(&self) -> bool {
    self.wip.fetch_add(1, Ordering::AcqRel) == 0
  }

  /// Retires `missed` observed passes; returns the number still pending.
  ///
  /// The holder loops while the result is non-zero, carrying it as the next
  /// `missed` argument.
  pub fn settle(&self, missed: u32) -> u32 {
    self.wip.fetch_sub(missed, Ordering::AcqRel) - missed
  }
}

impl Default for DrainGate {
  fn default() -> Self {
    Self::new()
  }
}
