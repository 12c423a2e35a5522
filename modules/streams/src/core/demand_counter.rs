#[cfg(test)]
mod tests;

use portable_atomic::{AtomicU64, Ordering};

use crate::core::demand::{add_cap, UNBOUNDED};

/// Atomic counter of outstanding downstream demand.
///
/// Saturates at [`UNBOUNDED`]; once unbounded, the counter never decreases.
/// `add` returns the previous value, so the 0 → n transition doubles as the
/// emitter-election edge in source drain loops.
#[derive(Debug)]
pub struct DemandCounter {
  value: AtomicU64,
}

impl DemandCounter {
  /// Creates a counter with zero demand.
  #[must_use]
  pub const fn new() -> Self {
    Self { value: AtomicU64::new(0) }
  }

  /// Adds demand and returns the previous value.
  pub fn add(&self, amount: u64) -> u64 {
    let mut current = self.value.load(Ordering::Acquire);
    loop {
      if current == UNBOUNDED {
        return UNBOUNDED;
      }
      let next = add_cap(current, amount);
      match self.value.compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire) {
        | Ok(_) => return current,
        | Err(observed) => current = observed,
      }
    }
  }

  /// Consumes delivered demand and returns the remaining value.
  pub fn consume(&self, amount: u64) -> u64 {
    let mut current = self.value.load(Ordering::Acquire);
    loop {
      if current == UNBOUNDED {
        return UNBOUNDED;
      }
      let next = current.saturating_sub(amount);
      match self.value.compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire) {
        | Ok(_) => return next,
        | Err(observed) => current = observed,
      }
    }
  }

  /// Returns the current outstanding demand.
  #[must_use]
  pub fn current(&self) -> u64 {
    self.value.load(Ordering::Acquire)
  }

  /// Returns `true` once the counter saturated at the sentinel.
  #[must_use]
  pub fn is_unbounded(&self) -> bool {
    self.current() == UNBOUNDED
  }
}

impl Default for DemandCounter {
  fn default() -> Self {
    Self::new()
  }
}
