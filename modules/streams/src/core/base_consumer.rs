#[cfg(test)]
mod tests;

use alloc::sync::Arc;
use core::marker::PhantomData;
use portable_atomic::{AtomicBool, Ordering};

use crate::core::{
  cancel_handle::CancelHandle, consumer_control::ConsumerControl, consumer_hooks::ConsumerHooks,
  signal_kind::SignalKind, stream_error::StreamError, subscriber::Subscriber, subscription::Subscription,
};

/// Subscriber adapter wiring a [`ConsumerHooks`] implementation to the
/// protocol.
///
/// Stores the incoming subscription, delegates `request`/`cancel` to it, and
/// guarantees that `on_finally` runs exactly once with the winning pathway
/// tag, even when a cancel races a terminal signal.
pub struct BaseConsumer<T, H>
where
  H: ConsumerHooks<T>, {
  hooks:     H,
  control:   ConsumerControl,
  finalized: AtomicBool,
  _pd:       PhantomData<fn(T)>,
}

impl<T, H> BaseConsumer<T, H>
where
  H: ConsumerHooks<T>,
{
  /// Wraps `hooks` into a subscriber; callers hand it to a publisher as an
  /// `Arc`.
  #[must_use]
  pub const fn new(hooks: H) -> Self {
    Self { hooks, control: ConsumerControl::new(), finalized: AtomicBool::new(false), _pd: PhantomData }
  }

  /// Forwards demand to the stored subscription.
  pub fn request(&self, n: u64) {
    self.control.request(n);
  }

  /// Cancels the subscription and runs the cancel teardown exactly once.
  pub fn cancel(&self) {
    if !self.control.cancel() {
      return;
    }
    if !self.finalized.swap(true, Ordering::AcqRel) {
      self.hooks.on_cancel();
      self.hooks.on_finally(SignalKind::Cancel);
    }
  }

  /// Returns a weak cancellation-only handle for sharing with other owners.
  #[must_use]
  pub fn cancel_handle(&self) -> CancelHandle {
    self.control.cancel_handle()
  }

  /// Returns `true` once a terminal pathway has run.
  #[must_use]
  pub fn is_finalized(&self) -> bool {
    self.finalized.load(Ordering::Acquire)
  }
}

impl<T, H> Subscriber<T> for BaseConsumer<T, H>
where
  T: Send + 'static,
  H: ConsumerHooks<T>,
{
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    self.control.install(subscription);
    self.hooks.on_subscribe(&self.control);
  }

  fn on_next(&self, value: T) {
    if self.is_finalized() {
      return;
    }
    self.hooks.on_next(&self.control, value);
  }

  fn on_complete(&self) {
    if self.finalized.swap(true, Ordering::AcqRel) {
      return;
    }
    self.control.release();
    self.hooks.on_complete();
    self.hooks.on_finally(SignalKind::Complete);
  }

  fn on_error(&self, error: StreamError) {
    if self.finalized.swap(true, Ordering::AcqRel) {
      return;
    }
    self.control.release();
    self.hooks.on_error(&error);
    self.hooks.on_finally(SignalKind::Error);
  }
}
