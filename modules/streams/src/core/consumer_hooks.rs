use crate::core::{consumer_control::ConsumerControl, signal_kind::SignalKind, stream_error::StreamError};

/// Hooks dispatched by a [`BaseConsumer`](crate::core::BaseConsumer).
///
/// `on_subscribe` and `on_next` are required; the remaining hooks default to
/// no-ops. Every hook receives the shared [`ConsumerControl`] so it can issue
/// `request`/`cancel` re-entrantly.
pub trait ConsumerHooks<T>: Send + Sync {
  /// Runs once when the subscription is installed, before any other signal.
  fn on_subscribe(&self, control: &ConsumerControl);

  /// Runs for each delivered value.
  fn on_next(&self, control: &ConsumerControl, value: T);

  /// Runs on successful termination.
  fn on_complete(&self) {}

  /// Runs on failed termination.
  fn on_error(&self, error: &StreamError) {
    let _ = error;
  }

  /// Runs when the consumer cancels before termination.
  fn on_cancel(&self) {}

  /// Runs exactly once on any terminal pathway with the winning tag.
  fn on_finally(&self, kind: SignalKind) {
    let _ = kind;
  }
}
