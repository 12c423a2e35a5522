use alloc::sync::Arc;

use crate::core::{stream_error::StreamError, subscription::Subscription};

/// Consumer side of the signal protocol.
///
/// Delivery is serialized per subscriber: implementations never observe two
/// overlapping `on_next` calls, nor any signal after a terminal one.
pub trait Subscriber<T>: Send + Sync {
  /// Receives the subscription before any other signal.
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>);

  /// Receives a value previously authorized through `request`.
  fn on_next(&self, value: T);

  /// Receives successful termination.
  fn on_complete(&self);

  /// Receives failed termination.
  fn on_error(&self, error: StreamError);
}
