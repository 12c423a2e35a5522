use alloc::sync::Arc;

use crate::core::subscriber::Subscriber;

/// Producer of a serialized signal stream.
///
/// Each `subscribe` call builds an independent, cold subscription chain and
/// delivers exactly one `on_subscribe` before any other signal.
pub trait Publisher<T>: Send + Sync {
  /// Connects `subscriber` and begins signal delivery.
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>);
}

/// Shared trait-object form used by operators and inner-publisher mappers.
pub type DynPublisher<T> = Arc<dyn Publisher<T>>;
