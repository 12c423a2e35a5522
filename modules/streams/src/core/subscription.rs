/// Live link between a consumer and its upstream producer.
///
/// Both methods are safe from any thread and re-entrantly from within signal
/// callbacks. `request(0)` errors the stream with
/// [`StreamError::InvalidDemand`](crate::core::StreamError::InvalidDemand);
/// `cancel` is idempotent.
pub trait Subscription: Send + Sync {
  /// Authorizes `n` further `on_next` deliveries; saturates at the unbounded
  /// sentinel.
  fn request(&self, n: u64);

  /// Stops signal delivery and releases upstream resources.
  fn cancel(&self);
}
