
use alloc::{sync::Arc, vec::Vec};
use core::marker::PhantomData;
use spin::Mutex;

use crate::core::{
  operator::{
    buffer_exact::BufferExact, buffer_gapped::BufferGapped, buffer_overlap::BufferOverlap,
    window_container::WindowContainer,
  },
  publisher::{DynPublisher, Publisher},
  source::Fail,
  stream_error::StreamError,
  subscriber::Subscriber,
};

/// Operator accumulating upstream values into windows of `size` values opened
/// every `skip` values.
///
/// Downstream demand is counted in emitted windows and translated into the
/// upstream item demand of the active regime: contiguous (`skip == size`),
/// gapped (`skip > size`), or overlapping (`skip < size`).
pub struct Buffer<T, C, F> {
  upstream: DynPublisher<T>,
  size:     u32,
  skip:     u32,
  factory:  Mutex<Option<F>>,
  _pd:      PhantomData<fn() -> C>,
}

fn new_vec<T>() -> Result<Vec<T>, StreamError> {
  Ok(Vec::new())
}

impl<T> Buffer<T, Vec<T>, fn() -> Result<Vec<T>, StreamError>> {
  /// Creates a buffer emitting `Vec` windows.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `size` or `skip` is zero.
  pub fn new(upstream: DynPublisher<T>, size: u32, skip: u32) -> Result<Self, StreamError> {
    Self::with_factory(upstream, size, skip, new_vec::<T> as fn() -> Result<Vec<T>, StreamError>)
  }

  /// Creates a contiguous buffer, equivalent to `new(upstream, size, size)`.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `size` is zero.
  pub fn exact(upstream: DynPublisher<T>, size: u32) -> Result<Self, StreamError> {
    Self::new(upstream, size, size)
  }
}

impl<T, C, F> Buffer<T, C, F> {
  /// Creates a buffer whose windows come from `factory`.
  ///
  /// A factory failure is routed downstream as `on_error` at window-open time;
  /// parameter validation happens here, synchronously.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `size` or `skip` is zero.
  pub fn with_factory(upstream: DynPublisher<T>, size: u32, skip: u32, factory: F) -> Result<Self, StreamError> {
    if size == 0 {
      return Err(StreamError::InvalidArgument { name: "size" });
    }
    if skip == 0 {
      return Err(StreamError::InvalidArgument { name: "skip" });
    }
    Ok(Self { upstream, size, skip, factory: Mutex::new(Some(factory)), _pd: PhantomData })
  }
}

impl<T, C, F> Publisher<C> for Buffer<T, C, F>
where
  T: Clone + Send + Sync + 'static,
  C: WindowContainer<T> + Send + Sync + 'static,
  F: FnMut() -> Result<C, StreamError> + Send + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<C>>) {
    let factory = self.factory.lock().take();
    let Some(factory) = factory else {
      Fail::new(StreamError::AlreadySubscribed).subscribe(subscriber);
      return;
    };
    if self.skip == self.size {
      let stage = Arc::new(BufferExact::new(subscriber.clone(), self.size, factory));
      subscriber.on_subscribe(stage.clone());
      self.upstream.subscribe(stage);
    } else if self.skip > self.size {
      let stage = Arc::new(BufferGapped::new(subscriber.clone(), self.size, self.skip, factory));
      subscriber.on_subscribe(stage.clone());
      self.upstream.subscribe(stage);
    } else {
      let stage = Arc::new(BufferOverlap::new(subscriber.clone(), self.size, self.skip, factory));
      subscriber.on_subscribe(stage.clone());
      self.upstream.subscribe(stage);
    }
  }
}
