use alloc::boxed::Box;

use crate::core::{publisher::DynPublisher, stream_error::StreamError};

/// Optional inner-publisher replacements for the three upstream signals of
/// [`FlatMapSignal`](crate::core::FlatMapSignal).
///
/// Unset mappings pass the corresponding signal through unchanged, except for
/// `on_next`, where an unset mapping swallows the value while re-requesting it
/// upstream. At least one mapping must be set at operator construction.
pub struct PublisherMappers<T, U> {
  pub(in crate::core::operator) on_next:     Option<Box<dyn FnMut(T) -> DynPublisher<U> + Send>>,
  pub(in crate::core::operator) on_error:    Option<Box<dyn FnMut(StreamError) -> DynPublisher<U> + Send>>,
  pub(in crate::core::operator) on_complete: Option<Box<dyn FnMut() -> DynPublisher<U> + Send>>,
}

impl<T, U> PublisherMappers<T, U> {
  /// Creates an empty mapping set.
  #[must_use]
  pub const fn new() -> Self {
    Self { on_next: None, on_error: None, on_complete: None }
  }

  /// Sets the inner publisher produced per `on_next` value.
  #[must_use]
  pub fn next(mut self, mapper: impl FnMut(T) -> DynPublisher<U> + Send + 'static) -> Self {
    self.on_next = Some(Box::new(mapper));
    self
  }

  /// Sets the inner publisher produced for the `on_error` terminal.
  #[must_use]
  pub fn error(mut self, mapper: impl FnMut(StreamError) -> DynPublisher<U> + Send + 'static) -> Self {
    self.on_error = Some(Box::new(mapper));
    self
  }

  /// Sets the inner publisher produced for the `on_complete` terminal.
  #[must_use]
  pub fn complete(mut self, mapper: impl FnMut() -> DynPublisher<U> + Send + 'static) -> Self {
    self.on_complete = Some(Box::new(mapper));
    self
  }

  /// Returns `true` when no mapping is set.
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.on_next.is_none() && self.on_error.is_none() && self.on_complete.is_none()
  }
}

impl<T, U> Default for PublisherMappers<T, U> {
  fn default() -> Self {
    Self::new()
  }
}
