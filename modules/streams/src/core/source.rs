//! Source publishers: the primitive emitters at the head of a chain.

/// Sequential concatenation of two publishers.
mod concat;
/// Immediately completing publisher.
mod empty;
/// Immediately failing publisher.
mod fail;
/// Iterator-backed publisher.
mod from_iter;
/// Single-value publisher.
mod just;
/// Fixed-sequence publisher.
mod just_all;
/// Publisher that never signals after subscription.
mod never;
/// Arithmetic integer sequence publisher.
mod range;

use alloc::{sync::Arc, vec::Vec};

pub use concat::Concat;
pub use empty::Empty;
pub use fail::Fail;
pub use from_iter::{FromIter, FromTryIter};
pub use just::Just;
pub use just_all::JustAll;
pub use never::Never;
pub use range::Range;

use crate::core::{publisher::DynPublisher, stream_error::StreamError};

/// Returns a publisher that completes without emitting.
#[must_use]
pub fn empty<T>() -> DynPublisher<T>
where
  T: Send + Sync + 'static, {
  Arc::new(Empty::new())
}

/// Returns a publisher emitting `value` once on first demand.
#[must_use]
pub fn just<T>(value: T) -> DynPublisher<T>
where
  T: Clone + Send + Sync + 'static, {
  Arc::new(Just::new(value))
}

/// Returns a publisher emitting `values` in order under demand.
#[must_use]
pub fn just_all<T>(values: Vec<T>) -> DynPublisher<T>
where
  T: Clone + Send + Sync + 'static, {
  Arc::new(JustAll::new(values))
}

/// Returns a publisher emitting `start, start + 1, …` for `count` values.
///
/// # Errors
///
/// Returns `StreamError::InvalidArgument` when the end of the range overflows
/// a signed 64-bit cursor.
pub fn range(start: i64, count: u64) -> Result<DynPublisher<i64>, StreamError> {
  Range::new(start, count).map(|publisher| Arc::new(publisher) as DynPublisher<i64>)
}

/// Returns a publisher that fails with `error` right after subscription.
#[must_use]
pub fn fail<T>(error: StreamError) -> DynPublisher<T>
where
  T: Send + Sync + 'static, {
  Arc::new(Fail::new(error))
}

/// Returns a publisher that never emits and never terminates.
#[must_use]
pub fn never<T>() -> DynPublisher<T>
where
  T: Send + Sync + 'static, {
  Arc::new(Never::new())
}

/// Returns a publisher pulling from a restartable lazy sequence under demand.
#[must_use]
pub fn from_iter<F, I>(factory: F) -> DynPublisher<I::Item>
where
  F: Fn() -> I + Send + Sync + 'static,
  I: IntoIterator + 'static,
  I::IntoIter: Send + 'static,
  I::Item: Send + Sync + 'static, {
  Arc::new(FromIter::new(factory))
}

/// Returns a publisher pulling from a fallible lazy sequence; an `Err` item
/// terminates the stream with `on_error`.
#[must_use]
pub fn from_try_iter<F, I, T>(factory: F) -> DynPublisher<T>
where
  F: Fn() -> I + Send + Sync + 'static,
  I: IntoIterator<Item = Result<T, StreamError>> + 'static,
  I::IntoIter: Send + 'static,
  T: Send + Sync + 'static, {
  Arc::new(FromTryIter::new(factory))
}

/// Returns a publisher draining `first` and then `second`.
#[must_use]
pub fn concat<T>(first: DynPublisher<T>, second: DynPublisher<T>) -> DynPublisher<T>
where
  T: Send + Sync + 'static, {
  Arc::new(Concat::new(first, second))
}
