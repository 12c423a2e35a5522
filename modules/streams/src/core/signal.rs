#[cfg(test)]
mod tests;

use crate::core::stream_error::StreamError;

/// Materialized downstream signal.
///
/// `Complete` and `Error` are terminal; a subscription delivers at most one of
/// them, and nothing after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal<T> {
  /// A stream value.
  Next(T),
  /// Successful termination.
  Complete,
  /// Failed termination.
  Error(StreamError),
}

impl<T> Signal<T> {
  /// Returns `true` when the signal ends the stream.
  #[must_use]
  pub const fn is_terminal(&self) -> bool {
    matches!(self, Self::Complete | Self::Error(_))
  }

  /// Returns the carried value, if any.
  pub fn into_value(self) -> Option<T> {
    match self {
      | Self::Next(value) => Some(value),
      | Self::Complete | Self::Error(_) => None,
    }
  }
}
