
use alloc::string::String;
use core::fmt;

/// Errors carried by the `on_error` signal or returned by operator constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
  /// Indicates a `request` with zero demand.
  InvalidDemand {
    /// Requested demand amount.
    requested: u64,
  },
  /// Indicates an invalid operator parameter, raised synchronously at construction.
  InvalidArgument {
    /// Name of the offending parameter.
    name: &'static str,
  },
  /// Indicates a second subscription to a unicast publisher.
  AlreadySubscribed,
  /// Indicates that a window-container factory produced no container.
  MissingContainer,
  /// Indicates a failure forwarded from a source publisher.
  Upstream {
    /// Failure description.
    message: String,
  },
  /// Indicates a failure reported by a user callback or factory.
  Operator {
    /// Failure description.
    message: String,
  },
  /// Indicates a failure forwarded from an inner publisher.
  Inner {
    /// Failure description.
    message: String,
  },
  /// Indicates that no executor is available to run scheduled tasks.
  ExecutorUnavailable,
}

impl StreamError {
  /// Creates an upstream failure with the given description.
  pub fn upstream(message: impl Into<String>) -> Self {
    Self::Upstream { message: message.into() }
  }

  /// Creates a user-callback failure with the given description.
  pub fn operator(message: impl Into<String>) -> Self {
    Self::Operator { message: message.into() }
  }

  /// Creates an inner-publisher failure with the given description.
  pub fn inner(message: impl Into<String>) -> Self {
    Self::Inner { message: message.into() }
  }
}

impl fmt::Display for StreamError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::InvalidDemand { requested } => write!(f, "invalid demand: {requested}"),
      | Self::InvalidArgument { name } => write!(f, "{name} must be greater than zero"),
      | Self::AlreadySubscribed => write!(f, "publisher supports a single subscriber"),
      | Self::MissingContainer => write!(f, "window container factory returned no container"),
      | Self::Upstream { message } => write!(f, "upstream failure: {message}"),
      | Self::Operator { message } => write!(f, "operator failure: {message}"),
      | Self::Inner { message } => write!(f, "inner publisher failure: {message}"),
      | Self::ExecutorUnavailable => write!(f, "no executor available"),
    }
  }
}
