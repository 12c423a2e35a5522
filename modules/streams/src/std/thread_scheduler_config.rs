extern crate std;

use std::string::String;

/// Configuration for [`ThreadScheduler`](crate::std::ThreadScheduler).
#[derive(Debug, Clone)]
pub struct ThreadSchedulerConfig {
  thread_name: String,
}

impl ThreadSchedulerConfig {
  /// Creates a configuration with the given worker thread name.
  #[must_use]
  pub fn new(thread_name: impl Into<String>) -> Self {
    Self { thread_name: thread_name.into() }
  }

  /// Returns the worker thread name.
  #[must_use]
  pub fn thread_name(&self) -> &str {
    &self.thread_name
  }
}

impl Default for ThreadSchedulerConfig {
  fn default() -> Self {
    Self::new("rheo-scheduler")
  }
}
