use alloc::boxed::Box;
use core::time::Duration;

use crate::core::{scheduler_handle::SchedulerHandle, stream_error::StreamError};

/// Unit of work accepted by a scheduler.
///
/// Invoked at most once unless scheduled periodically.
pub type Task = Box<dyn FnMut() + Send + 'static>;

/// Injectable execution capability for time-based and asynchronous operators.
///
/// The core never creates threads or timers itself; operators that need
/// deferral receive an implementation of this trait from the caller.
pub trait Scheduler: Send + Sync {
  /// Runs `task` as soon as a worker is available.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::ExecutorUnavailable` when the scheduler has been
  /// disposed or no executor is reachable.
  fn schedule(&self, task: Task) -> Result<SchedulerHandle, StreamError>;

  /// Runs `task` once after `delay`.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::ExecutorUnavailable` when the scheduler has been
  /// disposed or no executor is reachable.
  fn schedule_once(&self, delay: Duration, task: Task) -> Result<SchedulerHandle, StreamError>;

  /// Runs `task` repeatedly with `period` between invocations.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::ExecutorUnavailable` when the scheduler has been
  /// disposed or no executor is reachable.
  fn schedule_at_fixed_rate(&self, period: Duration, task: Task) -> Result<SchedulerHandle, StreamError>;

  /// Cancels pending tasks and releases worker resources. Idempotent.
  fn dispose(&self);
}
