#[cfg(test)]
mod tests;

extern crate std;

use std::{
  sync::{Mutex, MutexGuard},
  vec::Vec,
};

use core::time::Duration;
use portable_atomic::{AtomicBool, Ordering};

use crate::core::{Scheduler, SchedulerHandle, StreamError, Task};

/// Scheduler dispatching tasks onto the ambient tokio runtime.
///
/// Every accepted task is spawned as its own tokio task; `dispose` aborts all
/// of them. Construction and scheduling require a reachable runtime handle.
#[derive(Debug)]
pub struct TokioScheduler {
  tasks:    Mutex<Vec<tokio::task::JoinHandle<()>>>,
  disposed: AtomicBool,
}

fn recover<'a, T>(result: Result<MutexGuard<'a, T>, std::sync::PoisonError<MutexGuard<'a, T>>>) -> MutexGuard<'a, T> {
  match result {
    | Ok(guard) => guard,
    | Err(poisoned) => poisoned.into_inner(),
  }
}

impl TokioScheduler {
  /// Creates a scheduler bound to the current tokio runtime.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::ExecutorUnavailable` when no runtime is entered.
  pub fn new() -> Result<Self, StreamError> {
    Self::ensure_runtime()?;
    Ok(Self { tasks: Mutex::new(Vec::new()), disposed: AtomicBool::new(false) })
  }

  fn ensure_runtime() -> Result<tokio::runtime::Handle, StreamError> {
    tokio::runtime::Handle::try_current().map_err(|_| StreamError::ExecutorUnavailable)
  }

  fn track(&self, task: tokio::task::JoinHandle<()>) {
    let mut tasks = recover(self.tasks.lock());
    tasks.retain(|handle| !handle.is_finished());
    tasks.push(task);
  }

  fn admit(&self) -> Result<tokio::runtime::Handle, StreamError> {
    if self.disposed.load(Ordering::Acquire) {
      return Err(StreamError::ExecutorUnavailable);
    }
    Self::ensure_runtime()
  }
}

impl Scheduler for TokioScheduler {
  fn schedule(&self, mut task: Task) -> Result<SchedulerHandle, StreamError> {
    let runtime = self.admit()?;
    let handle = SchedulerHandle::new();
    let guard = handle.clone();
    self.track(runtime.spawn(async move {
      if !guard.is_disposed() {
        task();
      }
    }));
    Ok(handle)
  }

  fn schedule_once(&self, delay: Duration, mut task: Task) -> Result<SchedulerHandle, StreamError> {
    let runtime = self.admit()?;
    let handle = SchedulerHandle::new();
    let guard = handle.clone();
    self.track(runtime.spawn(async move {
      tokio::time::sleep(delay).await;
      if !guard.is_disposed() {
        task();
      }
    }));
    Ok(handle)
  }

  fn schedule_at_fixed_rate(&self, period: Duration, mut task: Task) -> Result<SchedulerHandle, StreamError> {
    let runtime = self.admit()?;
    let handle = SchedulerHandle::new();
    let guard = handle.clone();
    self.track(runtime.spawn(async move {
      loop {
        tokio::time::sleep(period).await;
        if guard.is_disposed() {
          return;
        }
        task();
      }
    }));
    Ok(handle)
  }

  fn dispose(&self) {
    if self.disposed.swap(true, Ordering::AcqRel) {
      return;
    }
    tracing::debug!("disposing tokio scheduler");
    for task in recover(self.tasks.lock()).drain(..) {
      task.abort();
    }
  }
}

impl Drop for TokioScheduler {
  fn drop(&mut self) {
    self.dispose();
  }
}
