#[cfg(test)]
mod tests;

extern crate std;

use std::{
  collections::BinaryHeap,
  sync::{Condvar, Mutex, MutexGuard},
  thread,
  time::Instant,
};

use alloc::sync::Arc;
use core::{cmp::Ordering as CmpOrdering, time::Duration};
use portable_atomic::{AtomicBool, AtomicU64, Ordering};

use crate::{
  core::{Scheduler, SchedulerHandle, StreamError, Task},
  std::thread_scheduler_config::ThreadSchedulerConfig,
};

/// Scheduler running every task on one dedicated worker thread.
///
/// Timed tasks wait in a deadline-ordered queue; the worker parks on a condvar
/// until the nearest deadline. `dispose` drops all pending tasks and lets the
/// worker exit; the thread is joined when the scheduler is dropped.
pub struct ThreadScheduler {
  shared: Arc<WorkerShared>,
  worker: Mutex<Option<thread::JoinHandle<()>>>,
}

struct WorkerShared {
  queue:    Mutex<BinaryHeap<TimedEntry>>,
  signal:   Condvar,
  disposed: AtomicBool,
  sequence: AtomicU64,
}

struct TimedEntry {
  due:      Instant,
  sequence: u64,
  period:   Option<Duration>,
  handle:   SchedulerHandle,
  task:     Task,
}

impl PartialEq for TimedEntry {
  fn eq(&self, other: &Self) -> bool {
    self.due == other.due && self.sequence == other.sequence
  }
}

impl Eq for TimedEntry {}

impl PartialOrd for TimedEntry {
  fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
    Some(self.cmp(other))
  }
}

impl Ord for TimedEntry {
  fn cmp(&self, other: &Self) -> CmpOrdering {
    // Reversed so the binary heap pops the earliest deadline first.
    other.due.cmp(&self.due).then_with(|| other.sequence.cmp(&self.sequence))
  }
}

fn recover<'a, T>(result: Result<MutexGuard<'a, T>, std::sync::PoisonError<MutexGuard<'a, T>>>) -> MutexGuard<'a, T> {
  match result {
    | Ok(guard) => guard,
    | Err(poisoned) => poisoned.into_inner(),
  }
}

impl ThreadScheduler {
  /// Starts the worker thread with the given configuration.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::ExecutorUnavailable` when the worker thread cannot
  /// be spawned.
  pub fn new(config: &ThreadSchedulerConfig) -> Result<Self, StreamError> {
    let shared = Arc::new(WorkerShared {
      queue:    Mutex::new(BinaryHeap::new()),
      signal:   Condvar::new(),
      disposed: AtomicBool::new(false),
      sequence: AtomicU64::new(0),
    });
    let worker_shared = shared.clone();
    let worker = thread::Builder::new()
      .name(config.thread_name().into())
      .spawn(move || Self::run(&worker_shared))
      .map_err(|_| StreamError::ExecutorUnavailable)?;
    Ok(Self { shared, worker: Mutex::new(Some(worker)) })
  }

  /// Starts the worker thread with the default configuration.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::ExecutorUnavailable` when the worker thread cannot
  /// be spawned.
  pub fn with_defaults() -> Result<Self, StreamError> {
    Self::new(&ThreadSchedulerConfig::default())
  }

  fn run(shared: &Arc<WorkerShared>) {
    loop {
      let mut queue = recover(shared.queue.lock());
      if shared.disposed.load(Ordering::Acquire) {
        queue.clear();
        return;
      }
      let now = Instant::now();
      let next_due = queue.peek().map(|entry| entry.due);
      match next_due {
        | Some(due) if due <= now => {
          let entry = queue.pop();
          drop(queue);
          let Some(mut entry) = entry else {
            continue;
          };
          if entry.handle.is_disposed() {
            continue;
          }
          tracing::trace!(sequence = entry.sequence, "running scheduled task");
          (entry.task)();
          if let Some(period) = entry.period {
            entry.due += period;
            Self::reschedule(shared, entry);
          }
        },
        | Some(due) => {
          let (guard, _) = match shared.signal.wait_timeout(queue, due - now) {
            | Ok(result) => result,
            | Err(poisoned) => poisoned.into_inner(),
          };
          drop(guard);
        },
        | None => {
          let guard = match shared.signal.wait(queue) {
            | Ok(guard) => guard,
            | Err(poisoned) => poisoned.into_inner(),
          };
          drop(guard);
        },
      }
    }
  }

  fn reschedule(shared: &Arc<WorkerShared>, entry: TimedEntry) {
    if shared.disposed.load(Ordering::Acquire) || entry.handle.is_disposed() {
      return;
    }
    recover(shared.queue.lock()).push(entry);
  }

  fn submit(&self, due: Instant, period: Option<Duration>, task: Task) -> Result<SchedulerHandle, StreamError> {
    if self.shared.disposed.load(Ordering::Acquire) {
      return Err(StreamError::ExecutorUnavailable);
    }
    let handle = SchedulerHandle::new();
    let entry = TimedEntry {
      due,
      sequence: self.shared.sequence.fetch_add(1, Ordering::AcqRel),
      period,
      handle: handle.clone(),
      task,
    };
    recover(self.shared.queue.lock()).push(entry);
    self.shared.signal.notify_one();
    Ok(handle)
  }
}

impl Scheduler for ThreadScheduler {
  fn schedule(&self, task: Task) -> Result<SchedulerHandle, StreamError> {
    self.submit(Instant::now(), None, task)
  }

  fn schedule_once(&self, delay: Duration, task: Task) -> Result<SchedulerHandle, StreamError> {
    self.submit(Instant::now() + delay, None, task)
  }

  fn schedule_at_fixed_rate(&self, period: Duration, task: Task) -> Result<SchedulerHandle, StreamError> {
    self.submit(Instant::now() + period, Some(period), task)
  }

  fn dispose(&self) {
    if self.shared.disposed.swap(true, Ordering::AcqRel) {
      return;
    }
    tracing::debug!("disposing thread scheduler");
    recover(self.shared.queue.lock()).clear();
    self.shared.signal.notify_all();
  }
}

impl Drop for ThreadScheduler {
  fn drop(&mut self) {
    self.dispose();
    let worker = recover(self.worker.lock()).take();
    if let Some(worker) = worker {
      let _ = worker.join();
    }
  }
}
