//! std-only layer: scheduler implementations backed by OS threads and tokio.

/// Dedicated-thread scheduler implementation.
mod thread_scheduler;
/// Thread scheduler configuration.
mod thread_scheduler_config;
/// Tokio-task-backed scheduler implementation.
mod tokio_scheduler;

pub use thread_scheduler::ThreadScheduler;
pub use thread_scheduler_config::ThreadSchedulerConfig;
pub use tokio_scheduler::TokioScheduler;
