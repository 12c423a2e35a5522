//! `no_std` core: signal protocol, demand arithmetic, sources, and operators.

/// Consumer adapter storing the subscription and dispatching hooks.
mod base_consumer;
/// Weak cancellation-only handle to a live subscription.
mod cancel_handle;
/// Subscription storage shared between a consumer and its hooks.
mod consumer_control;
/// User-facing consumer hook trait.
mod consumer_hooks;
/// Saturating demand arithmetic helpers.
mod demand;
/// Atomic outstanding-demand counter.
mod demand_counter;
/// Idempotent disposal capability.
mod disposable;
/// Work-in-progress counter serializing drain loops.
mod drain_gate;
/// Operator publishers.
mod operator;
/// Publisher trait and boxed publisher alias.
mod publisher;
/// Scheduler capability trait.
mod scheduler;
/// Cancellation handle for scheduled tasks.
mod scheduler_handle;
/// Materialized signal variants.
mod signal;
/// Terminal-pathway tags for consumer teardown hooks.
mod signal_kind;
/// Source publishers.
pub mod source;
/// Stream error definitions.
mod stream_error;
/// Subscriber trait.
mod subscriber;
/// Subscription trait.
mod subscription;
/// Test probes for stream verification.
pub mod testing;

pub use base_consumer::BaseConsumer;
pub use cancel_handle::CancelHandle;
pub use consumer_control::ConsumerControl;
pub use consumer_hooks::ConsumerHooks;
pub use demand::{add_cap, multiply_cap, UNBOUNDED};
pub use demand_counter::DemandCounter;
pub use disposable::Disposable;
pub use drain_gate::DrainGate;
pub use operator::{Buffer, FlatMapSignal, MapSignal, PublisherMappers, SignalMappers, WindowContainer};
pub use publisher::{DynPublisher, Publisher};
pub use scheduler::{Scheduler, Task};
pub use scheduler_handle::SchedulerHandle;
pub use signal::Signal;
pub use signal_kind::SignalKind;
pub use source::{Concat, Empty, Fail, FromIter, FromTryIter, Just, JustAll, Never, Range};
pub use stream_error::StreamError;
pub use subscriber::Subscriber;
pub use subscription::Subscription;
