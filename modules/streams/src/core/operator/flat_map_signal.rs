
use alloc::{collections::VecDeque, string::ToString, sync::Arc};
use spin::Mutex;

use crate::core::{
  demand::{add_cap, UNBOUNDED},
  drain_gate::DrainGate,
  operator::publisher_mappers::PublisherMappers,
  publisher::{DynPublisher, Publisher},
  source::Fail,
  stream_error::StreamError,
  subscriber::Subscriber,
  subscription::Subscription,
};

/// Operator replacing each upstream signal with an inner publisher whose
/// emissions are merged downstream.
///
/// Inners run strictly in arrival order, one at a time: upstream is driven
/// with single-value requests, each value's inner is drained to completion
/// before the next is subscribed, and the terminal mapping's inner runs after
/// every value inner has terminated. Asynchronous inners therefore never
/// interleave.
pub struct FlatMapSignal<T, U> {
  upstream: DynPublisher<T>,
  mappers:  Mutex<Option<PublisherMappers<T, U>>>,
}

impl<T, U> FlatMapSignal<T, U> {
  /// Creates the operator over `upstream`.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when no mapping is set.
  pub fn new(upstream: DynPublisher<T>, mappers: PublisherMappers<T, U>) -> Result<Self, StreamError> {
    if mappers.is_empty() {
      return Err(StreamError::InvalidArgument { name: "mappers" });
    }
    Ok(Self { upstream, mappers: Mutex::new(Some(mappers)) })
  }
}

impl<T, U> Publisher<U> for FlatMapSignal<T, U>
where
  T: Send + Sync + 'static,
  U: Send + Sync + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<U>>) {
    let mappers = self.mappers.lock().take();
    let Some(mappers) = mappers else {
      Fail::new(StreamError::AlreadySubscribed).subscribe(subscriber);
      return;
    };
    let shared = Arc::new(FlatMapShared {
      downstream: subscriber.clone(),
      gate:       DrainGate::new(),
      state:      Mutex::new(FlatState {
        mappers,
        demand: 0,
        ready: VecDeque::new(),
        queue: VecDeque::new(),
        terminal_inner: None,
        upstream: None,
        active: None,
        active_live: false,
        upstream_done: false,
        pending_error: None,
        terminated: false,
        cancelled: false,
      }),
    });
    let stage = Arc::new(FlatMapStage { shared: shared.clone() });
    subscriber.on_subscribe(stage.clone());
    self.upstream.subscribe(stage);
  }
}

struct FlatState<T, U> {
  mappers:        PublisherMappers<T, U>,
  demand:         u64,
  ready:          VecDeque<U>,
  queue:          VecDeque<DynPublisher<U>>,
  terminal_inner: Option<DynPublisher<U>>,
  upstream:       Option<Arc<dyn Subscription>>,
  active:         Option<Arc<dyn Subscription>>,
  active_live:    bool,
  upstream_done:  bool,
  pending_error:  Option<StreamError>,
  terminated:     bool,
  cancelled:      bool,
}

/// State and drain loop shared by the outer stage and the inner subscribers.
struct FlatMapShared<T, U> {
  downstream: Arc<dyn Subscriber<U>>,
  gate:       DrainGate,
  state:      Mutex<FlatState<T, U>>,
}

enum DrainStep<U> {
  Deliver(U),
  Subscribe(DynPublisher<U>),
  Fail(Option<Arc<dyn Subscription>>, Option<Arc<dyn Subscription>>, StreamError),
  Complete,
  Park,
}

impl<T, U> FlatMapShared<T, U>
where
  T: Send + Sync + 'static,
  U: Send + Sync + 'static,
{
  /// Decides the next drain action under the state lock.
  fn next_step(&self) -> DrainStep<U> {
    let mut state = self.state.lock();
    if state.terminated || state.cancelled {
      return DrainStep::Park;
    }
    if let Some(error) = state.pending_error.take() {
      state.terminated = true;
      state.queue.clear();
      state.ready.clear();
      state.terminal_inner = None;
      return DrainStep::Fail(state.upstream.take(), state.active.take(), error);
    }
    if state.demand > 0 {
      if let Some(value) = state.ready.pop_front() {
        if state.demand != UNBOUNDED {
          state.demand -= 1;
        }
        return DrainStep::Deliver(value);
      }
    }
    if !state.active_live {
      if let Some(inner) = state.queue.pop_front() {
        state.active_live = true;
        return DrainStep::Subscribe(inner);
      }
      if state.upstream_done {
        if let Some(inner) = state.terminal_inner.take() {
          state.active_live = true;
          return DrainStep::Subscribe(inner);
        }
        if state.ready.is_empty() {
          state.terminated = true;
          return DrainStep::Complete;
        }
      }
    }
    DrainStep::Park
  }

  fn drain(shared: &Arc<Self>) {
    if !shared.gate.enter() {
      return;
    }
    let mut missed = 1;
    loop {
      loop {
        match shared.next_step() {
          | DrainStep::Deliver(value) => shared.downstream.on_next(value),
          | DrainStep::Subscribe(inner) => {
            inner.subscribe(Arc::new(FlatMapInner { shared: shared.clone() }));
          },
          | DrainStep::Fail(upstream, active, error) => {
            if let Some(upstream) = upstream {
              upstream.cancel();
            }
            if let Some(active) = active {
              active.cancel();
            }
            shared.downstream.on_error(error);
            break;
          },
          | DrainStep::Complete => {
            shared.downstream.on_complete();
            break;
          },
          | DrainStep::Park => break,
        }
      }
      missed = shared.gate.settle(missed);
      if missed == 0 {
        return;
      }
    }
  }
}

/// Outer stage: upstream-facing subscriber and downstream-facing subscription.
struct FlatMapStage<T, U> {
  shared: Arc<FlatMapShared<T, U>>,
}

impl<T, U> Subscriber<T> for FlatMapStage<T, U>
where
  T: Send + Sync + 'static,
  U: Send + Sync + 'static,
{
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    let mut state = self.shared.state.lock();
    if state.cancelled || state.terminated {
      drop(state);
      subscription.cancel();
      return;
    }
    state.upstream = Some(subscription.clone());
    drop(state);
    subscription.request(1);
  }

  fn on_next(&self, value: T) {
    let mut state = self.shared.state.lock();
    if state.cancelled || state.terminated {
      return;
    }
    match state.mappers.on_next.as_mut() {
      | Some(mapper) => {
        let inner = mapper(value);
        state.queue.push_back(inner);
        drop(state);
        FlatMapShared::drain(&self.shared);
      },
      | None => {
        // Swallowed value: keep upstream flowing so the terminal arrives.
        let upstream = state.upstream.clone();
        drop(state);
        if let Some(upstream) = upstream {
          upstream.request(1);
        }
      },
    }
  }

  fn on_complete(&self) {
    let mut state = self.shared.state.lock();
    if state.cancelled || state.terminated || state.upstream_done {
      return;
    }
    state.upstream_done = true;
    state.upstream = None;
    state.terminal_inner = state.mappers.on_complete.as_mut().map(|mapper| mapper());
    drop(state);
    FlatMapShared::drain(&self.shared);
  }

  fn on_error(&self, error: StreamError) {
    let mut state = self.shared.state.lock();
    if state.cancelled || state.terminated || state.upstream_done {
      return;
    }
    state.upstream_done = true;
    state.upstream = None;
    match state.mappers.on_error.as_mut() {
      | Some(mapper) => state.terminal_inner = Some(mapper(error)),
      | None => state.pending_error = Some(error),
    }
    drop(state);
    FlatMapShared::drain(&self.shared);
  }
}

impl<T, U> Subscription for FlatMapStage<T, U>
where
  T: Send + Sync + 'static,
  U: Send + Sync + 'static,
{
  fn request(&self, n: u64) {
    if n == 0 {
      let mut state = self.shared.state.lock();
      if state.terminated || state.cancelled {
        return;
      }
      state.pending_error = Some(StreamError::InvalidDemand { requested: n });
      drop(state);
      FlatMapShared::drain(&self.shared);
      return;
    }
    let mut state = self.shared.state.lock();
    if state.terminated || state.cancelled {
      return;
    }
    state.demand = add_cap(state.demand, n);
    let active = state.active.clone();
    drop(state);
    if let Some(active) = active {
      active.request(n);
    }
    FlatMapShared::drain(&self.shared);
  }

  fn cancel(&self) {
    let mut state = self.shared.state.lock();
    if state.cancelled {
      return;
    }
    state.cancelled = true;
    let upstream = state.upstream.take();
    let active = state.active.take();
    state.queue.clear();
    state.ready.clear();
    state.terminal_inner = None;
    drop(state);
    if let Some(upstream) = upstream {
      upstream.cancel();
    }
    if let Some(active) = active {
      active.cancel();
    }
  }
}

/// Subscriber attached to the currently active inner publisher.
struct FlatMapInner<T, U> {
  shared: Arc<FlatMapShared<T, U>>,
}

impl<T, U> Subscriber<U> for FlatMapInner<T, U>
where
  T: Send + Sync + 'static,
  U: Send + Sync + 'static,
{
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    let mut state = self.shared.state.lock();
    if state.cancelled || state.terminated {
      drop(state);
      subscription.cancel();
      return;
    }
    state.active = Some(subscription.clone());
    let outstanding = state.demand;
    drop(state);
    if outstanding > 0 {
      subscription.request(outstanding);
    }
  }

  fn on_next(&self, value: U) {
    let mut state = self.shared.state.lock();
    if state.cancelled || state.terminated {
      return;
    }
    state.ready.push_back(value);
    drop(state);
    FlatMapShared::drain(&self.shared);
  }

  fn on_complete(&self) {
    let mut state = self.shared.state.lock();
    if state.cancelled || state.terminated {
      return;
    }
    state.active = None;
    state.active_live = false;
    let upstream = if state.upstream_done { None } else { state.upstream.clone() };
    drop(state);
    if let Some(upstream) = upstream {
      upstream.request(1);
    }
    FlatMapShared::drain(&self.shared);
  }

  fn on_error(&self, error: StreamError) {
    let mut state = self.shared.state.lock();
    if state.cancelled || state.terminated {
      return;
    }
    state.active = None;
    state.active_live = false;
    state.pending_error = Some(StreamError::inner(error.to_string()));
    drop(state);
    FlatMapShared::drain(&self.shared);
  }
}
