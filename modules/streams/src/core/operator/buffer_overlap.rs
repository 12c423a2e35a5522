
use alloc::{collections::VecDeque, sync::Arc};
use core::marker::PhantomData;
use spin::Mutex;

use crate::core::{
  demand::{add_cap, multiply_cap, UNBOUNDED},
  drain_gate::DrainGate,
  operator::window_container::WindowContainer,
  stream_error::StreamError,
  subscriber::Subscriber,
  subscription::Subscription,
};

/// Overlapping regime (`skip < size`): a new window opens every `skip` values
/// and every value lands in all open windows.
///
/// The first downstream request of `k` windows becomes an upstream request of
/// `size + (k - 1) * skip` items and later ones of `k * skip`, which fills
/// exactly `k` windows without over-requesting. At completion the still-open
/// windows are parked and drained in open order under downstream demand; the
/// completion signal follows the last parked window.
pub(in crate::core::operator) struct BufferOverlap<T, C, F> {
  downstream: Arc<dyn Subscriber<C>>,
  size:       u32,
  skip:       u32,
  gate:       DrainGate,
  state:      Mutex<OverlapState<C, F>>,
  _pd:        PhantomData<fn(T)>,
}

struct OpenWindow<C> {
  container: C,
  filled:    u32,
}

struct OverlapState<C, F> {
  factory:          F,
  windows:          VecDeque<OpenWindow<C>>,
  parked:           VecDeque<C>,
  index:            u64,
  requested:        u64,
  first_request:    bool,
  upstream:         Option<Arc<dyn Subscription>>,
  pending_upstream: u64,
  upstream_done:    bool,
  terminated:       bool,
  cancelled:        bool,
}

impl<T, C, F> BufferOverlap<T, C, F>
where
  T: Clone + Send + Sync + 'static,
  C: WindowContainer<T> + Send + Sync + 'static,
  F: FnMut() -> Result<C, StreamError> + Send + 'static,
{
  pub(in crate::core::operator) fn new(downstream: Arc<dyn Subscriber<C>>, size: u32, skip: u32, factory: F) -> Self {
    Self {
      downstream,
      size,
      skip,
      gate: DrainGate::new(),
      state: Mutex::new(OverlapState {
        factory,
        windows: VecDeque::new(),
        parked: VecDeque::new(),
        index: 0,
        requested: 0,
        first_request: true,
        upstream: None,
        pending_upstream: 0,
        upstream_done: false,
        terminated: false,
        cancelled: false,
      }),
      _pd: PhantomData,
    }
  }

  fn fail(&self, mut state: spin::MutexGuard<'_, OverlapState<C, F>>, error: StreamError) {
    state.terminated = true;
    state.windows.clear();
    state.parked.clear();
    let upstream = state.upstream.take();
    drop(state);
    if let Some(upstream) = upstream {
      upstream.cancel();
    }
    self.downstream.on_error(error);
  }

  /// Drains parked windows once upstream has completed.
  fn drain(&self) {
    if !self.gate.enter() {
      return;
    }
    let mut missed = 1;
    loop {
      loop {
        let mut state = self.state.lock();
        if state.terminated || state.cancelled || !state.upstream_done {
          break;
        }
        if state.requested > 0 {
          if let Some(window) = state.parked.pop_front() {
            if state.requested != UNBOUNDED {
              state.requested -= 1;
            }
            drop(state);
            self.downstream.on_next(window);
            continue;
          }
        }
        if state.parked.is_empty() {
          state.terminated = true;
          drop(state);
          self.downstream.on_complete();
        }
        break;
      }
      missed = self.gate.settle(missed);
      if missed == 0 {
        return;
      }
    }
  }
}

impl<T, C, F> Subscriber<T> for BufferOverlap<T, C, F>
where
  T: Clone + Send + Sync + 'static,
  C: WindowContainer<T> + Send + Sync + 'static,
  F: FnMut() -> Result<C, StreamError> + Send + 'static,
{
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    let mut state = self.state.lock();
    if state.cancelled || state.terminated {
      drop(state);
      subscription.cancel();
      return;
    }
    state.upstream = Some(subscription.clone());
    let pending = core::mem::take(&mut state.pending_upstream);
    drop(state);
    if pending > 0 {
      subscription.request(pending);
    }
  }

  fn on_next(&self, value: T) {
    let mut state = self.state.lock();
    if state.cancelled || state.terminated {
      return;
    }
    if state.index % u64::from(self.skip) == 0 {
      match (state.factory)() {
        | Ok(container) => state.windows.push_back(OpenWindow { container, filled: 0 }),
        | Err(error) => {
          self.fail(state, error);
          return;
        },
      }
    }
    state.index += 1;
    for window in &mut state.windows {
      window.container.push(value.clone());
      window.filled += 1;
    }
    let front_full = state.windows.front().map_or(false, |front| front.filled == self.size);
    let emitted = if front_full { state.windows.pop_front() } else { None };
    if let Some(window) = emitted {
      if state.requested != UNBOUNDED {
        state.requested = state.requested.saturating_sub(1);
      }
      drop(state);
      self.downstream.on_next(window.container);
    }
  }

  fn on_complete(&self) {
    let mut state = self.state.lock();
    if state.cancelled || state.terminated {
      return;
    }
    state.upstream_done = true;
    state.upstream = None;
    while let Some(window) = state.windows.pop_front() {
      state.parked.push_back(window.container);
    }
    drop(state);
    self.drain();
  }

  fn on_error(&self, error: StreamError) {
    let state = self.state.lock();
    if state.cancelled || state.terminated {
      return;
    }
    self.fail(state, error);
  }
}

impl<T, C, F> Subscription for BufferOverlap<T, C, F>
where
  T: Clone + Send + Sync + 'static,
  C: WindowContainer<T> + Send + Sync + 'static,
  F: FnMut() -> Result<C, StreamError> + Send + 'static,
{
  fn request(&self, n: u64) {
    let mut state = self.state.lock();
    if state.cancelled || state.terminated {
      return;
    }
    if n == 0 {
      state.cancelled = true;
      self.fail(state, StreamError::InvalidDemand { requested: n });
      return;
    }
    state.requested = add_cap(state.requested, n);
    let items = if state.first_request {
      state.first_request = false;
      add_cap(u64::from(self.size), multiply_cap(u64::from(self.skip), n - 1))
    } else {
      multiply_cap(u64::from(self.skip), n)
    };
    let upstream = state.upstream.clone();
    if upstream.is_none() && !state.upstream_done {
      state.pending_upstream = add_cap(state.pending_upstream, items);
    }
    drop(state);
    if let Some(upstream) = upstream {
      upstream.request(items);
    }
    self.drain();
  }

  fn cancel(&self) {
    let mut state = self.state.lock();
    state.cancelled = true;
    state.windows.clear();
    state.parked.clear();
    let upstream = state.upstream.take();
    drop(state);
    if let Some(upstream) = upstream {
      upstream.cancel();
    }
  }
}
