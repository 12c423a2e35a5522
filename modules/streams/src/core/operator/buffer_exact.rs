
use alloc::sync::Arc;
use core::marker::PhantomData;
use spin::Mutex;

use crate::core::{
  demand::{add_cap, multiply_cap},
  operator::window_container::WindowContainer,
  stream_error::StreamError,
  subscriber::Subscriber,
  subscription::Subscription,
};

/// Contiguous-window regime: one open window, emitted when it holds `size`
/// values.
///
/// A downstream request of `k` windows becomes an upstream request of
/// `k * size` items, so filled windows are always covered by demand. The
/// final partial window is emitted at completion.
pub(in crate::core::operator) struct BufferExact<T, C, F> {
  downstream: Arc<dyn Subscriber<C>>,
  size:       u32,
  state:      Mutex<ExactState<C, F>>,
  _pd:        PhantomData<fn(T)>,
}

struct ExactState<C, F> {
  factory:          F,
  window:           Option<C>,
  filled:           u32,
  upstream:         Option<Arc<dyn Subscription>>,
  pending_upstream: u64,
  terminated:       bool,
  cancelled:        bool,
}

impl<T, C, F> BufferExact<T, C, F>
where
  T: Send + Sync + 'static,
  C: WindowContainer<T> + Send + Sync + 'static,
  F: FnMut() -> Result<C, StreamError> + Send + 'static,
{
  pub(in crate::core::operator) fn new(downstream: Arc<dyn Subscriber<C>>, size: u32, factory: F) -> Self {
    Self {
      downstream,
      size,
      state: Mutex::new(ExactState {
        factory,
        window: None,
        filled: 0,
        upstream: None,
        pending_upstream: 0,
        terminated: false,
        cancelled: false,
      }),
      _pd: PhantomData,
    }
  }

  fn fail(&self, mut state: spin::MutexGuard<'_, ExactState<C, F>>, error: StreamError) {
    state.terminated = true;
    state.window = None;
    let upstream = state.upstream.take();
    drop(state);
    if let Some(upstream) = upstream {
      upstream.cancel();
    }
    self.downstream.on_error(error);
  }
}

impl<T, C, F> Subscriber<T> for BufferExact<T, C, F>
where
  T: Send + Sync + 'static,
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
    if state.window.is_none() {
      match (state.factory)() {
        | Ok(container) => state.window = Some(container),
        | Err(error) => {
          self.fail(state, error);
          return;
        },
      }
    }
    if let Some(window) = state.window.as_mut() {
      window.push(value);
    }
    state.filled += 1;
    if state.filled == self.size {
      let window = state.window.take();
      state.filled = 0;
      drop(state);
      if let Some(window) = window {
        self.downstream.on_next(window);
      }
    }
  }

  fn on_complete(&self) {
    let mut state = self.state.lock();
    if state.cancelled || state.terminated {
      return;
    }
    state.terminated = true;
    state.upstream = None;
    let partial = state.window.take();
    drop(state);
    if let Some(window) = partial {
      self.downstream.on_next(window);
    }
    self.downstream.on_complete();
  }

  fn on_error(&self, error: StreamError) {
    let state = self.state.lock();
    if state.cancelled || state.terminated {
      return;
    }
    self.fail(state, error);
  }
}

impl<T, C, F> Subscription for BufferExact<T, C, F>
where
  T: Send + Sync + 'static,
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
    let items = multiply_cap(n, u64::from(self.size));
    match state.upstream.clone() {
      | Some(upstream) => {
        drop(state);
        upstream.request(items);
      },
      | None => {
        state.pending_upstream = add_cap(state.pending_upstream, items);
      },
    }
  }

  fn cancel(&self) {
    let mut state = self.state.lock();
    state.cancelled = true;
    state.window = None;
    let upstream = state.upstream.take();
    drop(state);
    if let Some(upstream) = upstream {
      upstream.cancel();
    }
  }
}
