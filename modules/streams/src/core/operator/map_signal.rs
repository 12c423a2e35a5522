#[cfg(test)]
mod tests;

use alloc::sync::Arc;
use spin::Mutex;

use crate::core::{
  demand::{add_cap, UNBOUNDED},
  operator::signal_mappers::SignalMappers,
  publisher::{DynPublisher, Publisher},
  source::Fail,
  stream_error::StreamError,
  subscriber::Subscriber,
  subscription::Subscription,
};

/// Operator replacing each upstream signal with an optionally mapped value.
///
/// A synthetic value produced for a terminal signal is subject to downstream
/// demand: with no demand outstanding it is parked and replayed on the next
/// `request`, followed by `on_complete`.
pub struct MapSignal<T, U> {
  upstream: DynPublisher<T>,
  mappers:  Mutex<Option<SignalMappers<T, U>>>,
}

impl<T, U> MapSignal<T, U> {
  /// Creates the operator over `upstream`.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when no mapping is set.
  pub fn new(upstream: DynPublisher<T>, mappers: SignalMappers<T, U>) -> Result<Self, StreamError> {
    if mappers.is_empty() {
      return Err(StreamError::InvalidArgument { name: "mappers" });
    }
    Ok(Self { upstream, mappers: Mutex::new(Some(mappers)) })
  }
}

impl<T, U> Publisher<U> for MapSignal<T, U>
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
    let stage = Arc::new(MapSignalStage {
      downstream: subscriber.clone(),
      state:      Mutex::new(MapState {
        mappers,
        phase: MapPhase::Running,
        demand: 0,
        upstream: None,
        pending_upstream: 0,
      }),
    });
    subscriber.on_subscribe(stage.clone());
    self.upstream.subscribe(stage);
  }
}

enum MapPhase<U> {
  /// Forwarding upstream signals.
  Running,
  /// Upstream terminated; the synthetic value waits for demand.
  PendingTerminal(U),
  /// Terminal delivered or chain torn down.
  Done,
}

struct MapState<T, U> {
  mappers:          SignalMappers<T, U>,
  phase:            MapPhase<U>,
  demand:           u64,
  upstream:         Option<Arc<dyn Subscription>>,
  pending_upstream: u64,
}

/// Operator-internal subscriber-and-subscription pair.
///
/// All state transitions happen under the state lock; downstream and upstream
/// callbacks are always invoked after it is released.
struct MapSignalStage<T, U> {
  downstream: Arc<dyn Subscriber<U>>,
  state:      Mutex<MapState<T, U>>,
}

impl<T, U> MapSignalStage<T, U>
where
  T: Send + Sync + 'static,
  U: Send + Sync + 'static,
{
  fn terminal(&self, error: Option<StreamError>) {
    let mut state = self.state.lock();
    if !matches!(state.phase, MapPhase::Running) {
      return;
    }
    state.upstream = None;
    let synthetic = match &error {
      | Some(failure) => {
        let failure = failure.clone();
        state.mappers.on_error.as_mut().map(|mapper| mapper(failure))
      },
      | None => state.mappers.on_complete.as_mut().map(|mapper| mapper()),
    };
    match synthetic {
      | None => {
        state.phase = MapPhase::Done;
        drop(state);
        match error {
          | Some(failure) => self.downstream.on_error(failure),
          | None => self.downstream.on_complete(),
        }
      },
      | Some(value) => {
        if state.demand > 0 {
          if state.demand != UNBOUNDED {
            state.demand -= 1;
          }
          state.phase = MapPhase::Done;
          drop(state);
          self.downstream.on_next(value);
          self.downstream.on_complete();
        } else {
          state.phase = MapPhase::PendingTerminal(value);
        }
      },
    }
  }

  fn reject(&self, requested: u64) {
    let mut state = self.state.lock();
    if matches!(state.phase, MapPhase::Done) {
      return;
    }
    state.phase = MapPhase::Done;
    let upstream = state.upstream.take();
    drop(state);
    if let Some(upstream) = upstream {
      upstream.cancel();
    }
    self.downstream.on_error(StreamError::InvalidDemand { requested });
  }
}

impl<T, U> Subscriber<T> for MapSignalStage<T, U>
where
  T: Send + Sync + 'static,
  U: Send + Sync + 'static,
{
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    let mut state = self.state.lock();
    if matches!(state.phase, MapPhase::Done) {
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
    if !matches!(state.phase, MapPhase::Running) {
      return;
    }
    match state.mappers.on_next.as_mut() {
      | Some(mapper) => {
        let mapped = mapper(value);
        if state.demand != UNBOUNDED {
          state.demand = state.demand.saturating_sub(1);
        }
        drop(state);
        self.downstream.on_next(mapped);
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
    self.terminal(None);
  }

  fn on_error(&self, error: StreamError) {
    self.terminal(Some(error));
  }
}

impl<T, U> Subscription for MapSignalStage<T, U>
where
  T: Send + Sync + 'static,
  U: Send + Sync + 'static,
{
  fn request(&self, n: u64) {
    if n == 0 {
      self.reject(n);
      return;
    }
    let mut state = self.state.lock();
    match core::mem::replace(&mut state.phase, MapPhase::Done) {
      | MapPhase::Running => {
        state.phase = MapPhase::Running;
        state.demand = add_cap(state.demand, n);
        match state.upstream.clone() {
          | Some(upstream) => {
            drop(state);
            upstream.request(n);
          },
          | None => {
            state.pending_upstream = add_cap(state.pending_upstream, n);
          },
        }
      },
      | MapPhase::PendingTerminal(value) => {
        drop(state);
        self.downstream.on_next(value);
        self.downstream.on_complete();
      },
      | MapPhase::Done => {},
    }
  }

  fn cancel(&self) {
    let mut state = self.state.lock();
    state.phase = MapPhase::Done;
    let upstream = state.upstream.take();
    drop(state);
    if let Some(upstream) = upstream {
      upstream.cancel();
    }
  }
}
