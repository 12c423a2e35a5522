//! One-at-a-time consumption through the hook-based consumer adapter.

use std::sync::Arc;

use rheo_streams_rs::core::{
  source, BaseConsumer, ConsumerControl, ConsumerHooks, Publisher, PublisherMappers, SignalKind,
};

struct PrintingHooks;

impl ConsumerHooks<u32> for PrintingHooks {
  fn on_subscribe(&self, control: &ConsumerControl) {
    control.request(1);
  }

  fn on_next(&self, control: &ConsumerControl, value: u32) {
    println!("received {value}");
    control.request(1);
  }

  fn on_finally(&self, kind: SignalKind) {
    println!("stream ended via {kind:?}");
  }
}

fn main() {
  let doubled_then_ten = rheo_streams_rs::core::FlatMapSignal::new(
    source::just_all(vec![1_u32, 2, 3]),
    PublisherMappers::new().next(|value: u32| source::just(value * 2)).complete(|| source::just(10_u32)),
  )
  .expect("at least one mapping is set");

  let consumer = Arc::new(BaseConsumer::new(PrintingHooks));
  doubled_then_ten.subscribe(consumer);
}
