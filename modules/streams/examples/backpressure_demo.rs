//! Demand-gated emission: windows are delivered only as the consumer asks.

use std::sync::Arc;

use rheo_streams_rs::core::{source, testing::TestConsumer, Buffer, MapSignal, Publisher, SignalMappers};

fn main() {
  let consumer = TestConsumer::with_demand(0);
  let squared = MapSignal::new(
    source::range(1, 10).expect("range bounds are valid"),
    SignalMappers::new().next(|value: i64| value * value),
  )
  .expect("at least one mapping is set");
  let windows = Buffer::new(Arc::new(squared), 3, 3).expect("size and skip are positive");
  windows.subscribe(consumer.clone());

  println!("before any demand: {:?}", consumer.values());

  consumer.request(2);
  println!("after two windows:  {:?}", consumer.values());

  consumer.request(2);
  println!("after the rest:     {:?}", consumer.values());
  println!("completed: {}", consumer.is_completed());
}
