use super::DemandCounter;
use crate::core::demand::UNBOUNDED;

#[test]
fn add_returns_the_previous_value() {
  let counter = DemandCounter::new();
  assert_eq!(counter.add(3), 0);
  assert_eq!(counter.add(2), 3);
  assert_eq!(counter.current(), 5);
}

#[test]
fn consume_never_drops_below_zero() {
  let counter = DemandCounter::new();
  counter.add(2);
  assert_eq!(counter.consume(1), 1);
  assert_eq!(counter.consume(5), 0);
  assert_eq!(counter.current(), 0);
}

#[test]
fn unbounded_demand_is_sticky() {
  let counter = DemandCounter::new();
  counter.add(UNBOUNDED);
  assert!(counter.is_unbounded());
  assert_eq!(counter.consume(10), UNBOUNDED);
  assert_eq!(counter.add(1), UNBOUNDED);
}

#[test]
fn overflowing_requests_saturate() {
  let counter = DemandCounter::new();
  counter.add(UNBOUNDED - 1);
  counter.add(2);
  assert!(counter.is_unbounded());
}
