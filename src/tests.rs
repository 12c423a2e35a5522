use crate::prelude::{Publisher, StreamError};
use rheo_streams_rs::core::{source, testing::TestConsumer};

#[test]
fn crate_version_matches_manifest() {
  assert_eq!(crate::crate_version(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn prelude_exposes_a_working_pipeline() {
  let consumer = TestConsumer::unbounded();
  source::range(1, 3).expect("range").subscribe(consumer.clone());
  assert_eq!(consumer.values(), [1, 2, 3]);
  assert!(consumer.is_completed());
}

#[test]
fn prelude_exposes_stream_errors() {
  let error = StreamError::InvalidDemand { requested: 0 };
  assert_eq!(error, StreamError::InvalidDemand { requested: 0 });
}
