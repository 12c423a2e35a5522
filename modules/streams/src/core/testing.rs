//! Test probes for stream verification.

mod test_consumer;

pub use test_consumer::TestConsumer;
