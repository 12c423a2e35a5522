//! Operator publishers transforming an upstream signal stream.

/// Windowed accumulation operator.
mod buffer;
/// Exact (non-overlapping, contiguous) buffer regime.
mod buffer_exact;
/// Gapped (`skip > size`) buffer regime.
mod buffer_gapped;
/// Overlapping (`skip < size`) buffer regime.
mod buffer_overlap;
/// Signal-replacement operator merging inner publishers.
mod flat_map_signal;
/// Signal-replacement operator emitting mapped values.
mod map_signal;
/// Optional publisher-producing signal mappings.
mod publisher_mappers;
/// Optional value-producing signal mappings.
mod signal_mappers;
/// Push interface implemented by window containers.
mod window_container;

pub use buffer::Buffer;
pub use flat_map_signal::FlatMapSignal;
pub use map_signal::MapSignal;
pub use publisher_mappers::PublisherMappers;
pub use signal_mappers::SignalMappers;
pub use window_container::WindowContainer;
