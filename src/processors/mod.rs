pub mod cast_aggregator;

pub use cast_aggregator::CastAggregator;
