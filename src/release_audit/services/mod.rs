mod match_aggregator;

pub use match_aggregator::MatchAggregator;
