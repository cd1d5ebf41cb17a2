//! Analysis modules.
//!
//! Aggregation, trend detection, benchmarking and the insight rules that
//! turn a generated series into dashboard figures.

pub mod aggregator;
pub mod benchmark;
pub mod insights;
pub mod trend;

pub use aggregator::*;
pub use benchmark::benchmark;
pub use insights::generate_insights;
pub use trend::trend;
