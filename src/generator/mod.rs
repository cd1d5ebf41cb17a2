//! Mock metric series generation.
//!
//! Produces deterministic, formula-based time series standing in for a
//! real social media analytics feed.

pub mod formula;
pub mod series;

pub use formula::MockFormula;
pub use series::generate;
