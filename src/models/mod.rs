pub mod catalog;
pub mod constants;
pub mod estimate;
pub mod metrics;
pub mod snapshot;
