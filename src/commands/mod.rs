pub mod display;
pub mod estimator;
pub mod settings;
pub mod snapshot;
