// Domain layer - telemetry models and pure transforms
pub mod dashboard;
pub mod format;
pub mod poll_error;
pub mod poll_stats;
pub mod readings;
pub mod sample_buffer;
pub mod severity;
pub mod snapshot;
pub mod telemetry;
pub mod telemetry_domain;
