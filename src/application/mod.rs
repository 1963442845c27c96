// Application layer - polling use cases and the seams they depend on
pub mod clock;
pub mod controller;
pub mod dashboard_service;
pub mod overview_service;
pub mod poller;
pub mod renderer;
pub mod telemetry_source;

#[cfg(test)]
pub mod test_support;
