pub mod authentication;
pub mod configuration;
pub mod domain;
pub mod scenario;
pub mod story_client;
pub mod telemetry;
