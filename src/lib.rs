// Domain layer
pub mod domain;
pub mod operation;

// Collaborators
pub mod directory;
pub mod localization;
pub mod messaging;

// Application layer
pub mod api;
pub mod server;

// Supporting modules
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;
