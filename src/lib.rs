//! src/lib.rs
// make public to other binaries (main, test)
pub mod cli;
pub mod configuration;
pub mod error;
pub mod error_handlers;
pub mod models;
pub mod routes;
pub mod security_headers;
pub mod startup;
pub mod telemetry;
