pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod telemetry;
pub mod utils;
