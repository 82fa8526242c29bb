//! Mock backend for the Blume marketplace admin console: synthetic data,
//! an in-memory query engine and a simulated REST client.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod generators;
pub mod logging;
pub mod mock_client;
pub mod models;
pub mod platform;
pub mod query;
pub mod routes;
pub mod services;
pub mod validation;
