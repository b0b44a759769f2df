//! Alerts and products for the alertdesk workspace
//!
//! The client-facing half (pagination, tolerant alert field handling, HTTP
//! clients) is used by the console; the server half is the mock upstream
//! served by the `api` binary.

pub mod alerts;
pub mod client;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repositories;
pub mod routes;
pub mod state;

pub use state::AppState;
