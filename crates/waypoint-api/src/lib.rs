//! Waypoint-api: HTTP API layer for Waypoint
//!
//! Owns the current routing graph and exposes graph maintenance and route
//! queries as JSON endpoints.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::AppState;
