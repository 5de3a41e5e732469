//! Clients - HTTP Clients for External APIs
//!
//! This module contains HTTP clients for communicating with external APIs.

pub mod osrm_client;

pub use osrm_client::{OsrmClient, RoutingProvider};
