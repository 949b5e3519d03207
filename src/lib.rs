//! Weather Proxy - caching proxy for the Open-Meteo weather API
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod error;
pub mod openmeteo;
pub mod routes;
pub mod services;
pub mod weather;
