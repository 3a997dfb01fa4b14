//! MyLocation Core - Domain models, errors, configuration, and ports
//!
//! This crate contains the domain types and collaborator traits shared by the
//! locator, the geo helpers, and the CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{GeocodeError, LocationError, PositioningError, PositioningErrorCode, Result};
