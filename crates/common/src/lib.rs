//! Shared utilities, configuration, and error handling for Touchline
//!
//! This crate provides common functionality used across the league services:
//! - Configuration management following 12-factor principles
//! - Error types shared by every domain
//! - Tracing bootstrap

pub mod config;
pub mod db;
pub mod error;
pub mod state;
pub mod telemetry;

pub use config::{Config, LogFormat, StoreProvider};
pub use db::RepositoryError;
pub use error::{Error, ErrorKind, Result};
pub use state::StateError;
