//! Portfolio backend service.
//!
//! Two unrelated capabilities behind one HTTP API under `/api`:
//!
//! - **Contact**: validate a submission, relay it by mail when a relay is
//!   configured, and always store it as a durable backup. Relay failures are
//!   logged and never fail the request.
//! - **Status checks**: create timestamped records and list them back.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`locale`]: User-facing strings per language
//! - [`models`]: Records and request bodies
//! - [`validation`]: Field validation
//! - [`storage`]: Document store trait, MongoDB and in-memory backends
//! - [`mail`]: Mail relay trait, SMTP transport and contact notifier
//! - [`api`]: HTTP router and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod locale;
pub mod mail;
pub mod metrics;
pub mod models;
pub mod storage;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError};
