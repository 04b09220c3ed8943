//! Core module - configuration and errors
//!
//! - [`AppConfig`] - environment-driven configuration
//! - [`AppError`] - umbrella error for the command-line surface

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
