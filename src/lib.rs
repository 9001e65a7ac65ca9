//! probely-postman-env: push Postman environment variables to a Probely target
//!
//! Reads a Postman environment export, filters and normalises its entries,
//! and merges them into the custom API parameters of a target's API scan
//! settings.

pub mod cli;
pub mod config;
pub mod domain;
pub mod environment;
pub mod error;
pub mod target;

pub use error::ImportError;
