//! Configuration module for cryptkit
//!
//! Validation limits and key-derivation cost, loaded from an optional JSON
//! settings file.

pub mod settings;

pub use settings::{Settings, ValidationLimits};
