//! Error types for the Commission Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The calculation core itself never fails on malformed business data (it
//! degrades to zero or empty results); these errors cover configuration
//! loading and the validation done at the service boundary.

use thiserror::Error;

/// The main error type for the Commission Engine.
///
/// # Example
///
/// ```
/// use commission_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/roles.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/roles.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A role in the catalog breaks one of the role invariants.
    #[error("Invalid role '{role}': {message}")]
    InvalidRole {
        /// The tier id of the offending role.
        role: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// The requested tier is not present in the role catalog.
    #[error("Role not found: {role}")]
    RoleNotFound {
        /// The tier id that was not found.
        role: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A request field outside the employee snapshot was invalid.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
