use std::sync::Arc;

use thiserror::Error;

use crate::types::DynError;

/// Errors when registering a service definition
#[derive(Error, Debug, Clone)]
pub enum RegisterError {
    /// The alias is empty
    #[error("Service alias must not be empty")]
    InvalidAlias,
    /// A definition already exists under the alias
    #[error("A service is already registered under '{0}'")]
    AlreadyRegistered(String),
}

/// Errors when resolving a service instance
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    /// The alias is empty
    #[error("Service alias must not be empty")]
    InvalidAlias,
    /// No definition exists under the alias
    #[error("No service is registered under '{0}'")]
    NotRegistered(String),
    /// The factory for the alias returned an error
    #[error("Factory for '{alias}' failed - error: {error:?}")]
    FactoryFailed { alias: String, error: Arc<DynError> },

    #[error("Failed to downcast '{alias}', required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        alias: String,
        required_type: &'static str,
        actual_type: &'static str,
    },
}

/// Errors from the parameter store
#[derive(Error, Debug, Clone)]
pub enum ParameterError {
    /// The name is empty
    #[error("Parameter name must not be empty")]
    InvalidName,
    /// A value already exists under the name
    #[error("A parameter named '{0}' already exists")]
    AlreadyExists(String),
    /// No value exists under the name
    #[error("No parameter named '{0}' exists")]
    NotFound(String),

    #[error(
        "Failed to downcast parameter '{name}', required: '{required_type}' actual: '{actual_type}'"
    )]
    DowncastFailed {
        name: String,
        required_type: &'static str,
        actual_type: &'static str,
    },
}
