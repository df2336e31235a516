//! Tool catalog: descriptors and the store that holds them.
//!
//! The catalog is the leaf of the dispatch stack. It is populated once at
//! startup — either from the built-in Attio catalog ([`attio`]) or from a
//! JSON file named in the configuration — and shared read-only thereafter.

pub mod attio;
pub mod descriptor;
pub mod store;

pub use descriptor::{
    ExecutionParameter, HttpMethod, ParameterLocation, SecurityRequirement, ToolDescriptor,
};
pub use store::ToolCatalog;

use std::path::Path;

use crate::error::ConfigError;

/// Loads a catalog from a JSON file containing an array of descriptors.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or if
/// any descriptor fails registration (duplicate name, undeclared path
/// placeholder).
pub fn load_catalog(path: &Path) -> Result<ToolCatalog, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let descriptors: Vec<ToolDescriptor> =
        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    ToolCatalog::from_descriptors(descriptors).map_err(|e| ConfigError::ValidationError {
        message: format!("invalid tool catalog: {e}"),
    })
}
