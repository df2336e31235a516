//! Error types for attio-mcp.
//!
//! # Security Note
//!
//! Error messages are carefully crafted to NEVER include credentials.
//! Failures in the security-requirement check report scheme and scope
//! names only, never token material.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors that can occur while building the tool catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A tool with the same name is already registered.
    #[error("duplicate tool name: {name}")]
    DuplicateTool {
        /// The conflicting tool name.
        name: String,
    },

    /// A tool descriptor is malformed.
    #[error("malformed descriptor for tool '{tool}': {message}")]
    Schema {
        /// Name of the offending tool.
        tool: String,
        /// Description of what's wrong.
        message: String,
    },
}

impl CatalogError {
    /// Stable caller-facing error kind for this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateTool { .. } => "DuplicateToolError",
            Self::Schema { .. } => "SchemaError",
        }
    }
}

/// A single field-level schema violation.
///
/// Violations are reported in schema declaration order so results are
/// deterministic across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path to the offending field (empty for the argument root).
    pub path: String,
    /// The rule that was violated.
    pub rule: ViolationRule,
    /// Human-readable description.
    pub message: String,
}

/// The schema rule a [`Violation`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationRule {
    /// A required field is absent.
    Required,
    /// A value does not conform to the declared type.
    Type,
    /// A value is not a member of the declared enum.
    Enum,
    /// A string does not match the declared pattern.
    Pattern,
    /// The arguments carry a field the schema does not declare.
    UnknownField,
}

/// Errors produced while dispatching a tool invocation.
///
/// These are returned to the caller as structured results, never thrown
/// past the dispatcher boundary.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The requested tool is not in the catalog.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// The requested tool name.
        name: String,
    },

    /// The caller's arguments failed schema validation.
    #[error("argument validation failed with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    /// A required path placeholder has no corresponding argument.
    #[error("missing required parameter: {name}")]
    MissingParameter {
        /// The missing parameter name.
        name: String,
    },

    /// The descriptor itself is malformed (caught at build time).
    #[error("malformed descriptor for tool '{tool}': {message}")]
    Schema {
        /// Name of the offending tool.
        tool: String,
        /// Description of what's wrong.
        message: String,
    },

    /// No security requirement set could be satisfied with the
    /// available credentials.
    #[error("no credentials satisfy the tool's security requirements")]
    InsufficientScope {
        /// The requirement sets that were tried, as scheme → scopes.
        requirements: Value,
    },

    /// The remote call failed at the transport or application level.
    #[error("transport error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Transport {
        /// HTTP status code, when the failure carried one.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
        /// Response body, when one was received.
        body: Option<Value>,
    },

    /// The invocation was cancelled while awaiting the remote call.
    #[error("invocation cancelled")]
    Cancelled,
}

impl DispatchError {
    /// Stable caller-facing error kind for this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool { .. } => "UnknownToolError",
            Self::Validation(_) => "ValidationError",
            Self::MissingParameter { .. } => "MissingParameterError",
            Self::Schema { .. } => "SchemaError",
            Self::InsufficientScope { .. } => "InsufficientScopeError",
            Self::Transport { .. } => "TransportError",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Structured details for the caller-facing error result.
    ///
    /// Transport failures preserve the original status and body here so
    /// callers can inspect them.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::UnknownTool { name } => json!({ "toolName": name }),
            Self::Validation(violations) => json!({ "violations": violations }),
            Self::MissingParameter { name } => json!({ "parameter": name }),
            Self::Schema { tool, message } => json!({ "tool": tool, "message": message }),
            Self::InsufficientScope { requirements } => {
                json!({ "securityRequirements": requirements })
            }
            Self::Transport {
                status,
                message,
                body,
            } => json!({ "status": status, "message": message, "body": body }),
            Self::Cancelled => json!({ "message": self.to_string() }),
        }
    }
}
