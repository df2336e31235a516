//! Static metadata describing one callable Attio API operation.
//!
//! Descriptors are the unit the catalog stores: everything the dispatcher
//! needs to validate arguments, build the HTTP request and enforce the
//! operation's security requirements. The serde shape matches the catalog
//! format generated from the Attio OpenAPI document (camelCase keys:
//! `inputSchema`, `pathTemplate`, `executionParameters`,
//! `securityRequirements`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP method of a tool's remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET — reads; parameters default to the query string.
    Get,
    /// POST — creates; parameters default to the JSON body.
    Post,
    /// PATCH — partial updates; parameters default to the JSON body.
    Patch,
    /// PUT — upserts; parameters default to the JSON body.
    Put,
    /// DELETE — removals; parameters default to the query string.
    Delete,
}

impl HttpMethod {
    /// The canonical uppercase method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether non-path parameters default to the query string
    /// (GET/DELETE) rather than the JSON body (POST/PUT/PATCH).
    #[must_use]
    pub const fn defaults_to_query(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an input field is placed in the resolved request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Substituted into a `{placeholder}` in the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Placed in the JSON request body.
    Body,
}

/// Maps one input field to its slot in the resolved request.
///
/// Fields without an explicit entry fall back to the method default:
/// query for GET/DELETE, body for POST/PUT/PATCH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParameter {
    /// The input field name.
    pub name: String,
    /// The slot the field is pinned to.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
}

/// One alternative credential-scope set: auth scheme name → required scopes.
///
/// A tool's `security_requirements` list is an OR of these AND-sets: any
/// single entry whose every scheme is satisfied authorises the call.
/// The map is insertion-ordered so requirement checks are deterministic.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Static metadata describing one callable remote operation.
///
/// Descriptors are immutable once registered; the catalog hands out
/// shared references only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolDescriptor {
    /// Unique tool name (unique across the catalog).
    pub name: String,

    /// Human-readable description, surfaced through `tools/list`.
    pub description: String,

    /// JSON-Schema-like structure the caller's arguments are validated
    /// against before dispatch.
    pub input_schema: Value,

    /// HTTP method of the remote operation.
    pub method: HttpMethod,

    /// Path with named `{placeholder}` slots, e.g. `/v2/objects/{object}`.
    pub path_template: String,

    /// Ordered mapping of input fields to path/query/body slots.
    #[serde(default)]
    pub execution_parameters: Vec<ExecutionParameter>,

    /// Alternative credential-scope sets (OR of AND-sets). Empty means
    /// the tool is public.
    #[serde(default)]
    pub security_requirements: Vec<SecurityRequirement>,
}

impl ToolDescriptor {
    /// Returns the placeholder names in `path_template`, in order of
    /// appearance.
    #[must_use]
    pub fn path_placeholders(&self) -> Vec<&str> {
        let mut placeholders = Vec::new();
        let mut rest = self.path_template.as_str();
        while let Some(start) = rest.find('{') {
            let Some(end) = rest[start..].find('}') else {
                break;
            };
            placeholders.push(&rest[start + 1..start + end]);
            rest = &rest[start + end + 1..];
        }
        placeholders
    }

    /// Returns the field names declared under `input_schema.properties`,
    /// in declaration order.
    #[must_use]
    pub fn declared_fields(&self) -> Vec<&str> {
        self.input_schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns the explicit slot for a field, if one was declared.
    #[must_use]
    pub fn explicit_location(&self, field: &str) -> Option<ParameterLocation> {
        self.execution_parameters
            .iter()
            .find(|p| p.name == field)
            .map(|p| p.location)
    }
}
