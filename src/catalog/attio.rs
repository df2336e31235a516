//! Built-in catalog of Attio v2 API operations.
//!
//! A curated subset of the Attio OpenAPI surface: object configuration,
//! record CRUD and list discovery. Tool names follow the generated
//! convention of method + path with separators squashed (`getv2objects`
//! is `GET /v2/objects`).
//!
//! The catalog here is the default; an alternative catalog can be loaded
//! from a JSON file via the `catalog_path` configuration field.

use serde_json::{json, Value};

use crate::catalog::descriptor::{
    ExecutionParameter, HttpMethod, ParameterLocation, SecurityRequirement, ToolDescriptor,
};
use crate::catalog::store::ToolCatalog;
use crate::error::CatalogError;

/// OAuth scheme name used across the Attio catalog.
pub const OAUTH2: &str = "oauth2";

/// Builds one OR-alternative requiring the given oauth2 scopes.
fn oauth2_scopes(scopes: &[&str]) -> SecurityRequirement {
    let mut requirement = SecurityRequirement::new();
    requirement.insert(
        OAUTH2.to_string(),
        scopes.iter().map(ToString::to_string).collect(),
    );
    requirement
}

fn tool(
    name: &str,
    description: &str,
    method: HttpMethod,
    path_template: &str,
    input_schema: Value,
    security: Vec<SecurityRequirement>,
) -> ToolDescriptor {
    ToolDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
        method,
        path_template: path_template.to_string(),
        execution_parameters: vec![],
        security_requirements: security,
    }
}

/// Builds the default Attio tool catalog.
///
/// # Errors
///
/// Returns a [`CatalogError`] if a built-in descriptor is malformed; this
/// indicates a programming error and is covered by tests.
#[allow(clippy::too_many_lines)]
pub fn builtin_catalog() -> Result<ToolCatalog, CatalogError> {
    let mut descriptors = vec![
        // === Object configuration ===
        tool(
            "getv2objects",
            "Lists all objects",
            HttpMethod::Get,
            "/v2/objects",
            json!({ "type": "object", "properties": {} }),
            vec![oauth2_scopes(&["object_configuration:read"])],
        ),
        tool(
            "getv2objectsobject",
            "Gets a single object by slug or ID",
            HttpMethod::Get,
            "/v2/objects/{object}",
            json!({
                "type": "object",
                "properties": {
                    "object": {
                        "type": "string",
                        "description": "Object slug or ID, e.g. 'people'"
                    }
                },
                "required": ["object"]
            }),
            vec![oauth2_scopes(&["object_configuration:read"])],
        ),
        tool(
            "postv2objects",
            "Creates a new custom object",
            HttpMethod::Post,
            "/v2/objects",
            json!({
                "type": "object",
                "properties": {
                    "api_slug": {
                        "type": "string",
                        "pattern": "^[a-z0-9_]+$",
                        "description": "Unique snake_case slug for the object"
                    },
                    "singular_noun": { "type": "string" },
                    "plural_noun": { "type": "string" }
                },
                "required": ["api_slug", "singular_noun", "plural_noun"]
            }),
            vec![oauth2_scopes(&["object_configuration:read-write"])],
        ),
        tool(
            "patchv2objectsobject",
            "Updates an existing object",
            HttpMethod::Patch,
            "/v2/objects/{object}",
            json!({
                "type": "object",
                "properties": {
                    "object": { "type": "string" },
                    "api_slug": { "type": "string", "pattern": "^[a-z0-9_]+$" },
                    "singular_noun": { "type": "string" },
                    "plural_noun": { "type": "string" }
                },
                "required": ["object"]
            }),
            vec![oauth2_scopes(&["object_configuration:read-write"])],
        ),
        // === Records ===
        tool(
            "postv2objectsobjectrecordsquery",
            "Queries records of an object with filters and sorts",
            HttpMethod::Post,
            "/v2/objects/{object}/records/query",
            json!({
                "type": "object",
                "properties": {
                    "object": { "type": "string" },
                    "filter": { "type": "object" },
                    "sorts": { "type": "array", "items": { "type": "object" } },
                    "limit": { "type": "integer" },
                    "offset": { "type": "integer" }
                },
                "required": ["object"]
            }),
            vec![oauth2_scopes(&[
                "record_permission:read",
                "object_configuration:read",
            ])],
        ),
        tool(
            "getv2objectsobjectrecordsrecord_id",
            "Gets a single record by ID",
            HttpMethod::Get,
            "/v2/objects/{object}/records/{record_id}",
            json!({
                "type": "object",
                "properties": {
                    "object": { "type": "string" },
                    "record_id": { "type": "string" }
                },
                "required": ["object", "record_id"]
            }),
            vec![oauth2_scopes(&[
                "record_permission:read",
                "object_configuration:read",
            ])],
        ),
        tool(
            "postv2objectsobjectrecords",
            "Creates a new record",
            HttpMethod::Post,
            "/v2/objects/{object}/records",
            json!({
                "type": "object",
                "properties": {
                    "object": { "type": "string" },
                    "data": { "type": "object" }
                },
                "required": ["object", "data"]
            }),
            vec![oauth2_scopes(&[
                "record_permission:read-write",
                "object_configuration:read",
            ])],
        ),
        tool(
            "deletev2objectsobjectrecordsrecord_id",
            "Deletes a record by ID",
            HttpMethod::Delete,
            "/v2/objects/{object}/records/{record_id}",
            json!({
                "type": "object",
                "properties": {
                    "object": { "type": "string" },
                    "record_id": { "type": "string" }
                },
                "required": ["object", "record_id"]
            }),
            vec![oauth2_scopes(&[
                "record_permission:read-write",
                "object_configuration:read",
            ])],
        ),
        // === Lists ===
        tool(
            "getv2lists",
            "Lists all lists in the workspace",
            HttpMethod::Get,
            "/v2/lists",
            json!({ "type": "object", "properties": {} }),
            vec![oauth2_scopes(&["list_configuration:read"])],
        ),
        tool(
            "getv2listslist",
            "Gets a single list by slug or ID",
            HttpMethod::Get,
            "/v2/lists/{list}",
            json!({
                "type": "object",
                "properties": {
                    "list": { "type": "string" }
                },
                "required": ["list"]
            }),
            vec![oauth2_scopes(&["list_configuration:read"])],
        ),
        // === Workspace ===
        tool(
            "getv2self",
            "Identifies the workspace and token the server is acting as",
            HttpMethod::Get,
            "/v2/self",
            json!({ "type": "object", "properties": {} }),
            // Any authenticated token may introspect itself
            vec![oauth2_scopes(&[])],
        ),
    ];

    // The assert-record operation pins `matching_attribute` to the query
    // string even though PUT parameters default to the body.
    let mut assert_record = tool(
        "putv2objectsobjectrecords",
        "Asserts (creates or updates) a record matched by an attribute",
        HttpMethod::Put,
        "/v2/objects/{object}/records",
        json!({
            "type": "object",
            "properties": {
                "object": { "type": "string" },
                "matching_attribute": { "type": "string" },
                "data": { "type": "object" }
            },
            "required": ["object", "matching_attribute", "data"]
        }),
        vec![oauth2_scopes(&[
            "record_permission:read-write",
            "object_configuration:read",
        ])],
    );
    assert_record.execution_parameters = vec![ExecutionParameter {
        name: "matching_attribute".to_string(),
        location: ParameterLocation::Query,
    }];
    descriptors.push(assert_record);

    ToolCatalog::from_descriptors(descriptors)
}
