//! Schema validation for tool arguments.
//!
//! Validates a caller-supplied argument object against a tool's declared
//! input schema before any request is built. The checks cover required
//! fields, type conformance (string/number/integer/boolean/object/array),
//! `enum` membership and `pattern` constraints.
//!
//! # Strict mode
//!
//! Argument fields not declared in the schema are rejected. This diverges
//! from the permissive JSON-Schema default deliberately: a typoed
//! parameter name must fail here, not silently reach the Attio API.
//!
//! # Determinism
//!
//! Violations are reported in schema declaration order (`serde_json` is
//! built with `preserve_order`), then unknown fields in argument order,
//! so results are identical across runs.

use regex::Regex;
use serde_json::Value;

use crate::error::{Violation, ViolationRule};

/// Validates `arguments` against `schema`.
///
/// # Errors
///
/// Returns the ordered list of violations when validation fails.
pub fn validate(schema: &Value, arguments: &Value) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();
    check_object(String::new(), schema, arguments, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Joins a parent path and a field name into a dotted path.
fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

/// Checks an object node: required fields, declared properties, then
/// unknown fields.
fn check_object(path: String, schema: &Value, value: &Value, out: &mut Vec<Violation>) {
    let Some(object) = value.as_object() else {
        out.push(Violation {
            path,
            rule: ViolationRule::Type,
            message: format!("expected object, got {}", type_name(value)),
        });
        return;
    };

    let properties = schema.get("properties").and_then(Value::as_object);
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    if let Some(properties) = properties {
        // Declaration order drives evaluation order
        for (field, field_schema) in properties {
            let field_path = join(&path, field);
            match object.get(field) {
                Some(field_value) => check_node(field_path, field_schema, field_value, out),
                None if required.contains(&field.as_str()) => out.push(Violation {
                    path: field_path,
                    rule: ViolationRule::Required,
                    message: format!("required field '{field}' is missing"),
                }),
                None => {}
            }
        }

        for field in object.keys() {
            if !properties.contains_key(field) {
                out.push(Violation {
                    path: join(&path, field),
                    rule: ViolationRule::UnknownField,
                    message: format!("field '{field}' is not declared in the schema"),
                });
            }
        }
    } else if !object.is_empty() {
        // No properties declared at all: strict mode rejects everything
        for field in object.keys() {
            out.push(Violation {
                path: join(&path, field),
                rule: ViolationRule::UnknownField,
                message: format!("field '{field}' is not declared in the schema"),
            });
        }
    }
}

/// Checks a single schema node against a value.
fn check_node(path: String, schema: &Value, value: &Value, out: &mut Vec<Violation>) {
    if let Some(declared_type) = schema.get("type").and_then(Value::as_str) {
        if !type_matches(declared_type, value) {
            out.push(Violation {
                path,
                rule: ViolationRule::Type,
                message: format!("expected {declared_type}, got {}", type_name(value)),
            });
            // A type mismatch makes the remaining node checks meaningless
            return;
        }

        match declared_type {
            "object" => {
                // Nested violations carry their own paths
                check_object(path, schema, value, out);
                return;
            }
            "array" => {
                if let (Some(items), Some(elements)) = (schema.get("items"), value.as_array()) {
                    for (index, element) in elements.iter().enumerate() {
                        check_node(format!("{path}[{index}]"), items, element, out);
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            out.push(Violation {
                path: path.clone(),
                rule: ViolationRule::Enum,
                message: format!("value is not one of the {} allowed values", allowed.len()),
            });
        }
    }

    if let (Some(pattern), Some(text)) = (
        schema.get("pattern").and_then(Value::as_str),
        value.as_str(),
    ) {
        match Regex::new(pattern) {
            Ok(regex) => {
                if !regex.is_match(text) {
                    out.push(Violation {
                        path,
                        rule: ViolationRule::Pattern,
                        message: format!("value does not match pattern '{pattern}'"),
                    });
                }
            }
            Err(_) => out.push(Violation {
                path,
                rule: ViolationRule::Pattern,
                message: format!("schema pattern '{pattern}' is not a valid regex"),
            }),
        }
    }
}

/// Whether `value` conforms to a JSON-Schema primitive type name.
fn type_matches(declared: &str, value: &Value) -> bool {
    match declared {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        // Unknown type names never match; the violation points at the value
        _ => false,
    }
}

/// Human-readable JSON type name for messages.
const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "object": { "type": "string" },
                "record_id": { "type": "string" },
                "limit": { "type": "integer" },
                "data": { "type": "object" }
            },
            "required": ["object", "record_id"]
        })
    }

    #[test]
    fn valid_arguments_pass() {
        let args = json!({ "object": "people", "record_id": "abc", "limit": 10 });
        assert!(validate(&record_schema(), &args).is_ok());
    }

    #[test]
    fn missing_required_field_is_reported() {
        let args = json!({ "object": "people" });
        let violations = validate(&record_schema(), &args).unwrap_err();
        assert!(violations
            .iter()
            .any(|v| v.path == "record_id" && v.rule == ViolationRule::Required));
    }

    #[test]
    fn violations_follow_declaration_order() {
        // Both required fields missing plus a type error on limit: the
        // report order must follow the schema, not the argument object.
        let args = json!({ "limit": "ten" });
        let violations = validate(&record_schema(), &args).unwrap_err();
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["object", "record_id", "limit"]);
        assert_eq!(violations[2].rule, ViolationRule::Type);
    }

    #[test]
    fn unknown_fields_rejected_in_strict_mode() {
        // Strict mode: undeclared fields are rejected rather than ignored,
        // diverging from the permissive JSON-Schema default.
        let args = json!({ "object": "people", "record_id": "abc", "recrod_id": "typo" });
        let violations = validate(&record_schema(), &args).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, ViolationRule::UnknownField);
        assert_eq!(violations[0].path, "recrod_id");
    }

    #[test]
    fn empty_schema_rejects_any_argument() {
        let schema = json!({ "type": "object", "properties": {} });
        let violations = validate(&schema, &json!({ "anything": 1 })).unwrap_err();
        assert_eq!(violations[0].rule, ViolationRule::UnknownField);
        assert!(validate(&schema, &json!({})).is_ok());
    }

    #[test]
    fn non_object_arguments_rejected_at_root() {
        let violations = validate(&record_schema(), &json!("not an object")).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "");
        assert_eq!(violations[0].rule, ViolationRule::Type);
    }

    #[test]
    fn integer_type_rejects_fractions() {
        let schema = json!({
            "type": "object",
            "properties": { "limit": { "type": "integer" } }
        });
        assert!(validate(&schema, &json!({ "limit": 5 })).is_ok());
        let violations = validate(&schema, &json!({ "limit": 5.5 })).unwrap_err();
        assert_eq!(violations[0].rule, ViolationRule::Type);
    }

    #[test]
    fn enum_constraint_enforced() {
        let schema = json!({
            "type": "object",
            "properties": {
                "direction": { "type": "string", "enum": ["asc", "desc"] }
            }
        });
        assert!(validate(&schema, &json!({ "direction": "asc" })).is_ok());
        let violations = validate(&schema, &json!({ "direction": "sideways" })).unwrap_err();
        assert_eq!(violations[0].rule, ViolationRule::Enum);
    }

    #[test]
    fn pattern_constraint_enforced() {
        let schema = json!({
            "type": "object",
            "properties": {
                "api_slug": { "type": "string", "pattern": "^[a-z0-9_]+$" }
            }
        });
        assert!(validate(&schema, &json!({ "api_slug": "my_object" })).is_ok());
        let violations = validate(&schema, &json!({ "api_slug": "My Object" })).unwrap_err();
        assert_eq!(violations[0].rule, ViolationRule::Pattern);
    }

    #[test]
    fn nested_object_violations_use_dotted_paths() {
        let schema = json!({
            "type": "object",
            "properties": {
                "data": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" }
                    },
                    "required": ["name"]
                }
            },
            "required": ["data"]
        });
        let violations = validate(&schema, &json!({ "data": {} })).unwrap_err();
        assert_eq!(violations[0].path, "data.name");
        assert_eq!(violations[0].rule, ViolationRule::Required);
    }

    #[test]
    fn array_items_checked_with_indexed_paths() {
        let schema = json!({
            "type": "object",
            "properties": {
                "sorts": { "type": "array", "items": { "type": "object" } }
            }
        });
        let violations =
            validate(&schema, &json!({ "sorts": [{}, "not an object"] })).unwrap_err();
        assert_eq!(violations[0].path, "sorts[1]");
        assert_eq!(violations[0].rule, ViolationRule::Type);
    }
}
