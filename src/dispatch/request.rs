//! Request building: descriptor + arguments → concrete HTTP request.
//!
//! Resolves a tool's path template and execution parameters into a
//! [`ResolvedRequest`] ready for the HTTP client. Path values are
//! percent-encoded independently through the `url` crate's segment API,
//! which escapes `/`, `%` and dot-segments — a substituted value can
//! never alter the template's literal path structure.

use serde_json::{Map, Value};
use url::Url;

use crate::catalog::descriptor::{ParameterLocation, ToolDescriptor};
use crate::error::DispatchError;

/// A concrete, ready-to-send HTTP request.
///
/// Owned solely by the dispatcher during one invocation; credentials are
/// attached as headers just before execution.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    /// HTTP method.
    pub method: crate::catalog::descriptor::HttpMethod,
    /// Fully resolved URL including query string.
    pub url: Url,
    /// Request headers (name, value).
    pub headers: Vec<(String, String)>,
    /// JSON request body, when the method carries one.
    pub body: Option<Value>,
}

/// Builds [`ResolvedRequest`]s against a fixed API base URL.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
}

impl RequestBuilder {
    /// Creates a builder for the given base URL.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Resolves a descriptor and validated arguments into a request.
    ///
    /// Path placeholders are substituted from the arguments; remaining
    /// declared parameters go to the query string for GET/DELETE and to
    /// the JSON body otherwise, unless an execution parameter pins them
    /// explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingParameter`] when a path placeholder
    /// has no corresponding argument, or [`DispatchError::Schema`] when
    /// the descriptor cannot be resolved against the base URL.
    pub fn build(
        &self,
        descriptor: &ToolDescriptor,
        arguments: &Value,
    ) -> Result<ResolvedRequest, DispatchError> {
        let empty = Map::new();
        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return Err(DispatchError::Schema {
                    tool: descriptor.name.clone(),
                    message: "arguments must be a JSON object".to_string(),
                })
            }
        };

        let placeholders = descriptor.path_placeholders();
        let mut url = self.resolve_path(descriptor, arguments)?;

        let mut body = Map::new();
        for field in descriptor.declared_fields() {
            if placeholders.contains(&field) {
                continue;
            }
            let Some(value) = arguments.get(field) else {
                continue;
            };

            let location = descriptor
                .explicit_location(field)
                .unwrap_or(if descriptor.method.defaults_to_query() {
                    ParameterLocation::Query
                } else {
                    ParameterLocation::Body
                });

            match location {
                // A field pinned to the path but absent from the template
                // has nowhere to go; treat it as a body parameter would be
                // silent corruption, so reject the descriptor.
                ParameterLocation::Path => {
                    return Err(DispatchError::Schema {
                        tool: descriptor.name.clone(),
                        message: format!(
                            "parameter '{field}' is pinned to the path but '{}' has no such placeholder",
                            descriptor.path_template
                        ),
                    })
                }
                ParameterLocation::Query => {
                    url.query_pairs_mut().append_pair(field, &render(value));
                }
                ParameterLocation::Body => {
                    body.insert(field.to_string(), value.clone());
                }
            }
        }

        Ok(ResolvedRequest {
            method: descriptor.method,
            url,
            headers: Vec::new(),
            body: if body.is_empty() {
                None
            } else {
                Some(Value::Object(body))
            },
        })
    }

    /// Substitutes placeholders into the path template and appends the
    /// resulting segments to the base URL.
    fn resolve_path(
        &self,
        descriptor: &ToolDescriptor,
        arguments: &Map<String, Value>,
    ) -> Result<Url, DispatchError> {
        let mut url = self.base_url.clone();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| DispatchError::Schema {
                    tool: descriptor.name.clone(),
                    message: "base URL cannot carry a path".to_string(),
                })?;
            segments.pop_if_empty();

            for raw_segment in descriptor
                .path_template
                .split('/')
                .filter(|s| !s.is_empty())
            {
                let mut segment = String::new();
                let mut rest = raw_segment;
                while let Some(start) = rest.find('{') {
                    let Some(end) = rest[start..].find('}') else {
                        break;
                    };
                    segment.push_str(&rest[..start]);
                    let name = &rest[start + 1..start + end];
                    let value =
                        arguments
                            .get(name)
                            .ok_or_else(|| DispatchError::MissingParameter {
                                name: name.to_string(),
                            })?;
                    segment.push_str(&render(value));
                    rest = &rest[start + end + 1..];
                }
                segment.push_str(rest);

                // push() percent-encodes the whole segment, including any
                // '/', '%' or dot-segment a substituted value smuggled in
                segments.push(&segment);
            }
        }

        Ok(url)
    }
}

/// Renders an argument value for a path or query slot.
///
/// Scalars render naturally; compound values render as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
