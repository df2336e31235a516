//! The invocation dispatcher.
//!
//! Orchestrates one tool invocation through the phases
//! `RECEIVED → VALIDATING → BUILDING → EXECUTING → SUCCEEDED | FAILED`.
//! Each invocation runs its own pass through the phases with no shared
//! mutable state; the catalog is read-only, so any number of invocations
//! may be in flight concurrently.
//!
//! Every failure is returned to the caller as a structured
//! [`InvocationOutcome`]; nothing escapes as a panic or raw error. The
//! dispatcher performs exactly one attempt per invocation — retry and
//! backoff belong to the HTTP client or the caller, not here.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::catalog::descriptor::ToolDescriptor;
use crate::catalog::store::ToolCatalog;
use crate::dispatch::auth::{CredentialProvider, Credentials};
use crate::dispatch::client::HttpClient;
use crate::dispatch::request::{RequestBuilder, ResolvedRequest};
use crate::dispatch::validate::validate;
use crate::error::DispatchError;

/// A caller-supplied tool invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    /// Name of the tool to invoke.
    pub tool_name: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Value,
}

/// The discriminated result every invocation produces.
///
/// Serialises as `{ "status": "success", "result": … }` or
/// `{ "status": "error", "kind": …, "details": … }`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InvocationOutcome {
    /// The remote call succeeded; `result` is the response body.
    Success {
        /// Response body from the remote API.
        result: Value,
    },
    /// The invocation failed at some phase.
    Error {
        /// Stable error kind (see the error taxonomy).
        kind: String,
        /// Structured details for caller inspection.
        details: Value,
    },
}

impl InvocationOutcome {
    /// Whether the invocation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The error kind, when this is an error outcome.
    #[must_use]
    pub fn error_kind(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { kind, .. } => Some(kind),
        }
    }
}

impl From<DispatchError> for InvocationOutcome {
    fn from(error: DispatchError) -> Self {
        Self::Error {
            kind: error.kind().to_string(),
            details: error.details(),
        }
    }
}

/// Dispatches tool invocations: validate → build → authorise → execute.
///
/// Holds only shared, read-only collaborators, so a single dispatcher
/// serves concurrent invocations without locking.
pub struct Dispatcher {
    catalog: Arc<ToolCatalog>,
    builder: RequestBuilder,
    client: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialProvider>,
}

impl Dispatcher {
    /// Creates a dispatcher over a catalog, API base URL and collaborators.
    #[must_use]
    pub fn new(
        catalog: Arc<ToolCatalog>,
        base_url: Url,
        client: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            catalog,
            builder: RequestBuilder::new(base_url),
            client,
            credentials,
        }
    }

    /// The catalog this dispatcher serves.
    #[must_use]
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Dispatches an invocation without external cancellation.
    pub async fn dispatch(&self, request: &InvocationRequest) -> InvocationOutcome {
        self.dispatch_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Dispatches an invocation that can be cancelled mid-execution.
    ///
    /// When `cancel` fires while the remote call is pending, the client
    /// future is dropped — aborting the in-flight request — and the
    /// outcome is an error of kind `Cancelled`. The invocation never
    /// parks in the executing phase.
    pub async fn dispatch_with_cancel(
        &self,
        request: &InvocationRequest,
        cancel: &CancellationToken,
    ) -> InvocationOutcome {
        match self.run(request, cancel).await {
            Ok(result) => InvocationOutcome::Success { result },
            Err(error) => {
                debug!(
                    tool = %request.tool_name,
                    kind = error.kind(),
                    "dispatch failed"
                );
                error.into()
            }
        }
    }

    async fn run(
        &self,
        request: &InvocationRequest,
        cancel: &CancellationToken,
    ) -> Result<Value, DispatchError> {
        // RECEIVED: resolve the tool before anything else touches the
        // arguments
        let descriptor = self.catalog.lookup(&request.tool_name)?;
        debug!(tool = %descriptor.name, "invocation received");

        // VALIDATING: the full violation list is returned on rejection,
        // never a partial dispatch
        validate(&descriptor.input_schema, &request.arguments)
            .map_err(DispatchError::Validation)?;

        // BUILDING
        let mut resolved = self.builder.build(&descriptor, &request.arguments)?;

        // Security gate: no satisfiable requirement set means no network
        // call at all
        self.authorise(&descriptor, &mut resolved)?;

        // EXECUTING: race the remote call against cancellation; dropping
        // the client future aborts the in-flight request
        debug!(
            tool = %descriptor.name,
            method = %resolved.method,
            url = %redacted_url(&resolved),
            "executing"
        );
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(DispatchError::Cancelled),
            result = self.client.execute(&resolved) => {
                result.map_err(|failure| DispatchError::Transport {
                    status: failure.status,
                    message: failure.message,
                    body: None,
                })?
            }
        };

        if response.is_success() {
            Ok(response.body)
        } else {
            Err(DispatchError::Transport {
                status: Some(response.status),
                message: "Attio API returned an error status".to_string(),
                body: Some(response.body),
            })
        }
    }

    /// Checks the tool's security requirements and attaches credentials.
    ///
    /// Requirement entries are alternatives: the first set whose every
    /// scheme yields credentials granting every required scope wins, and
    /// its credentials are attached as headers. An empty requirement list
    /// marks a public tool.
    fn authorise(
        &self,
        descriptor: &ToolDescriptor,
        resolved: &mut ResolvedRequest,
    ) -> Result<(), DispatchError> {
        if descriptor.security_requirements.is_empty() {
            return Ok(());
        }

        for requirement in &descriptor.security_requirements {
            let mut satisfied: Vec<Credentials> = Vec::with_capacity(requirement.len());
            let all_met = requirement.iter().all(|(scheme, scopes)| {
                self.credentials.credentials_for(scheme).is_some_and(|c| {
                    let granted = scopes.iter().all(|scope| c.grants(scope));
                    if granted {
                        satisfied.push(c);
                    }
                    granted
                })
            });

            if all_met {
                for credentials in satisfied {
                    let (name, value) = credentials.authorization_header();
                    resolved.headers.push((name, value));
                }
                return Ok(());
            }
        }

        Err(DispatchError::InsufficientScope {
            requirements: serde_json::to_value(&descriptor.security_requirements)
                .unwrap_or_default(),
        })
    }
}

/// URL for logging with the query string stripped — query parameters may
/// carry caller data.
fn redacted_url(resolved: &ResolvedRequest) -> String {
    let mut url = resolved.url.clone();
    url.set_query(None);
    url.to_string()
}
