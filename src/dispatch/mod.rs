//! Tool-dispatch core: validation, request building and execution.
//!
//! One invocation flows through this module as
//! `validate` → [`request::RequestBuilder`] → security gate →
//! [`client::HttpClient`], orchestrated by the
//! [`dispatcher::Dispatcher`]. All failures come back as structured
//! outcomes; see `crate::error` for the taxonomy.

pub mod auth;
pub mod client;
pub mod dispatcher;
pub mod request;
pub mod validate;

pub use auth::{CredentialProvider, Credentials, StaticCredentialProvider};
pub use client::{HttpClient, HttpResponse, ReqwestClient, TransportFailure};
pub use dispatcher::{Dispatcher, InvocationOutcome, InvocationRequest};
pub use request::{RequestBuilder, ResolvedRequest};
pub use validate::validate;
