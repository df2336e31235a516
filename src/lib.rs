//! attio-mcp: MCP server exposing the Attio CRM API as tools
//!
//! This library turns a catalog of declarative tool descriptors into a
//! Model Context Protocol server. Each descriptor names an Attio REST
//! operation, carries a JSON Schema for its arguments, and states the
//! credentials it needs; the dispatcher validates, builds, and executes
//! the HTTP request for every tool call.
//!
//! # Architecture
//!
//! A tool call flows through four stages:
//!
//! - **Lookup**: the [`catalog`] resolves the tool name to a descriptor
//! - **Validation**: arguments are checked against the descriptor's schema
//! - **Building**: path placeholders, query parameters, and the request
//!   body are assembled into a concrete HTTP request
//! - **Execution**: the request is authorised and sent to the Attio API
//!
//! Every stage failure is reported to the caller as a structured outcome
//! with a stable error kind, never as a protocol-level fault.
//!
//! # Modules
//!
//! - [`catalog`] — Tool descriptors and the descriptor store
//! - [`config`] — Configuration loading and validation
//! - [`dispatch`] — Validation, request building, and execution
//! - [`error`] — Error types
//! - [`mcp`] — MCP protocol implementation

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod mcp;
