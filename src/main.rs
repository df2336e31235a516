//! attio-mcp-server: MCP server exposing the Attio CRM API as tools
//!
//! Turns a catalog of declarative tool descriptors into an MCP server
//! over stdio, authenticating against the Attio API with the token from
//! `ATTIO_ACCESS_TOKEN`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use attio_mcp::catalog::{self, attio};
use attio_mcp::config;
use attio_mcp::dispatch::auth::{Credentials, StaticCredentialProvider};
use attio_mcp::dispatch::client::ReqwestClient;
use attio_mcp::dispatch::dispatcher::Dispatcher;
use attio_mcp::mcp::server::McpServer;

/// Environment variable carrying the Attio API token.
const TOKEN_ENV_VAR: &str = "ATTIO_ACCESS_TOKEN";

/// MCP server exposing the Attio CRM API as tools.
///
/// Serves a catalog of Attio REST operations to AI assistants over
/// stdio, validating arguments and attaching credentials per tool.
#[derive(Parser, Debug)]
#[command(name = "attio-mcp-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Reads the Attio API token from the environment.
fn access_token() -> Result<String, String> {
    match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        Ok(_) => Err(format!("{TOKEN_ENV_VAR} is set but empty")),
        Err(_) => Err(format!("{TOKEN_ENV_VAR} environment variable is not set")),
    }
}

/// Initialises the tracing subscriber for logging.
///
/// Logs go to stderr; stdout belongs to the MCP transport.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the attio-mcp-server.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting attio-mcp-server"
    );

    // Missing token is a startup error, not a panic
    let token = match access_token() {
        Ok(token) => token,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("Set {TOKEN_ENV_VAR} to an Attio API token before starting the server.");
            return ExitCode::FAILURE;
        }
    };

    let base_url = match cfg.api_base_url() {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Catalog: a configured file overrides the built-in Attio catalog
    let catalog = match cfg.catalog_path.as_deref() {
        Some(path) => match catalog::load_catalog(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Catalog error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => match attio::builtin_catalog() {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Catalog error: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    info!(tools = catalog.len(), "Tool catalog loaded");

    let client = match ReqwestClient::new(Duration::from_secs(cfg.http.timeout_secs)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("HTTP client error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // A workspace token satisfies any scope a tool asks for; Attio
    // enforces the real grants server-side
    let credentials =
        StaticCredentialProvider::new().with(attio::OAUTH2, Credentials::bearer(token));

    let dispatcher = Dispatcher::new(
        Arc::new(catalog),
        base_url,
        Arc::new(client),
        Arc::new(credentials),
    );

    // Create MCP server
    let mut server = McpServer::new(dispatcher);

    info!("MCP server ready, waiting for client connection...");

    // Run the server
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(server.run());

    match result {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
