//! Portfolio backend entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folio_api::api::{cors_layer, create_router, AppState};
use folio_api::config::Config;
use folio_api::error::ServiceError;
use folio_api::mail::ContactNotifier;
use folio_api::metrics;
use folio_api::storage::MongoStore;
use folio_api::utils::shutdown_signal;

/// Portfolio backend: contact relay and status checks.
#[derive(Parser, Debug)]
#[command(name = "folio-api")]
#[command(about = "HTTP backend for contact submissions and status checks")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve {
        /// HTTP listen port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

fn init_tracing(verbose: bool, config: Option<&Config>) {
    let filter = if verbose {
        EnvFilter::new("folio_api=debug,tower_http=debug,info")
    } else {
        config
            .and_then(|c| EnvFilter::try_new(&c.rust_log).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    };

    let json = config.map(|c| c.log_json).unwrap_or(false);
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration drives the log format, so load it before logging starts
    let loaded = Config::load();
    init_tracing(args.verbose, loaded.as_ref().ok());

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(loaded),
        Some(Command::Serve { port }) => cmd_serve(loaded, port.or(args.port)).await,
        None => cmd_serve(loaded, args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(loaded: Result<Config, envy::Error>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("FOLIO API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match loaded {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    print!("Checking CORS origins... ");
    if let Err(e) = cors_layer(&config.cors_origin_list()) {
        println!("FAILED");
        println!("  Error: {}", e);
        return Err(anyhow::anyhow!("Invalid CORS origin"));
    }
    println!("OK");

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Database: {}", config.db_name);
    println!("  Port: {}", config.port);
    println!("  Language: {}", config.service_language);
    println!("  CORS Origins: {}", config.cors_origin_list().join(", "));
    match config.smtp() {
        Some(smtp) => {
            println!("  Mail Relay: Enabled");
            println!("  SMTP Host: {}:{}", smtp.host, smtp.port);
            println!("  Sender: {}", smtp.sender);
            println!("  Recipient: {}", smtp.recipient);
        }
        None => println!("  Mail Relay: Disabled (contact messages stored only)"),
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the HTTP API until a shutdown signal arrives.
async fn cmd_serve(
    loaded: Result<Config, envy::Error>,
    port_override: Option<u16>,
) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        ServiceError::from(e)
    })?;

    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ServiceError::InvalidConfig(e).into());
    }

    info!("Configuration loaded successfully");
    info!("Database: {}", config.db_name);
    info!("Language: {}", config.service_language);

    let metrics_handle = match metrics::init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics recorder not installed: {}", e);
            None
        }
    };

    // Database client lives for the whole serve and is closed on every exit path
    let store = Arc::new(MongoStore::connect(&config.mongo_url, &config.db_name).await?);
    let result = serve(&config, store.clone(), metrics_handle).await;
    store.close().await;

    result
}

async fn serve(
    config: &Config,
    store: Arc<MongoStore>,
    metrics_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    let mut state = AppState::new(store, config.service_language);
    if let Some(handle) = metrics_handle {
        state = state.with_metrics(handle);
    }

    match config.smtp() {
        Some(settings) => {
            let notifier = ContactNotifier::from_settings(&settings, config.service_language)
                .map_err(ServiceError::from)?;
            info!(
                host = %settings.host,
                port = settings.port,
                recipient = %settings.recipient,
                "Mail relay enabled"
            );
            state = state.with_notifier(notifier);
        }
        None => info!("Mail relay disabled; contact messages are stored only"),
    }

    let cors = cors_layer(&config.cors_origin_list())
        .map_err(|e| ServiceError::InvalidConfig(format!("invalid CORS origin: {e}")))?;
    let router = create_router(state, cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.map_err(ServiceError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServiceError::from)?;

    info!("HTTP server stopped");
    Ok(())
}
