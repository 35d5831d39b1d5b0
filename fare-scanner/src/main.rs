use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fare_scanner::backend::{BackendClient, BackendConfig, BackendError};
use fare_scanner::cache::{CacheConfig, CachedOffers};
use fare_scanner::directory::{
    AirportDirectory, DirectoryCache, DirectoryCacheConfig, DirectoryError,
};
use fare_scanner::domain::{Airport, DateWindow, DomainError};
use fare_scanner::planner::{
    LogListener, NoopListener, ScanConfig, ScanError, ScanListener, ScanRequest, Scanner,
};
use fare_scanner::render::{render_airports, render_solutions, solutions_to_json};
use fare_scanner::web::{AppState, create_router};

/// How often the server refreshes airport names (24 hours).
const DIRECTORY_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Parser)]
#[command(name = "fare-scanner")]
#[command(about = "Find the cheapest flight itineraries between groups of airports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find itineraries between two sets of airports
    FindFlights {
        /// Comma-separated origin codes, e.g. BRE,HAM
        origins: String,

        /// Comma-separated destination codes
        destinations: String,

        /// First day of travel (YYYY-MM-DD)
        earliest: NaiveDate,

        /// Last day of travel (YYYY-MM-DD)
        latest: NaiveDate,

        /// Maximum number of flights per itinerary
        #[arg(long, default_value_t = 2)]
        max_flights: usize,

        /// Minimum layover in minutes
        #[arg(long, default_value_t = 60)]
        min_layover: i64,

        /// Maximum layover in minutes
        #[arg(long, default_value_t = 300)]
        max_layover: i64,

        /// Print solutions as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List airports whose code, name or country contains any term
    FindAirports {
        terms: Vec<String>,
    },
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::FindFlights {
            origins,
            destinations,
            earliest,
            latest,
            max_flights,
            min_layover,
            max_layover,
            json,
        } => {
            let config = ScanConfig::new(
                max_flights,
                min_layover,
                max_layover,
                ScanConfig::default().fetch_concurrency,
            );
            find_flights(&origins, &destinations, earliest, latest, &config, json).await
        }
        Commands::FindAirports { terms } => find_airports(&terms).await,
        Commands::Serve { addr } => serve(addr).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Backend settings, with URLs overridable from the environment.
fn backend_config() -> BackendConfig {
    let mut config = BackendConfig::default();
    if let Ok(url) = std::env::var("FARE_SCANNER_AIRPORTS_URL") {
        config = config.with_airports_url(url);
    }
    if let Ok(url) = std::env::var("FARE_SCANNER_AVAILABILITY_URL") {
        config = config.with_availability_url(url);
    }
    config
}

fn directory_cache() -> DirectoryCache {
    let config = match std::env::var("FARE_SCANNER_CACHE") {
        Ok(path) => DirectoryCacheConfig::new(path),
        Err(_) => DirectoryCacheConfig::default(),
    };
    DirectoryCache::new(config)
}

fn parse_airports(list: &str) -> Result<Vec<Airport>, CliError> {
    Airport::parse_list(list).map_err(|e| CliError::Domain(e.into()))
}

async fn find_flights(
    origins: &str,
    destinations: &str,
    earliest: NaiveDate,
    latest: NaiveDate,
    config: &ScanConfig,
    json: bool,
) -> Result<(), CliError> {
    let request = ScanRequest::new(
        parse_airports(origins)?,
        parse_airports(destinations)?,
        DateWindow::new(earliest, latest)?,
    );

    let client = BackendClient::new(backend_config())?;
    let source = CachedOffers::new(client, &CacheConfig::default());

    // Progress goes to stderr; keep it quiet when stdout is machine-readable
    let listener: &dyn ScanListener = if json { &NoopListener } else { &LogListener };
    let result = Scanner::new(&source, &source, config)
        .with_listener(listener)
        .scan(&request)
        .await?;

    if json {
        println!("{}", solutions_to_json(&result.solutions)?);
    } else {
        print!("{}", render_solutions(&result.solutions));
    }
    Ok(())
}

async fn find_airports(terms: &[String]) -> Result<(), CliError> {
    let client = BackendClient::new(backend_config())?;
    let directory = AirportDirectory::fetch_cached(client, directory_cache()).await?;

    print!("{}", render_airports(&directory.search(terms).await));
    Ok(())
}

async fn serve(addr: SocketAddr) -> Result<(), CliError> {
    let client = BackendClient::new(backend_config())?;

    // Fail fast if the directory is unavailable
    info!("Fetching airport directory");
    let directory = AirportDirectory::fetch_cached(client.clone(), directory_cache()).await?;
    info!(count = directory.len().await, "Loaded airport directory");

    let refresh = directory.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(DIRECTORY_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresh.refresh().await {
                Ok(count) => info!(count, "Refreshed airport directory"),
                Err(e) => warn!(error = %e, "Failed to refresh airport directory"),
            }
        }
    });

    let source = CachedOffers::new(client, &CacheConfig::default());
    let state = AppState::new(source, directory, ScanConfig::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Fare scanner listening on http://{addr}");
    info!("  GET  /health        - Health check");
    info!("  GET  /api/airports  - Search airports (?q=terms)");
    info!("  POST /api/scan      - Scan for itineraries");

    axum::serve(listener, app).await?;
    Ok(())
}
