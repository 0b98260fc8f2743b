use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use curata_api::{EngineConfig, RestApi, TasteEngine};
use curata_core::{Clock, SystemClock};
use curata_session::SessionStore;
use curata_source::{
    ArticSource, CachedSource, CandidateSource, MemoryProfileStore, ProfileStore, SyntheticSource,
};

/// An active taste-preference engine for art recommendation
#[derive(Parser, Debug)]
#[command(name = "curata")]
#[command(about = "Elicit taste through pairwise choices, rank art to match", long_about = None)]
struct Args {
    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Serve the deterministic synthetic pool instead of the live catalog
    #[arg(long)]
    offline: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting curata v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP API port: {}", args.http_port);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = SessionStore::new(clock.clone());
    let source: Arc<dyn CandidateSource> = if args.offline {
        info!("Offline mode: serving the synthetic candidate pool");
        Arc::new(SyntheticSource::new())
    } else {
        Arc::new(CachedSource::new(ArticSource::new(), clock.clone()))
    };
    let profiles: Arc<dyn ProfileStore> = Arc::new(MemoryProfileStore::new());

    let engine = Arc::new(TasteEngine::new(
        store,
        source,
        profiles,
        clock,
        EngineConfig::default(),
    ));
    info!("Engine initialized");

    let engine_http = engine.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(engine_http, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("curata started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
