//! repo-snapshot - discover a repository and print everything about it
//!
//! # Usage
//! ```bash
//! repo-snapshot snapshot /path/inside/repo --pretty  # Print one snapshot as JSON
//! repo-snapshot serve --port 3001                    # Serve snapshots over HTTP
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repo_snapshot::config::{DEFAULT_MARKER, DEFAULT_REMOTE};
use repo_snapshot::routes::{self, AppState};
use repo_snapshot::{SnapshotAggregator, SnapshotOptions};

/// Repository snapshot engine - locate a repository root and aggregate its state
#[derive(Parser)]
#[command(name = "repo-snapshot")]
#[command(about = "Locate a repository and aggregate a snapshot of it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one snapshot and print it as JSON
    Snapshot {
        /// Directory to start the search from
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        options: OptionArgs,
    },
    /// Serve snapshots at GET /api/v1/snapshot?path=
    Serve {
        /// Start path used when a request names none
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Port to run the server on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// Directory name marking a repository root
    #[arg(long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Remote whose URL is reported
    #[arg(long, default_value = DEFAULT_REMOTE)]
    remote: String,

    /// Maximum levels below PATH searched for a repository root
    #[arg(long)]
    search_depth: Option<usize>,

    /// Maximum levels below the root recorded in the topology; deeper
    /// directories fail the snapshot (`.git/refs/remotes/origin` is already 4)
    #[arg(long)]
    topology_depth: Option<usize>,

    /// Maximum commits per history
    #[arg(long)]
    max_commits: Option<usize>,
}

impl From<OptionArgs> for SnapshotOptions {
    fn from(args: OptionArgs) -> Self {
        SnapshotOptions {
            marker: args.marker,
            remote_name: args.remote,
            search_depth: args.search_depth,
            topology_depth: args.topology_depth,
            max_commits: args.max_commits,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Snapshot {
            path,
            pretty,
            options,
        } => run_snapshot(path, pretty, options.into()).await,
        Commands::Serve {
            path,
            port,
            options,
        } => run_server(path, port, options.into()).await,
    }
}

async fn run_snapshot(path: PathBuf, pretty: bool, options: SnapshotOptions) -> anyhow::Result<()> {
    let aggregator = SnapshotAggregator::local(options);

    let snapshot = match aggregator.build_snapshot(&path).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("✗ Failed to build snapshot: {}", e);
            eprintln!("  Path: {}", path.display());
            std::process::exit(1);
        }
    };

    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{}", json);
    Ok(())
}

async fn run_server(path: PathBuf, port: u16, options: SnapshotOptions) -> anyhow::Result<()> {
    let state = AppState {
        aggregator: Arc::new(SnapshotAggregator::local(options)),
        default_path: Arc::from(path.clone()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  Default path: {}", path.display());
    println!("  Server:       http://{}/api/v1/snapshot", addr);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
