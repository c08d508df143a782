//! Traffic Light Server Binary
//!
//! Starts the HTTP server on top of the selected engine.

use std::sync::Arc;
use std::thread;

use clap::Parser;
use crossbeam::channel;
use traffic_light::{Config, EngineKind, Server};
use tracing_subscriber::{fmt, EnvFilter};

/// Traffic Light Server
#[derive(Parser, Debug)]
#[command(name = "traffic-light-server")]
#[command(about = "Three-signal traffic light exposed over HTTP")]
#[command(version)]
struct Args {
    /// Traffic light engine
    #[arg(short, long, value_enum)]
    engine: EngineKind,

    /// Port on which the network server should listen
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Full listen address (host:port), overrides --port
    #[arg(short, long)]
    listen: Option<String>,

    /// Size of the request worker pool
    #[arg(short, long, default_value = "8")]
    workers: usize,

    /// HTML document to serve on / instead of the bundled GUI
    #[arg(long)]
    gui: Option<String>,

    /// Name of pin(s) for red light (beagle-bone-black)
    #[arg(long = "red-pin", value_delimiter = ',')]
    red_pins: Vec<String>,

    /// Name of pin(s) for yellow light (beagle-bone-black)
    #[arg(long = "yellow-pin", value_delimiter = ',')]
    yellow_pins: Vec<String>,

    /// Name of pin(s) for green light (beagle-bone-black)
    #[arg(long = "green-pin", value_delimiter = ',')]
    green_pins: Vec<String>,

    /// Drive lit signals HIGH instead of LOW (beagle-bone-black)
    #[arg(long)]
    active_high: bool,

    /// Root of the sysfs tree (beagle-bone-black)
    #[arg(long, default_value = "/sys")]
    sysfs_root: String,

    /// API URI of the upstream traffic light server (remote)
    #[arg(short, long)]
    upstream: Option<String>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,traffic_light=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Traffic Light Server v{}", traffic_light::VERSION);

    // Build config from args
    let mut builder = Config::builder()
        .port(args.port)
        .worker_threads(args.workers)
        .engine(args.engine)
        .red_pins(args.red_pins)
        .yellow_pins(args.yellow_pins)
        .green_pins(args.green_pins)
        .active_low(!args.active_high)
        .sysfs_root(&args.sysfs_root);
    if let Some(listen) = args.listen {
        builder = builder.listen_addr(listen);
    }
    if let Some(upstream) = args.upstream {
        builder = builder.upstream(upstream);
    }
    let config = builder.build();

    let gui = match args.gui.as_deref().map(std::fs::read_to_string).transpose() {
        Ok(gui) => gui,
        Err(e) => {
            tracing::error!("Failed to read GUI document: {}", e);
            std::process::exit(1);
        }
    };

    // Open engine
    let engine = match config.open_engine() {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open `{}' engine: {}", config.engine, e);
            std::process::exit(1);
        }
    };

    // Install the Ctrl+C handler before anything is lit
    let (shutdown_tx, shutdown_rx) = channel::bounded(1);
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
    }) {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::process::exit(1);
    }

    // Start server
    let server = match Server::bind(&config, Arc::clone(&engine), gui) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("GUI at {}, API at {}", server.url(), server.api_url());

    let shutdown = server.shutdown_handle();
    thread::spawn(move || {
        let _ = shutdown_rx.recv();
        tracing::info!("Received Ctrl+C, initiating shutdown...");
        shutdown.shutdown();
    });

    server.wait();

    tracing::info!("Server stopped");
}
