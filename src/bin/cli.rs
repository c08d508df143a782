//! Traffic Light CLI Client
//!
//! Command-line interface for reading and setting a remote traffic light.

use clap::{Parser, Subcommand};
use traffic_light::{Client, State};
use tracing_subscriber::{fmt, EnvFilter};

/// Traffic Light CLI
#[derive(Parser, Debug)]
#[command(name = "traffic-light-cli")]
#[command(about = "CLI for a traffic light server")]
#[command(version)]
struct Args {
    /// API URI of the server
    #[arg(short, long, default_value = "http://127.0.0.1:8080/api/")]
    server: String,

    /// Request timeout in milliseconds
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the current state
    Get,

    /// Overwrite all three lights
    Set {
        /// Red light on
        #[arg(long)]
        red: bool,

        /// Yellow light on
        #[arg(long)]
        yellow: bool,

        /// Green light on
        #[arg(long)]
        green: bool,
    },

    /// Turn all lights off
    Off,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    let client = match Client::with_timeout(&args.server, std::time::Duration::from_millis(args.timeout_ms)) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Commands::Get => client.get(),
        Commands::Set { red, yellow, green } => client.set(State::new(red, yellow, green)),
        Commands::Off => client.set(State::OFF),
    };

    match result {
        Ok(state) => println!(
            "{} {{\"red\": {}, \"yellow\": {}, \"green\": {}}}",
            state,
            state.red(),
            state.yellow(),
            state.green()
        ),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}
