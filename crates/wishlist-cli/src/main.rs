//! Wishlist terminal client.
//!
//! Provides the `wishlist` binary. `list` prints the wishes the stub backend
//! serves; `session` opens an interactive screen driving the same
//! [`WishlistView`](wishlist_server::view::WishlistView) the HTTP server uses,
//! so both entry points share one set of form and list semantics.

mod session;

use std::process;

use clap::{Parser, Subcommand};

use wishlist_server::config::ServerConfig;
use wishlist_server::state::AppState;

/// Wishlist tools.
#[derive(Parser)]
#[command(name = "wishlist", about = "Keep a list of wishes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch the wishes and print them.
    List {
        /// Skip the simulated network latency.
        #[arg(long)]
        instant: bool,

        /// Print the wishes as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Open an interactive editing session on stdin.
    Session {
        /// Skip the simulated network latency.
        #[arg(long)]
        instant: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            process::exit(3);
        }
    };

    let exit_code = match cli.command {
        Commands::List { instant, json } => runtime.block_on(run_list(instant, json)),
        Commands::Session { instant } => runtime.block_on(run_session(instant)),
    };
    process::exit(exit_code);
}

/// Delays from the environment, or none at all with `--instant`.
///
/// Exit code 2 signals a configuration error.
fn load_config(instant: bool) -> Result<ServerConfig, i32> {
    if instant {
        return Ok(ServerConfig::instant());
    }
    ServerConfig::from_env().map_err(|e| {
        eprintln!("Error: {}", e);
        2
    })
}

/// Execute the list subcommand.
///
/// Returns exit code: 0 = success, 1 = fetch failed, 2 = bad configuration.
async fn run_list(instant: bool, json: bool) -> i32 {
    let config = match load_config(instant) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let state = AppState::unloaded(config);

    if let Err(e) = state.store.fetch().await {
        eprintln!("Error: {}", e);
        return 1;
    }
    let wishes = state.store.snapshot();

    if json {
        let out = serde_json::to_string_pretty(&wishes).unwrap_or_else(|e| {
            format!("{{\"error\": \"failed to serialize wishes: {}\"}}", e)
        });
        println!("{}", out);
    } else {
        for (i, wish) in wishes.iter().enumerate() {
            println!("{}. {}\t{}\t{}", i + 1, wish.name, wish.comment, wish.id);
        }
    }
    0
}

/// Execute the session subcommand.
///
/// Returns exit code: 0 = session ended, 2 = bad configuration, 3 = I/O error.
async fn run_session(instant: bool) -> i32 {
    let config = match load_config(instant) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let state = AppState::unloaded(config);

    match session::run(&state.view).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("I/O error: {}", e);
            3
        }
    }
}
