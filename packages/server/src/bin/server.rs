//! Collaborative study room server.
//!
//! Serves the room HTTP API and the room WebSocket gateway
//! (`/ws/rooms/{room_id}`).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin pomoroom-server
//! cargo run --bin pomoroom-server -- --host 0.0.0.0 --port 3000
//! ```

use std::time::Duration;

use clap::Parser;

use pomoroom_server::{
    config::ServerSettings,
    ui::{AppState, Server},
};
use pomoroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "pomoroom-server")]
#[command(about = "Collaborative study room server with a shared focus/break timer", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8000")]
    port: u16,

    /// Timer tick period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    tick_millis: u64,

    /// Upper bound for enqueueing one outbound message, in milliseconds
    #[arg(long, default_value = "2000", value_parser = clap::value_parser!(u64).range(1..))]
    send_timeout_millis: u64,

    /// Outbound queue depth per connection
    #[arg(long, default_value = "64", value_parser = clap::value_parser!(u64).range(1..))]
    outbound_buffer: u64,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_CRATE_NAME"), env!("CARGO_BIN_NAME"), &args.log_level);

    let settings = ServerSettings {
        tick_interval: Duration::from_millis(args.tick_millis),
        send_timeout: Duration::from_millis(args.send_timeout_millis),
        outbound_buffer: args.outbound_buffer as usize,
    };
    tracing::debug!("Server settings: {:?}", settings);

    let server = Server::new(AppState::in_memory(&settings));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
