//! Reversi Server Binary
//!
//! Runs the HTTP server hosting live reversi sessions.
//! Supports WebSocket connections for real-time chat and game events.

#[tokio::main]
async fn main() {
    rvs_core::log();
    rvs_core::kys();
    rvs_server::run().await.unwrap();
}
