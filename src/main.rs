use tokio::net::TcpListener;
use tracing::info;

mod analysis;
mod auth;
mod catalog;
mod error;
mod network;
mod protocol;
mod session;
mod wizard;

use network::server::ClientConnection;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let addr = std::env::var("SENTIMENT_SERVER_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:9001".to_string());

    let listener = TcpListener::bind(&addr).await.expect("Failed to bind");
    info!("Sentiment server listening on ws://{}", addr);

    while let Ok((stream, peer)) = listener.accept().await {
        info!("New connection from: {}", peer);
        tokio::spawn(ClientConnection::run(stream, peer));
    }
}
