//! WebSocket server streaming battle snapshots to browsers.

use crate::combat::progress::ProgressSink;
use crate::combat::snapshot::BattleSnapshot;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Channel carrying serialized snapshots to every viewer
pub type SnapshotSender = broadcast::Sender<String>;

const SNAPSHOT_BUFFER: usize = 100;

pub struct WebServer {
    pub snapshot_tx: SnapshotSender,
}

impl WebServer {
    pub fn new() -> Self {
        let (snapshot_tx, _) = broadcast::channel(SNAPSHOT_BUFFER);
        Self { snapshot_tx }
    }

    /// A progress sink feeding this server's viewers.
    pub fn sink(&self) -> BroadcastSink {
        BroadcastSink {
            tx: self.snapshot_tx.clone(),
        }
    }
}

impl Default for WebServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Publishes snapshots as JSON. Having no viewers is not an error.
pub struct BroadcastSink {
    tx: SnapshotSender,
}

#[async_trait]
impl ProgressSink for BroadcastSink {
    async fn emit(&mut self, snapshot: BattleSnapshot) {
        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                let _ = self.tx.send(json);
            }
            Err(err) => warn!(error = %err, "snapshot not serializable"),
        }
    }
}

/// Start the web server on the given port
pub async fn start_web_server(port: u16, server: Arc<WebServer>) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(port, "web server listening");

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, addr, server).await {
                        warn!(%addr, error = %e, "connection error");
                    }
                });
            }
            Err(e) => warn!(error = %e, "accept error"),
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    server: Arc<WebServer>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut peek_buf = [0u8; 256];
    let n = stream.peek(&mut peek_buf).await?;
    let request = String::from_utf8_lossy(&peek_buf[..n]);
    if request.starts_with("GET / ") && !request.contains("Upgrade: websocket") {
        serve_html(stream).await?;
        return Ok(());
    }

    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    let viewer = Uuid::new_v4();
    info!(%viewer, %addr, "viewer connected");

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let mut snapshot_rx = server.snapshot_tx.subscribe();

    let send_task = tokio::spawn(async move {
        loop {
            match snapshot_rx.recv().await {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(%viewer, skipped, "viewer lagging");
                }
            }
        }
    });

    // Viewers never send commands; drain until they leave
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    info!(%viewer, "viewer disconnected");
    Ok(())
}

async fn serve_html(mut stream: TcpStream) -> std::io::Result<()> {
    let html = include_str!("../../web/index.html");
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        html.len(),
        html
    );
    stream.write_all(response.as_bytes()).await
}
