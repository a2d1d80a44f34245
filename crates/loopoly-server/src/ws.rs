//! WebSocket listener and connection wrapper built on `tokio-tungstenite`.

use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use loopoly_protocol::PlayerId;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

/// Counter for assigning player identities at accept time.
static NEXT_PLAYER_ID: AtomicU64 = AtomicU64::new(1);

type WsStream = WebSocketStream<TcpStream>;

/// Errors from the WebSocket layer.
#[derive(Debug, thiserror::Error)]
pub enum WsError {
    /// Binding the listen address failed.
    #[error("bind failed: {0}")]
    Bind(#[source] std::io::Error),

    /// Accepting or upgrading an incoming connection failed.
    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),

    /// Sending a frame failed.
    #[error("send failed: {0}")]
    Send(#[source] std::io::Error),

    /// Receiving a frame failed.
    #[error("receive failed: {0}")]
    Receive(#[source] std::io::Error),
}

fn io_err(kind: std::io::ErrorKind, e: impl std::error::Error + Send + Sync + 'static) -> std::io::Error {
    std::io::Error::new(kind, e)
}

/// Listens for incoming WebSocket connections.
pub struct WsListener {
    listener: TcpListener,
}

impl WsListener {
    /// Binds the listener to the given address.
    pub async fn bind(addr: &str) -> Result<Self, WsError> {
        let listener = TcpListener::bind(addr).await.map_err(WsError::Bind)?;
        tracing::info!(addr, "listening for WebSocket connections");
        Ok(Self { listener })
    }

    /// Returns the bound local address.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts and upgrades the next connection, assigning it a fresh
    /// player identity.
    pub async fn accept(&self) -> Result<WsConnection, WsError> {
        let (stream, addr) = self.listener.accept().await.map_err(WsError::Accept)?;

        let ws = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| WsError::Accept(io_err(std::io::ErrorKind::ConnectionRefused, e)))?;

        let player_id = PlayerId(NEXT_PLAYER_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%player_id, %addr, "accepted WebSocket connection");

        let (sink, stream) = ws.split();
        Ok(WsConnection {
            player_id,
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
        })
    }
}

/// A single WebSocket connection.
///
/// Sink and stream halves live behind separate locks, so the writer
/// task can push events while the read loop is parked in `recv`.
pub struct WsConnection {
    player_id: PlayerId,
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
}

impl WsConnection {
    /// The player identity assigned to this connection at accept.
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Sends one encoded frame.
    pub async fn send(&self, data: &[u8]) -> Result<(), WsError> {
        let msg = Message::Binary(data.to_vec().into());
        self.sink
            .lock()
            .await
            .send(msg)
            .await
            .map_err(|e| WsError::Send(io_err(std::io::ErrorKind::BrokenPipe, e)))
    }

    /// Receives the next data frame. Returns `None` once the peer is gone.
    pub async fn recv(&self) -> Result<Option<Vec<u8>>, WsError> {
        loop {
            let msg = self.stream.lock().await.next().await;
            match msg {
                Some(Ok(Message::Binary(data))) => return Ok(Some(data.into())),
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // skip ping/pong/frame
                Some(Err(e)) => {
                    return Err(WsError::Receive(io_err(
                        std::io::ErrorKind::ConnectionReset,
                        e,
                    )));
                }
            }
        }
    }

    /// Closes the connection gracefully.
    pub async fn close(&self) -> Result<(), WsError> {
        self.sink
            .lock()
            .await
            .close()
            .await
            .map_err(|e| WsError::Send(io_err(std::io::ErrorKind::BrokenPipe, e)))
    }
}
