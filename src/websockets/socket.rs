use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::room::ConnectionId;

/// Text-frame view of a client socket. Game traffic is JSON text only.
#[async_trait]
pub trait FrameSocket: Send {
    async fn send_text(&mut self, frame: String) -> Result<(), SocketError>;

    /// Next text frame, or None once the client has gone
    async fn next_text(&mut self) -> Result<Option<String>, SocketError>;

    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Consumer of inbound text frames
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_message(&self, connection: ConnectionId, message: String);
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("Send failed: {0}")]
    SendFailed(String),
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),
}

#[async_trait]
impl FrameSocket for WebSocket {
    async fn send_text(&mut self, frame: String) -> Result<(), SocketError> {
        self.send(Message::Text(frame))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn next_text(&mut self) -> Result<Option<String>, SocketError> {
        while let Some(message) = self.next().await {
            match message {
                Ok(Message::Text(text)) => return Ok(Some(text)),
                Ok(Message::Close(_)) => return Ok(None),
                // Binary and ping/pong frames carry no game events
                Ok(_) => {}
                Err(e) => return Err(SocketError::ReceiveFailed(e.to_string())),
            }
        }
        Ok(None)
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// Why a connection loop ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The client closed the socket or the stream ended
    ClientClosed,
    /// Every outbound sender was dropped
    OutboundClosed,
}

/// One accepted client: pumps queued frames out and inbound frames to the
/// handler until either side goes away.
pub struct Connection {
    pub id: ConnectionId,
    socket: Box<dyn FrameSocket>,
    outbound: mpsc::UnboundedReceiver<String>,
    handler: Arc<dyn MessageHandler>,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        socket: Box<dyn FrameSocket>,
        outbound: mpsc::UnboundedReceiver<String>,
        handler: Arc<dyn MessageHandler>,
    ) -> Self {
        Self {
            id,
            socket,
            outbound,
            handler,
        }
    }

    /// Inbound frames are handled one at a time, so a client's events are
    /// applied in the order it sent them.
    pub async fn run(mut self) -> Result<CloseReason, SocketError> {
        let reason = loop {
            tokio::select! {
                frame = self.outbound.recv() => match frame {
                    Some(frame) => self.socket.send_text(frame).await?,
                    None => break CloseReason::OutboundClosed,
                },
                inbound = self.socket.next_text() => match inbound? {
                    Some(message) => self.handler.handle_message(self.id, message).await,
                    None => break CloseReason::ClientClosed,
                },
            }
        };

        // The peer may already be gone
        let _ = self.socket.close().await;
        Ok(reason)
    }
}
