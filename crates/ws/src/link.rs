use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use crate::config::WsConfig;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
    #[error("timed out connecting to {0}")]
    ConnectTimeout(String),
    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
}

/// One established text-message connection to the device.
///
/// Strictly sequential: a single caller alternates `recv_text` and
/// `send_text`. There is no background task and no internal buffering;
/// transport errors surface on the call that hit them.
pub struct DeviceLink {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl DeviceLink {
    pub async fn connect(cfg: &WsConfig) -> Result<Self, LinkError> {
        let attempt = connect_async(cfg.url.as_str());
        let (stream, response) = timeout(Duration::from_secs(cfg.connect_timeout_secs), attempt)
            .await
            .map_err(|_| LinkError::ConnectTimeout(cfg.url.clone()))?
            .map_err(|source| LinkError::Connect {
                url: cfg.url.clone(),
                source,
            })?;
        info!(url = %cfg.url, status = %response.status(), "websocket connected");
        Ok(Self { stream })
    }

    /// Next text message from the device, or `None` once the connection
    /// closed. Ping/pong and binary frames are skipped.
    pub async fn recv_text(&mut self) -> Result<Option<String>, LinkError> {
        while let Some(frame) = self.stream.next().await {
            match frame? {
                Message::Text(text) => return Ok(Some(text)),
                Message::Close(close) => {
                    debug!(?close, "websocket closed by device");
                    return Ok(None);
                }
                other => {
                    debug!(?other, "skipping non-text frame");
                }
            }
        }
        Ok(None)
    }

    pub async fn send_text(&mut self, text: impl Into<String>) -> Result<(), LinkError> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Best-effort graceful close.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.close(None).await {
            debug!(error = %e, "websocket close failed");
        }
    }
}
