//! Request/response WebSocket client

use super::types::{WsConfig, WsError};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// WebSocket client that opens [`WsSession`]s against one endpoint
#[derive(Debug, Clone)]
pub struct WsClient {
    config: WsConfig,
}

impl WsClient {
    /// Create a new WebSocket client with the given configuration
    pub fn new(config: WsConfig) -> Self {
        Self { config }
    }

    /// Create a new client with just a URL using default config
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::new(WsConfig::new(url))
    }

    /// Get the configured URL
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Open a new session. Reconnection is left to the caller.
    pub async fn connect(&self) -> Result<WsSession, WsError> {
        tracing::debug!(url = %self.config.url, "Connecting to WebSocket");

        let (stream, _response) = timeout(self.config.connect_timeout, connect_async(&self.config.url))
            .await
            .map_err(|_| WsError::Timeout(self.config.connect_timeout))?
            .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;

        tracing::info!(url = %self.config.url, "WebSocket connected");

        Ok(WsSession {
            stream,
            config: self.config.clone(),
        })
    }
}

/// One open WebSocket connection used in request/response fashion
pub struct WsSession {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    config: WsConfig,
}

impl WsSession {
    /// Send a text frame
    pub async fn send_text(&mut self, text: String) -> Result<(), WsError> {
        self.stream
            .send(Message::Text(text))
            .await
            .map_err(|e| WsError::SendFailed(e.to_string()))
    }

    /// Wait for the next text frame, answering pings on the way
    pub async fn recv_text(&mut self) -> Result<String, WsError> {
        loop {
            let next = timeout(self.config.read_timeout, self.stream.next())
                .await
                .map_err(|_| WsError::Timeout(self.config.read_timeout))?;

            match next {
                Some(Ok(Message::Text(text))) => return Ok(text),
                Some(Ok(Message::Binary(data))) => {
                    return String::from_utf8(data)
                        .map_err(|e| WsError::ReceiveFailed(e.to_string()));
                }
                Some(Ok(Message::Ping(data))) => {
                    self.stream
                        .send(Message::Pong(data))
                        .await
                        .map_err(|e| WsError::SendFailed(e.to_string()))?;
                }
                Some(Ok(Message::Close(_))) => {
                    tracing::info!("Received close frame");
                    return Err(WsError::Closed);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(WsError::ReceiveFailed(e.to_string())),
                None => return Err(WsError::Closed),
            }
        }
    }

    /// Send `text` and wait for the reply
    pub async fn request(&mut self, text: String) -> Result<String, WsError> {
        self.send_text(text).await?;
        self.recv_text().await
    }

    /// Close the connection, ignoring errors from an already-broken socket
    pub async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            tracing::debug!(error = %e, "WebSocket close failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;

    /// Loopback server that answers every text frame with `reply`
    async fn echo_server(reply: &'static str, ping_first: bool) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            while let Some(Ok(msg)) = ws.next().await {
                if msg.is_text() {
                    if ping_first {
                        ws.send(Message::Ping(vec![1, 2, 3])).await.unwrap();
                    }
                    ws.send(Message::Text(reply.to_string())).await.unwrap();
                }
            }
        });

        format!("ws://{}", addr)
    }

    #[test]
    fn test_ws_client_creation() {
        let client = WsClient::with_url("wss://example.com");
        assert_eq!(client.url(), "wss://example.com");
    }

    #[tokio::test]
    async fn test_request_reply() {
        let url = echo_server("pong", false).await;
        let mut session = WsClient::with_url(url).connect().await.unwrap();

        let reply = session.request("ping".to_string()).await.unwrap();
        assert_eq!(reply, "pong");
        session.close().await;
    }

    #[tokio::test]
    async fn test_ping_is_answered_transparently() {
        let url = echo_server("data", true).await;
        let mut session = WsClient::with_url(url).connect().await.unwrap();

        assert_eq!(session.request("q".to_string()).await.unwrap(), "data");
        assert_eq!(session.request("q".to_string()).await.unwrap(), "data");
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = WsClient::new(
            WsConfig::new(format!("ws://{}", addr)).connect_timeout(Duration::from_secs(2)),
        );
        let err = client.connect().await.err().unwrap();
        assert!(matches!(err, WsError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_read_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            // Never reply
            while ws.next().await.is_some() {}
        });

        let client = WsClient::new(
            WsConfig::new(format!("ws://{}", addr)).read_timeout(Duration::from_millis(100)),
        );
        let mut session = client.connect().await.unwrap();
        let err = session.request("hello".to_string()).await.unwrap_err();
        assert_eq!(err, WsError::Timeout(Duration::from_millis(100)));
    }
}
