//! [`DictionaryLookup`] backed by a public dictionary HTTP API.
//!
//! One request per word:
//!
//! ```text
//! GET {base_url}/{url-encoded word}
//!   2xx  → a word
//!   404  → not a word
//!   else → DictionaryError::UnexpectedStatus
//! ```
//!
//! Timeouts and connection failures become [`DictionaryError::Transport`].
//! The response body is never read.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use stairword_core::{DictionaryError, DictionaryLookup};

pub struct HttpDictionary {
    client: Client,
    base_url: String,
}

impl HttpDictionary {
    /// Creates a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// [`DictionaryError::Transport`] if the HTTP client cannot be built
    /// (for example, no TLS backend is available).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DictionaryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DictionaryError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn word_url(&self, word: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(word))
    }
}

#[async_trait]
impl DictionaryLookup for HttpDictionary {
    async fn is_word(&self, word: &str) -> Result<bool, DictionaryError> {
        let url = self.word_url(word);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DictionaryError::Transport(e.to_string()))?;

        let status = resp.status();
        debug!("GET {url} -> {status}");
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(DictionaryError::UnexpectedStatus(status.as_u16()))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves one canned HTTP response and reports the request line it saw.
    async fn serve_once(status_line: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let request = String::from_utf8_lossy(&buf);
            let request_line = request.lines().next().unwrap_or_default().to_string();
            let _ = tx.send(request_line);

            let response =
                format!("{status_line}\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]");
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        (format!("http://{addr}/api/v2/entries/en"), rx)
    }

    #[tokio::test]
    async fn test_ok_response_means_word() {
        // Arrange
        let (url, seen) = serve_once("HTTP/1.1 200 OK").await;
        let dict = HttpDictionary::new(&url, Duration::from_secs(5)).unwrap();

        // Act
        let found = dict.is_word("lysine").await.unwrap();

        // Assert
        assert!(found);
        assert_eq!(seen.await.unwrap(), "GET /api/v2/entries/en/lysine HTTP/1.1");
    }

    #[tokio::test]
    async fn test_not_found_means_not_a_word() {
        let (url, _seen) = serve_once("HTTP/1.1 404 Not Found").await;
        let dict = HttpDictionary::new(&url, Duration::from_secs(5)).unwrap();

        assert!(!dict.is_word("qzxv").await.unwrap());
    }

    #[tokio::test]
    async fn test_server_error_is_unexpected_status() {
        let (url, _seen) = serve_once("HTTP/1.1 503 Service Unavailable").await;
        let dict = HttpDictionary::new(&url, Duration::from_secs(5)).unwrap();

        let err = dict.is_word("billy").await.unwrap_err();

        assert!(matches!(err, DictionaryError::UnexpectedStatus(503)));
    }

    #[tokio::test]
    async fn test_word_is_percent_encoded() {
        let (url, seen) = serve_once("HTTP/1.1 404 Not Found").await;
        let dict = HttpDictionary::new(&url, Duration::from_secs(5)).unwrap();

        let _ = dict.is_word("a b/c").await;

        assert_eq!(
            seen.await.unwrap(),
            "GET /api/v2/entries/en/a%20b%2Fc HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Bind then drop so the port is almost certainly closed.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let dict = HttpDictionary::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();

        let err = dict.is_word("billy").await.unwrap_err();

        assert!(matches!(err, DictionaryError::Transport(_)));
    }

    #[test]
    fn test_trailing_slash_in_base_url_is_ignored() {
        let dict = HttpDictionary::new("http://dict.test/en/", Duration::from_secs(1)).unwrap();
        assert_eq!(dict.word_url("billy"), "http://dict.test/en/billy");
    }
}
