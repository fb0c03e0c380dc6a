//! HTTP tile fetching.
//!
//! [`TileFetcher`] is the seam between providers and the network. The
//! production implementation, [`HttpTileFetcher`], issues exactly one GET
//! per call and classifies the outcome; retrying is layered on top by
//! [`RetryingFetcher`](super::RetryingFetcher).

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, trace, warn};

use super::types::{FetchError, ProviderError, TileStream};

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for a whole attempt (connect, headers and body).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent sent with every request.
/// Tile usage policies (OpenStreetMap in particular) reject anonymous clients.
const DEFAULT_USER_AGENT: &str = concat!(
    "tilestream/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/tilestream/tilestream)"
);

/// Trait for fetching a tile from a fully built URL.
///
/// Implementations must be cheap to share across tasks: providers hold one
/// and call it concurrently for every visible tile.
pub trait TileFetcher: Send + Sync {
    /// Fetches the resource at `url`.
    ///
    /// # Returns
    ///
    /// The tile bytes, or a [`FetchError`] whose
    /// [`is_transient`](FetchError::is_transient) tells retry logic what to do.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<TileStream, FetchError>> + Send;
}

/// Single-attempt HTTP fetcher backed by reqwest.
///
/// Cloning is cheap and shares the connection pool. Creating the client
/// performs no network I/O.
#[derive(Clone)]
pub struct HttpTileFetcher {
    client: reqwest::Client,
}

impl HttpTileFetcher {
    /// Creates a fetcher with the default timeouts.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a fetcher with custom timeouts.
    ///
    /// # Arguments
    ///
    /// * `connect_timeout` - Limit for establishing the connection
    /// * `request_timeout` - Limit for the whole attempt, body included
    pub fn with_timeouts(
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ProviderError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }
}

impl TileFetcher for HttpTileFetcher {
    async fn fetch(&self, url: &str) -> Result<TileStream, FetchError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(classify_send_error(url, &e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = url, status = status.as_u16(), "HTTP error status");
            return Err(classify_status(url, status));
        }

        match response.bytes().await {
            Ok(body) if body.is_empty() => {
                warn!(url = url, "Empty response body");
                Err(FetchError::EmptyBody {
                    url: url.to_string(),
                })
            }
            Ok(body) => {
                trace!(url = url, bytes = body.len(), "HTTP response body read");
                Ok(TileStream::new(body))
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                if e.is_timeout() {
                    Err(FetchError::Timeout {
                        url: url.to_string(),
                    })
                } else {
                    Err(FetchError::Body {
                        url: url.to_string(),
                        message: e.to_string(),
                    })
                }
            }
        }
    }
}

/// Maps a non-success status to a [`FetchError`].
fn classify_status(url: &str, status: StatusCode) -> FetchError {
    FetchError::Status {
        status: status.as_u16(),
        url: url.to_string(),
    }
}

/// Maps a transport error to a [`FetchError`].
///
/// Timeouts and connection-level failures are transient; anything else
/// (invalid URL, redirect policy) would fail the same way again.
fn classify_send_error(url: &str, e: &reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() || e.is_request() {
        FetchError::Connect {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
