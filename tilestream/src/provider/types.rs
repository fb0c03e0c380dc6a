//! Provider types: tile streams, outcomes and errors.

use std::io::{self, Cursor, Read};
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

use super::source::MapSource;

/// Errors raised while building a provider.
///
/// These are configuration errors: they surface from
/// [`ProviderFactory::create`](super::ProviderFactory::create) and are never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The source needs a credential and none (or a blank one) was supplied.
    #[error("{map_source} requires an API key")]
    MissingApiKey { map_source: MapSource },

    /// The configuration payload belongs to a different source.
    #[error("configuration for {actual} cannot be used to create a {expected} provider")]
    ConfigMismatch {
        expected: MapSource,
        actual: MapSource,
    },

    /// The HTTP client could not be created.
    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// A classified failure from a single fetch or from an exhausted retry loop.
///
/// Use [`FetchError::is_transient`] to tell failures worth retrying apart
/// from terminal ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The connection could not be established or was reset.
    #[error("connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    /// The attempt did not complete within the client timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The response body could not be read to completion.
    #[error("failed to read response from {url}: {message}")]
    Body { url: String, message: String },

    /// The server answered 2xx without a payload.
    #[error("empty response body from {url}")]
    EmptyBody { url: String },

    /// The request could not be built or sent (bad URL, redirect loop, ...).
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The caller abandoned the fetch.
    #[error("tile fetch cancelled")]
    Cancelled,

    /// The caller's overall deadline elapsed before a result was available.
    #[error("no tile within {0:?}")]
    DeadlineExceeded(Duration),
}

impl FetchError {
    /// Returns true if retrying the same request may succeed.
    ///
    /// Server errors (5xx), connection failures, timeouts and interrupted
    /// bodies are transient. Client errors (4xx), empty bodies, malformed
    /// requests and cancellations are terminal.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => (500..600).contains(status),
            FetchError::Connect { .. } | FetchError::Timeout { .. } | FetchError::Body { .. } => {
                true
            }
            FetchError::EmptyBody { .. }
            | FetchError::Request { .. }
            | FetchError::Cancelled
            | FetchError::DeadlineExceeded(_) => false,
        }
    }
}

/// Readable tile image bytes.
///
/// A `TileStream` owns its payload. Dropping it releases the underlying
/// buffer, so every exit path (including discarding a superseded tile)
/// releases the resource without an explicit close.
#[derive(Debug, Clone)]
pub struct TileStream {
    inner: Cursor<Bytes>,
}

impl TileStream {
    /// Wraps a response body.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            inner: Cursor::new(data.into()),
        }
    }

    /// Returns the complete payload, independent of the read position.
    pub fn bytes(&self) -> &[u8] {
        self.inner.get_ref()
    }

    /// Returns the payload size in bytes.
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }

    /// Consumes the stream and returns the payload.
    pub fn into_bytes(self) -> Bytes {
        self.inner.into_inner()
    }
}

impl Read for TileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

/// Outcome of a tile request.
///
/// Failures never cross the provider boundary as `Err` or panics; callers
/// match on this value instead.
#[derive(Debug)]
pub enum TileResult {
    /// Tile image bytes. Ownership passes to the caller.
    Stream(TileStream),

    /// The address is outside the provider's coverage. No network access
    /// was performed and retrying is pointless.
    OutOfBounds,

    /// The fetch failed after retries, or the response was unusable.
    Failed(FetchError),
}

impl TileResult {
    /// Returns true for [`TileResult::Stream`].
    pub fn is_stream(&self) -> bool {
        matches!(self, TileResult::Stream(_))
    }

    /// Returns true for [`TileResult::OutOfBounds`].
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, TileResult::OutOfBounds)
    }

    /// Returns true for [`TileResult::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, TileResult::Failed(_))
    }

    /// Returns the stream, discarding any other outcome.
    ///
    /// This is the shape tile widgets usually want: an image, or nothing.
    pub fn into_stream(self) -> Option<TileStream> {
        match self {
            TileResult::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    /// Returns the failure, if any.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            TileResult::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Result<TileStream, FetchError>> for TileResult {
    fn from(result: Result<TileStream, FetchError>) -> Self {
        match result {
            Ok(stream) => TileResult::Stream(stream),
            Err(e) => TileResult::Failed(e),
        }
    }
}
