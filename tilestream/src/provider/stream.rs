//! The tile stream provider.
//!
//! A [`TileStreamProvider`] composes, for one map source, the coverage
//! filter, the URL builder and a retrying fetcher. It is immutable once
//! built and answers every request with a [`TileResult`].

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, trace};

use super::bounds::BoundsFilter;
use super::http::{HttpTileFetcher, TileFetcher};
use super::retry::{RetryPolicy, RetryingFetcher};
use super::source::MapSource;
use super::types::{FetchError, TileResult};
use super::url::{UrlBuilder, UrlTileBuilder};
use crate::coord::{TileAddress, MAX_ZOOM};

/// Fully wired tile source.
///
/// Requests flow one way: bounds check, URL construction, retried fetch.
/// An address the bounds filter rejects never reaches the network.
///
/// Providers are `Send + Sync`; share one behind an [`Arc`] to fan out
/// requests across tasks. Build them with
/// [`ProviderFactory`](super::ProviderFactory).
///
/// # Example
///
/// ```no_run
/// use tilestream::provider::{MapSource, MapSourceConfig, ProviderFactory, TileResult};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let factory = ProviderFactory::with_defaults()?;
/// let provider = factory.create(MapSource::OpenStreetMap, &MapSourceConfig::OpenStreetMap)?;
///
/// match provider.get_tile_stream(5, 10, 12).await {
///     TileResult::Stream(stream) => println!("{} bytes", stream.len()),
///     TileResult::OutOfBounds => println!("no imagery here"),
///     TileResult::Failed(e) => eprintln!("{}", e),
/// }
/// # Ok(())
/// # }
/// ```
pub struct TileStreamProvider<F = HttpTileFetcher> {
    source: MapSource,
    urls: UrlTileBuilder,
    bounds: Option<BoundsFilter>,
    fetcher: RetryingFetcher<F>,
}

impl<F: TileFetcher> TileStreamProvider<F> {
    pub(crate) fn new(
        source: MapSource,
        urls: UrlTileBuilder,
        bounds: Option<BoundsFilter>,
        fetcher: F,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            source,
            urls,
            bounds,
            fetcher: RetryingFetcher::new(fetcher, retry_policy),
        }
    }

    /// Returns the map source this provider serves.
    pub fn source(&self) -> MapSource {
        self.source
    }

    /// Returns the human-readable source name.
    pub fn name(&self) -> &'static str {
        self.source.name()
    }

    /// Returns the highest zoom level this provider requests.
    pub fn max_zoom(&self) -> u8 {
        self.bounds.map_or(MAX_ZOOM, |b| b.max_zoom())
    }

    /// Returns the coverage filter, if this source has one.
    pub fn bounds(&self) -> Option<&BoundsFilter> {
        self.bounds.as_ref()
    }

    /// Returns the retry policy applied to transient failures.
    pub fn retry_policy(&self) -> &RetryPolicy {
        self.fetcher.policy()
    }

    /// Returns true if the address is known to be outside coverage.
    pub fn is_out_of_bounds(&self, address: TileAddress) -> bool {
        self.bounds
            .is_some_and(|b| b.is_out_of_bounds(address.zoom, address.row, address.col))
    }

    /// Returns the request URL for an address without fetching it.
    pub fn tile_url(&self, address: TileAddress) -> String {
        self.urls.build(address.zoom, address.row, address.col)
    }

    /// Fetches the tile at `(zoom, row, col)`.
    ///
    /// Never fails as a call: every outcome, including exhausted retries,
    /// is one of the three [`TileResult`] variants.
    pub async fn get_tile_stream(&self, zoom: u8, row: u32, col: u32) -> TileResult {
        let address = TileAddress::new(zoom, row, col);
        self.get_tile_stream_cancellable(address, &CancellationToken::new())
            .await
    }

    /// Fetches a tile, giving up when `cancellation` fires.
    ///
    /// A cancelled fetch yields `Failed(FetchError::Cancelled)`.
    pub async fn get_tile_stream_cancellable(
        &self,
        address: TileAddress,
        cancellation: &CancellationToken,
    ) -> TileResult {
        if self.is_out_of_bounds(address) {
            trace!(source = self.source.key(), tile = %address, "Tile outside coverage");
            return TileResult::OutOfBounds;
        }

        let url = self.tile_url(address);
        trace!(source = self.source.key(), tile = %address, url = %url, "Fetching tile");

        let result = self.fetcher.fetch_cancellable(&url, cancellation).await;
        if let Err(e) = &result {
            debug!(source = self.source.key(), tile = %address, error = %e, "Tile fetch failed");
        }
        result.into()
    }

    /// Fetches a tile with an overall deadline covering every attempt and
    /// backoff.
    ///
    /// When the deadline elapses the in-flight request is dropped and the
    /// result is `Failed(FetchError::DeadlineExceeded)`.
    pub async fn get_tile_stream_with_deadline(
        &self,
        address: TileAddress,
        deadline: Duration,
    ) -> TileResult {
        let fetch = async {
            self.get_tile_stream_cancellable(address, &CancellationToken::new()).await
        };
        match tokio::time::timeout(deadline, fetch).await {
            Ok(result) => result,
            Err(_) => {
                debug!(
                    source = self.source.key(),
                    tile = %address,
                    deadline_ms = deadline.as_millis() as u64,
                    "Tile deadline exceeded"
                );
                TileResult::Failed(FetchError::DeadlineExceeded(deadline))
            }
        }
    }
}

impl<F: TileFetcher + 'static> TileStreamProvider<F> {
    /// Dispatches a fetch onto the tokio runtime.
    ///
    /// The returned [`TileRequest`] owns the in-flight request: cancelling
    /// it, or dropping it before completion, aborts the fetch.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_tile_stream(self: &Arc<Self>, address: TileAddress) -> TileRequest {
        let cancellation = CancellationToken::new();
        let provider = Arc::clone(self);
        let token = cancellation.clone();

        let handle = tokio::spawn(async move {
            provider.get_tile_stream_cancellable(address, &token).await
        });

        TileRequest {
            address,
            cancellation: cancellation.clone(),
            handle,
            _guard: cancellation.drop_guard(),
        }
    }
}

/// Handle to a fetch running on the tokio runtime.
///
/// Dropping the handle cancels the fetch.
pub struct TileRequest {
    address: TileAddress,
    cancellation: CancellationToken,
    handle: JoinHandle<TileResult>,
    _guard: DropGuard,
}

impl TileRequest {
    /// Returns the address being fetched.
    pub fn address(&self) -> TileAddress {
        self.address
    }

    /// Cancels the fetch. The result becomes `Failed(FetchError::Cancelled)`
    /// unless it had already completed.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns true once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Waits for the fetch to finish.
    pub async fn join(self) -> TileResult {
        let TileRequest {
            address, handle, _guard, ..
        } = self;

        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => TileResult::Failed(FetchError::Cancelled),
            Err(e) => TileResult::Failed(FetchError::Request {
                url: address.to_string(),
                message: format!("tile task failed: {}", e),
            }),
        }
    }
}
