//! Map tile provider abstraction
//!
//! This module fetches raster tiles, addressed by zoom level, row and
//! column, from several web map services (IGN, IGN Spain, USGS,
//! OpenStreetMap, swisstopo, Ordnance Survey).
//!
//! Each provider is a fixed composition:
//!
//! ```text
//! address ─► BoundsFilter ─► UrlBuilder ─► RetryingFetcher ─► TileFetcher
//!                 │                                               │
//!                 ▼                                               ▼
//!            OutOfBounds                               Stream / Failed
//! ```
//!
//! # Factory Pattern
//!
//! Providers are only created through the [`ProviderFactory`]:
//!
//! ```no_run
//! use tilestream::provider::{MapSource, MapSourceConfig, ProviderFactory};
//!
//! let factory = ProviderFactory::with_defaults()?;
//! let provider = factory.create(MapSource::Usgs, &MapSourceConfig::Usgs)?;
//! # Ok::<(), tilestream::provider::ProviderError>(())
//! ```

mod bounds;
mod factory;
mod http;
mod ign;
mod ign_spain;
mod ordnance_survey;
mod osm;
mod retry;
mod source;
mod stream;
mod swiss;
mod types;
mod url;
mod usgs;

pub use bounds::{BoundsFilter, CoverageWindow};
pub use factory::{coverage_for, ProviderFactory};
pub use http::{HttpTileFetcher, TileFetcher, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use retry::{RetryPolicy, RetryingFetcher, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_STEP_MS};
pub use source::{IgnLayer, MapSource, MapSourceConfig, UnknownIdentifier};
pub use stream::{TileRequest, TileStreamProvider};
pub use types::{FetchError, ProviderError, TileResult, TileStream};
pub use url::UrlBuilder;

#[cfg(test)]
pub use http::tests::{MockTileFetcher, ScriptedTileFetcher};
