//! tilestream - Raster map tiles from public web map services
//!
//! Fetches individual tiles, addressed by zoom level, row and column, from
//! IGN, IGN Spain, USGS, OpenStreetMap, swisstopo and Ordnance Survey. Each
//! request yields tile bytes, an out-of-coverage signal, or a classified
//! failure; transient network failures are retried and addresses known to
//! be outside a service's coverage never reach the network.
//!
//! # Example
//!
//! ```no_run
//! use tilestream::provider::{MapSource, MapSourceConfig, ProviderFactory, TileResult};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = ProviderFactory::with_defaults()?;
//! let provider = factory.create(MapSource::SwissTopo, &MapSourceConfig::SwissTopo)?;
//!
//! if let TileResult::Stream(tile) = provider.get_tile_stream(8, 90, 133).await {
//!     std::fs::write("tile.jpg", tile.bytes())?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod coord;
pub mod logging;
pub mod provider;
