//! USGS (United States Geological Survey) topographic tiles.
//!
//! Provides free access to the USGS National Map topographic basemap.
//!
//! # URL Pattern
//!
//! `https://basemap.nationalmap.gov/arcgis/rest/services/USGSTopo/MapServer/tile/{z}/{y}/{x}`
//!
//! - Standard XYZ tile coordinates (y=row, x=col)
//! - No authentication required
//!
//! # Coverage
//!
//! United States and territories. The cached tile pyramid stops at zoom 16.

use super::bounds::BoundsFilter;
use super::url::UrlBuilder;

/// Base URL for USGS topographic tiles.
const USGS_BASE_URL: &str =
    "https://basemap.nationalmap.gov/arcgis/rest/services/USGSTopo/MapServer/tile";

pub(crate) const USGS_BOUNDS: BoundsFilter = BoundsFilter::new(16, &[]);

#[derive(Debug, Clone, Default)]
pub(crate) struct UsgsUrlBuilder;

impl UrlBuilder for UsgsUrlBuilder {
    /// USGS uses the pattern: `{base}/{z}/{y}/{x}`
    fn build(&self, zoom: u8, row: u32, col: u32) -> String {
        format!("{}/{}/{}/{}", USGS_BASE_URL, zoom, row, col)
    }
}
