//! Instituto Geográfico Nacional (Spain) tiles.
//!
//! # URL Pattern
//!
//! `https://www.ign.es/wmts/mapa-raster?Layer=MTN&Style=normal&Tilematrixset=GoogleMapsCompatible&Service=WMTS&Request=GetTile&Version=1.0.0&Format=image/jpeg&TileMatrix={z}&TileCol={x}&TileRow={y}`
//!
//! No authentication required.
//!
//! # Coverage
//!
//! Mainland Spain, the Balearic and Canary Islands. Zoom 3 to 6 only serve a
//! small block of tiles around the peninsula; requests outside it fail
//! server-side, so they are filtered out up front.

use super::bounds::{BoundsFilter, CoverageWindow};
use super::url::UrlBuilder;

const IGN_SPAIN_WINDOWS: &[CoverageWindow] = &[
    CoverageWindow::new(3, (1, 3), (2, 4)),
    CoverageWindow::new(4, (3, 6), (5, 9)),
    CoverageWindow::new(5, (7, 13), (11, 19)),
    CoverageWindow::new(6, (19, 27), (27, 35)),
];

pub(crate) const IGN_SPAIN_BOUNDS: BoundsFilter = BoundsFilter::new(17, IGN_SPAIN_WINDOWS);

#[derive(Debug, Clone, Default)]
pub(crate) struct IgnSpainUrlBuilder;

impl UrlBuilder for IgnSpainUrlBuilder {
    fn build(&self, zoom: u8, row: u32, col: u32) -> String {
        format!(
            "https://www.ign.es/wmts/mapa-raster?Layer=MTN&Style=normal\
             &Tilematrixset=GoogleMapsCompatible&Service=WMTS&Request=GetTile&Version=1.0.0\
             &Format=image/jpeg&TileMatrix={}&TileCol={}&TileRow={}",
            zoom, col, row
        )
    }
}
