//! swisstopo national map tiles.
//!
//! # URL Pattern
//!
//! `https://wmts.geo.admin.ch/1.0.0/ch.swisstopo.pixelkarte-farbe/default/current/3857/{z}/{x}/{y}.jpeg`
//!
//! RESTful WMTS on the Web Mercator (EPSG:3857) matrix set. No
//! authentication required.
//!
//! # Coverage
//!
//! Switzerland and Liechtenstein. At zoom 3 to 6 the whole country fits in
//! a single tile; the windows below grow with the grid up to zoom 8.

use super::bounds::{BoundsFilter, CoverageWindow};
use super::url::UrlBuilder;

const SWISS_TOPO_WINDOWS: &[CoverageWindow] = &[
    CoverageWindow::new(3, (2, 2), (4, 4)),
    CoverageWindow::new(4, (5, 5), (8, 8)),
    CoverageWindow::new(5, (11, 11), (16, 16)),
    CoverageWindow::new(6, (22, 22), (33, 33)),
    CoverageWindow::new(7, (44, 45), (66, 67)),
    CoverageWindow::new(8, (89, 91), (132, 135)),
];

pub(crate) const SWISS_TOPO_BOUNDS: BoundsFilter = BoundsFilter::new(17, SWISS_TOPO_WINDOWS);

#[derive(Debug, Clone, Default)]
pub(crate) struct SwissTopoUrlBuilder;

impl UrlBuilder for SwissTopoUrlBuilder {
    fn build(&self, zoom: u8, row: u32, col: u32) -> String {
        format!(
            "https://wmts.geo.admin.ch/1.0.0/ch.swisstopo.pixelkarte-farbe/default/current/3857/{}/{}/{}.jpeg",
            zoom, col, row
        )
    }
}
