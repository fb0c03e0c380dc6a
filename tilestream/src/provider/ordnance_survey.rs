//! Ordnance Survey Maps API (Great Britain) tiles.
//!
//! # URL Pattern
//!
//! `https://api.os.uk/maps/raster/v1/wmts?key={key}&service=WMTS&version=1.0.0&request=GetTile&layer=Light_3857&style=Light&format=image/png&tileMatrixSet=EPSG:3857&tileMatrix={z}&tileRow={y}&tileCol={x}`
//!
//! - WMTS KVP request, `Light` style on the EPSG:3857 matrix set
//! - The API key is a query parameter
//!
//! # Coverage
//!
//! Great Britain. The EPSG:3857 matrix set starts at zoom 7, and zoom
//! levels above 16 require a premium plan.
//!
//! Zoom levels below 7 are always out of bounds: the API has no tile
//! matrix for them, so a request could only fail.

use super::bounds::{BoundsFilter, CoverageWindow};
use super::url::UrlBuilder;

const ORDNANCE_SURVEY_WINDOWS: &[CoverageWindow] = &[
    CoverageWindow::new(7, (36, 43), (60, 64)),
    CoverageWindow::new(8, (72, 87), (121, 129)),
    CoverageWindow::new(9, (145, 174), (243, 258)),
    CoverageWindow::new(10, (291, 348), (487, 517)),
];

pub(crate) const ORDNANCE_SURVEY_BOUNDS: BoundsFilter =
    BoundsFilter::new(16, ORDNANCE_SURVEY_WINDOWS).with_min_zoom(7);

#[derive(Debug, Clone)]
pub(crate) struct OrdnanceSurveyUrlBuilder {
    /// Percent-encoded API key
    api_key: String,
}

impl OrdnanceSurveyUrlBuilder {
    pub(crate) fn new(api_key: &str) -> Self {
        Self {
            api_key: urlencoding::encode(api_key.trim()).into_owned(),
        }
    }
}

impl UrlBuilder for OrdnanceSurveyUrlBuilder {
    fn build(&self, zoom: u8, row: u32, col: u32) -> String {
        format!(
            "https://api.os.uk/maps/raster/v1/wmts?key={}&service=WMTS&version=1.0.0\
             &request=GetTile&layer=Light_3857&style=Light&format=image/png\
             &tileMatrixSet=EPSG:3857&tileMatrix={}&tileRow={}&tileCol={}",
            self.api_key, zoom, row, col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let builder = OrdnanceSurveyUrlBuilder::new("os-key");
        assert_eq!(
            builder.build(12, 1360, 2030),
            "https://api.os.uk/maps/raster/v1/wmts?key=os-key&service=WMTS&version=1.0.0\
             &request=GetTile&layer=Light_3857&style=Light&format=image/png\
             &tileMatrixSet=EPSG:3857&tileMatrix=12&tileRow=1360&tileCol=2030"
        );
    }

    #[test]
    fn test_api_key_is_percent_encoded() {
        let url = OrdnanceSurveyUrlBuilder::new("k&ey=1").build(7, 40, 62);
        assert!(url.contains("?key=k%26ey%3D1&service=WMTS"));
    }

    #[test]
    fn test_api_key_is_trimmed() {
        let url = OrdnanceSurveyUrlBuilder::new("  os-key \n").build(7, 40, 62);
        assert!(url.contains("?key=os-key&"));
    }

    #[test]
    fn test_zoom_range() {
        assert!(ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(6, 18, 31));
        assert!(!ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(7, 40, 62));
        assert!(!ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(16, 21_000, 32_000));
        assert!(ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(17, 42_000, 64_000));
    }

    #[test]
    fn test_below_tile_matrix_never_requested() {
        for zoom in 0..7 {
            let side = crate::coord::tiles_per_side(zoom);
            assert!(ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(zoom, 0, 0));
            assert!(ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(zoom, side / 2, side / 2));
        }
    }

    #[test]
    fn test_low_zoom_windows() {
        assert!(ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(7, 35, 62));
        assert!(ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(8, 80, 130));
        assert!(!ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(9, 170, 250));
        assert!(!ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(10, 291, 517));
        assert!(ORDNANCE_SURVEY_BOUNDS.is_out_of_bounds(10, 349, 500));
    }
}
