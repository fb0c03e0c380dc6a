//! IGN Géoportail (France) tiles.
//!
//! # URL Pattern
//!
//! `https://wxs.ign.fr/{key}/geoportail/wmts?SERVICE=WMTS&REQUEST=GetTile&VERSION=1.0.0&LAYER={layer}&STYLE=normal&FORMAT={format}&TILEMATRIXSET=PM&TILEMATRIX={z}&TILEROW={y}&TILECOL={x}`
//!
//! - WMTS KVP request against the `PM` (Web Mercator) tile matrix set
//! - The API key is a path segment
//! - Layer and image format depend on the selected [`IgnLayer`]
//!
//! # Coverage
//!
//! France, including overseas territories, so there is no low-zoom window
//! table. Map layers stop at zoom 17; orthophotos go to 19.

use super::bounds::BoundsFilter;
use super::source::IgnLayer;
use super::url::UrlBuilder;

/// Coverage of the IGN map layers.
pub(crate) const IGN_MAP_BOUNDS: BoundsFilter = BoundsFilter::new(17, &[]);

/// Coverage of the IGN orthophoto layer.
pub(crate) const IGN_SATELLITE_BOUNDS: BoundsFilter = BoundsFilter::new(19, &[]);

/// Returns the coverage table for an IGN layer.
pub(crate) fn bounds_for(layer: IgnLayer) -> BoundsFilter {
    match layer {
        IgnLayer::Satellite => IGN_SATELLITE_BOUNDS,
        IgnLayer::ScanExpressStandard | IgnLayer::PlanIgn | IgnLayer::CartesIgn => IGN_MAP_BOUNDS,
    }
}

#[derive(Debug, Clone)]
pub(crate) struct IgnUrlBuilder {
    /// Percent-encoded API key
    api_key: String,
    /// Percent-encoded WMTS layer name
    layer: String,
    format: &'static str,
}

impl IgnUrlBuilder {
    pub(crate) fn new(api_key: &str, layer: IgnLayer) -> Self {
        Self {
            api_key: urlencoding::encode(api_key.trim()).into_owned(),
            layer: urlencoding::encode(layer.real_name()).into_owned(),
            format: layer.format(),
        }
    }
}

impl UrlBuilder for IgnUrlBuilder {
    fn build(&self, zoom: u8, row: u32, col: u32) -> String {
        format!(
            "https://wxs.ign.fr/{}/geoportail/wmts?SERVICE=WMTS&REQUEST=GetTile&VERSION=1.0.0\
             &LAYER={}&STYLE=normal&FORMAT={}&TILEMATRIXSET=PM\
             &TILEMATRIX={}&TILEROW={}&TILECOL={}",
            self.api_key, self.layer, self.format, zoom, row, col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let builder = IgnUrlBuilder::new("abc123", IgnLayer::ScanExpressStandard);
        assert_eq!(
            builder.build(15, 11272, 16597),
            "https://wxs.ign.fr/abc123/geoportail/wmts?SERVICE=WMTS&REQUEST=GetTile&VERSION=1.0.0\
             &LAYER=GEOGRAPHICALGRIDSYSTEMS.MAPS.SCAN-EXPRESS.STANDARD&STYLE=normal\
             &FORMAT=image/jpeg&TILEMATRIXSET=PM&TILEMATRIX=15&TILEROW=11272&TILECOL=16597"
        );
    }

    #[test]
    fn test_layer_selects_name_and_format() {
        let url = IgnUrlBuilder::new("k", IgnLayer::PlanIgn).build(10, 1, 2);
        assert!(url.contains("&LAYER=GEOGRAPHICALGRIDSYSTEMS.PLANIGNV2&"));
        assert!(url.contains("&FORMAT=image/png&"));

        let url = IgnUrlBuilder::new("k", IgnLayer::Satellite).build(10, 1, 2);
        assert!(url.contains("&LAYER=ORTHOIMAGERY.ORTHOPHOTOS&"));
        assert!(url.contains("&FORMAT=image/jpeg&"));
    }

    #[test]
    fn test_api_key_is_percent_encoded() {
        let url = IgnUrlBuilder::new("a b/c?d", IgnLayer::CartesIgn).build(0, 0, 0);
        assert!(url.starts_with("https://wxs.ign.fr/a%20b%2Fc%3Fd/geoportail/wmts?"));
    }

    #[test]
    fn test_bounds_per_layer() {
        assert_eq!(bounds_for(IgnLayer::PlanIgn).max_zoom(), 17);
        assert_eq!(bounds_for(IgnLayer::Satellite).max_zoom(), 19);
        assert!(bounds_for(IgnLayer::CartesIgn).is_out_of_bounds(18, 0, 0));
        assert!(!bounds_for(IgnLayer::Satellite).is_out_of_bounds(18, 0, 0));
    }

    #[test]
    fn test_bounds_match_layer_max_zoom() {
        for layer in IgnLayer::ALL {
            assert_eq!(bounds_for(layer).max_zoom(), layer.max_zoom());
        }
    }
}
