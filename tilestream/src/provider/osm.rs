//! OpenStreetMap standard tile layer.
//!
//! # URL Pattern
//!
//! `https://tile.openstreetmap.org/{z}/{x}/{y}.png`
//!
//! Note the column comes before the row. Worldwide coverage, so this
//! source has no bounds filter and every request goes to the network.

use super::url::UrlBuilder;

#[derive(Debug, Clone, Default)]
pub(crate) struct OsmUrlBuilder;

impl UrlBuilder for OsmUrlBuilder {
    fn build(&self, zoom: u8, row: u32, col: u32) -> String {
        format!("https://tile.openstreetmap.org/{}/{}/{}.png", zoom, col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        assert_eq!(
            OsmUrlBuilder.build(5, 10, 12),
            "https://tile.openstreetmap.org/5/12/10.png"
        );
    }

    #[test]
    fn test_url_construction_large_indices() {
        assert_eq!(
            OsmUrlBuilder.build(19, 262_143, 524_287),
            "https://tile.openstreetmap.org/19/524287/262143.png"
        );
    }
}
