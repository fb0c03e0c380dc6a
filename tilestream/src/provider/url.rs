//! Tile URL construction.

use super::ign::IgnUrlBuilder;
use super::ign_spain::IgnSpainUrlBuilder;
use super::ordnance_survey::OrdnanceSurveyUrlBuilder;
use super::osm::OsmUrlBuilder;
use super::swiss::SwissTopoUrlBuilder;
use super::usgs::UsgsUrlBuilder;

/// Maps a tile address to a request URL.
///
/// Pure and total: any triple produces a URL. Whether the service actually
/// has imagery there is the bounds filter's concern.
pub trait UrlBuilder: Send + Sync {
    /// Builds the fully qualified request URL for a tile.
    fn build(&self, zoom: u8, row: u32, col: u32) -> String;
}

/// Enum over the URL builders of every supported source.
///
/// Only the provider factory constructs these.
#[derive(Debug, Clone)]
pub(crate) enum UrlTileBuilder {
    Ign(IgnUrlBuilder),
    IgnSpain(IgnSpainUrlBuilder),
    Usgs(UsgsUrlBuilder),
    OpenStreetMap(OsmUrlBuilder),
    SwissTopo(SwissTopoUrlBuilder),
    OrdnanceSurvey(OrdnanceSurveyUrlBuilder),
}

impl UrlBuilder for UrlTileBuilder {
    fn build(&self, zoom: u8, row: u32, col: u32) -> String {
        match self {
            Self::Ign(b) => b.build(zoom, row, col),
            Self::IgnSpain(b) => b.build(zoom, row, col),
            Self::Usgs(b) => b.build(zoom, row, col),
            Self::OpenStreetMap(b) => b.build(zoom, row, col),
            Self::SwissTopo(b) => b.build(zoom, row, col),
            Self::OrdnanceSurvey(b) => b.build(zoom, row, col),
        }
    }
}
