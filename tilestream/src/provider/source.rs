//! Map sources and their configuration payloads.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Supported map services.
///
/// Closed at compile time: adding a service means adding a variant here,
/// a URL builder and, where the service has limited coverage, a bounds
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapSource {
    /// IGN Géoportail (France), WMTS. Requires an API key.
    Ign,
    /// Instituto Geográfico Nacional (Spain), WMTS.
    IgnSpain,
    /// USGS National Map topographic basemap (United States).
    Usgs,
    /// OpenStreetMap standard tile layer.
    OpenStreetMap,
    /// swisstopo national map (Switzerland), WMTS.
    SwissTopo,
    /// Ordnance Survey Maps API (Great Britain), WMTS. Requires an API key.
    OrdnanceSurvey,
}

impl MapSource {
    /// Every supported source, in display order.
    pub const ALL: [MapSource; 6] = [
        MapSource::Ign,
        MapSource::IgnSpain,
        MapSource::Usgs,
        MapSource::OpenStreetMap,
        MapSource::SwissTopo,
        MapSource::OrdnanceSurvey,
    ];

    /// Human-readable name for logging and display.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ign => "IGN",
            Self::IgnSpain => "IGN Spain",
            Self::Usgs => "USGS",
            Self::OpenStreetMap => "OpenStreetMap",
            Self::SwissTopo => "Swiss Topo",
            Self::OrdnanceSurvey => "Ordnance Survey",
        }
    }

    /// Stable identifier used in configuration files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Ign => "ign",
            Self::IgnSpain => "ign_spain",
            Self::Usgs => "usgs",
            Self::OpenStreetMap => "osm",
            Self::SwissTopo => "swiss_topo",
            Self::OrdnanceSurvey => "ordnance_survey",
        }
    }

    /// Returns whether this source needs an API key.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Ign | Self::OrdnanceSurvey)
    }

    /// File extension of the images this source serves.
    pub fn image_extension(&self) -> &'static str {
        match self {
            Self::OpenStreetMap | Self::OrdnanceSurvey => "png",
            Self::Ign | Self::IgnSpain | Self::Usgs | Self::SwissTopo => "jpg",
        }
    }
}

impl fmt::Display for MapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a source or layer identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownIdentifier {
    kind: &'static str,
    value: String,
    expected: String,
}

impl UnknownIdentifier {
    /// Comma-separated list of accepted identifiers.
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl FromStr for MapSource {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|source| source.key() == needle)
            .ok_or_else(|| UnknownIdentifier {
                kind: "map source",
                value: s.to_string(),
                expected: Self::ALL.map(|source| source.key()).join(", "),
            })
    }
}

/// IGN Géoportail layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IgnLayer {
    /// SCAN Express standard topographic map.
    #[default]
    ScanExpressStandard,
    /// Plan IGN v2 vector-derived map.
    PlanIgn,
    /// Classic IGN maps (SCAN 25 / TOP 25 where licensed).
    CartesIgn,
    /// Aerial orthophotography.
    Satellite,
}

impl IgnLayer {
    /// Every IGN layer.
    pub const ALL: [IgnLayer; 4] = [
        IgnLayer::ScanExpressStandard,
        IgnLayer::PlanIgn,
        IgnLayer::CartesIgn,
        IgnLayer::Satellite,
    ];

    /// WMTS layer identifier as published in the Géoportail capabilities.
    pub fn real_name(&self) -> &'static str {
        match self {
            Self::ScanExpressStandard => "GEOGRAPHICALGRIDSYSTEMS.MAPS.SCAN-EXPRESS.STANDARD",
            Self::PlanIgn => "GEOGRAPHICALGRIDSYSTEMS.PLANIGNV2",
            Self::CartesIgn => "GEOGRAPHICALGRIDSYSTEMS.MAPS",
            Self::Satellite => "ORTHOIMAGERY.ORTHOPHOTOS",
        }
    }

    /// Image MIME type requested for this layer.
    pub fn format(&self) -> &'static str {
        match self {
            Self::PlanIgn => "image/png",
            Self::ScanExpressStandard | Self::CartesIgn | Self::Satellite => "image/jpeg",
        }
    }

    /// Highest zoom level published for this layer.
    pub fn max_zoom(&self) -> u8 {
        match self {
            Self::Satellite => 19,
            Self::ScanExpressStandard | Self::PlanIgn | Self::CartesIgn => 17,
        }
    }

    /// Stable identifier used in configuration files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ScanExpressStandard => "scan_express_standard",
            Self::PlanIgn => "plan_ign",
            Self::CartesIgn => "cartes_ign",
            Self::Satellite => "satellite",
        }
    }
}

impl fmt::Display for IgnLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for IgnLayer {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|layer| layer.key() == needle)
            .ok_or_else(|| UnknownIdentifier {
                kind: "IGN layer",
                value: s.to_string(),
                expected: Self::ALL.map(|layer| layer.key()).join(", "),
            })
    }
}

/// Per-source configuration.
///
/// Each variant carries exactly what its source needs. The factory checks
/// that the payload matches the requested source and that credentials are
/// present, so a live provider is always fully wired.
///
/// # Example
///
/// ```
/// use tilestream::provider::{IgnLayer, MapSourceConfig};
///
/// let osm = MapSourceConfig::OpenStreetMap;
/// assert!(!osm.requires_api_key());
///
/// let ign = MapSourceConfig::ign("YOUR_API_KEY", IgnLayer::PlanIgn);
/// assert!(ign.requires_api_key());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum MapSourceConfig {
    /// IGN Géoportail.
    Ign {
        /// Géoportail API key
        api_key: String,
        /// Layer to request
        layer: IgnLayer,
    },
    /// IGN Spain. No credential.
    IgnSpain,
    /// USGS. No credential.
    Usgs,
    /// OpenStreetMap. No credential.
    OpenStreetMap,
    /// swisstopo. No credential.
    SwissTopo,
    /// Ordnance Survey Maps API.
    OrdnanceSurvey {
        /// OS Data Hub project API key
        api_key: String,
    },
}

impl MapSourceConfig {
    /// Create an IGN configuration.
    pub fn ign(api_key: impl Into<String>, layer: IgnLayer) -> Self {
        Self::Ign {
            api_key: api_key.into(),
            layer,
        }
    }

    /// Create an Ordnance Survey configuration.
    pub fn ordnance_survey(api_key: impl Into<String>) -> Self {
        Self::OrdnanceSurvey {
            api_key: api_key.into(),
        }
    }

    /// Returns the source this configuration is for.
    pub fn source(&self) -> MapSource {
        match self {
            Self::Ign { .. } => MapSource::Ign,
            Self::IgnSpain => MapSource::IgnSpain,
            Self::Usgs => MapSource::Usgs,
            Self::OpenStreetMap => MapSource::OpenStreetMap,
            Self::SwissTopo => MapSource::SwissTopo,
            Self::OrdnanceSurvey { .. } => MapSource::OrdnanceSurvey,
        }
    }

    /// Returns the provider name for this configuration.
    pub fn name(&self) -> &'static str {
        self.source().name()
    }

    /// Returns whether this configuration carries an API key.
    pub fn requires_api_key(&self) -> bool {
        self.source().requires_api_key()
    }
}

// Credentials stay out of logs and panic messages.
impl fmt::Debug for MapSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ign { layer, .. } => f
                .debug_struct("Ign")
                .field("api_key", &"<redacted>")
                .field("layer", layer)
                .finish(),
            Self::OrdnanceSurvey { .. } => f
                .debug_struct("OrdnanceSurvey")
                .field("api_key", &"<redacted>")
                .finish(),
            Self::IgnSpain => f.write_str("IgnSpain"),
            Self::Usgs => f.write_str("Usgs"),
            Self::OpenStreetMap => f.write_str("OpenStreetMap"),
            Self::SwissTopo => f.write_str("SwissTopo"),
        }
    }
}
