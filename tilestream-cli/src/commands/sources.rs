//! Sources command - list supported map sources.

use tilestream::coord::MAX_ZOOM;
use tilestream::provider::{coverage_for, IgnLayer, MapSource, MapSourceConfig};

use super::common::Context;
use crate::error::CliError;

/// Run the sources command.
pub fn run(ctx: &Context) -> Result<(), CliError> {
    let default_source = ctx.resolve_source(None);

    println!("{:<17} {:<17} {:<9} ZOOM", "KEY", "NAME", "API KEY");
    for source in MapSource::ALL {
        let marker = if source == default_source { " (default)" } else { "" };
        println!(
            "{:<17} {:<17} {:<9} {}{}",
            source.key(),
            source.name(),
            if source.requires_api_key() { "required" } else { "-" },
            zoom_range(source, ctx.ign_layer()),
            marker
        );
    }

    println!();
    println!("Config file: {}", ctx.config_path.display());
    Ok(())
}

/// Supported zoom range for a source, e.g. `7-16`.
fn zoom_range(source: MapSource, ign_layer: IgnLayer) -> String {
    let (min, max) = coverage_for(&describe(source, ign_layer))
        .map_or((0, MAX_ZOOM), |b| (b.min_zoom(), b.max_zoom()));
    format!("{}-{}", min, max)
}

/// Configuration used only to look up coverage; credentials are not needed.
fn describe(source: MapSource, ign_layer: IgnLayer) -> MapSourceConfig {
    match source {
        MapSource::Ign => MapSourceConfig::ign("", ign_layer),
        MapSource::IgnSpain => MapSourceConfig::IgnSpain,
        MapSource::Usgs => MapSourceConfig::Usgs,
        MapSource::OpenStreetMap => MapSourceConfig::OpenStreetMap,
        MapSource::SwissTopo => MapSourceConfig::SwissTopo,
        MapSource::OrdnanceSurvey => MapSourceConfig::ordnance_survey(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_ranges() {
        let layer = IgnLayer::default();
        assert_eq!(zoom_range(MapSource::OrdnanceSurvey, layer), "7-16");
        assert_eq!(zoom_range(MapSource::Usgs, layer), "0-16");
        assert_eq!(zoom_range(MapSource::OpenStreetMap, layer), "0-22");
        assert_eq!(zoom_range(MapSource::Ign, IgnLayer::Satellite), "0-19");
    }

    #[test]
    fn test_describe_matches_source() {
        for source in MapSource::ALL {
            assert_eq!(describe(source, IgnLayer::default()).source(), source);
        }
    }
}
