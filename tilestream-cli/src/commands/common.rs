//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;

use clap::Args;
use tilestream::config::{config_file_path, ConfigFile, ConfigFileError};
use tilestream::coord::{tiles_per_side, TileAddress};
use tilestream::provider::{
    HttpTileFetcher, IgnLayer, MapSource, MapSourceConfig, ProviderFactory, TileStreamProvider,
};

use crate::error::CliError;

/// Tile selection shared by `url` and `fetch`.
///
/// A tile is given either as `--tile zoom/row/col` or with all three of
/// `--zoom`, `--row` and `--col`.
#[derive(Debug, Args)]
pub struct TileArgs {
    /// Map source (default: [source] type from the config file)
    #[arg(short, long)]
    pub source: Option<MapSource>,

    /// Tile address as zoom/row/col
    #[arg(
        short,
        long,
        value_name = "Z/ROW/COL",
        conflicts_with_all = ["zoom", "row", "col"],
        required_unless_present_all = ["zoom", "row", "col"]
    )]
    pub tile: Option<TileAddress>,

    /// Zoom level
    #[arg(short, long)]
    pub zoom: Option<u8>,

    /// Tile row (y, 0 at north)
    #[arg(short, long)]
    pub row: Option<u32>,

    /// Tile column (x, 0 at west)
    #[arg(short, long)]
    pub col: Option<u32>,
}

impl TileArgs {
    pub fn address(&self) -> TileAddress {
        // clap guarantees either --tile or all three coordinates
        self.tile.unwrap_or_else(|| {
            TileAddress::new(
                self.zoom.unwrap_or_default(),
                self.row.unwrap_or_default(),
                self.col.unwrap_or_default(),
            )
        })
    }
}

/// Warning for addresses whose row or column lie past the edge of the
/// slippy map grid at their zoom level.
pub fn off_grid_warning(address: TileAddress) -> Option<String> {
    if address.is_within_grid() {
        return None;
    }
    let side = tiles_per_side(address.zoom);
    Some(format!(
        "Warning: tile {} is off the zoom {} grid (rows and columns run 0..{})",
        address, address.zoom, side
    ))
}

/// Loaded configuration plus command-line overrides.
pub struct Context {
    pub config: ConfigFile,
    pub config_path: PathBuf,
    api_key: Option<String>,
    ign_layer: Option<IgnLayer>,
}

impl Context {
    /// Load the config file, falling back to defaults when it is missing.
    pub fn load(
        config_path: Option<PathBuf>,
        api_key: Option<String>,
        ign_layer: Option<IgnLayer>,
    ) -> Result<Self, CliError> {
        let config_path = config_path.unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        Ok(Self {
            config,
            config_path,
            api_key,
            ign_layer,
        })
    }

    /// Source from the command line, else from the config file.
    pub fn resolve_source(&self, cli_source: Option<MapSource>) -> MapSource {
        cli_source.unwrap_or(self.config.source.source)
    }

    /// IGN layer from the command line, else from the config file.
    pub fn ign_layer(&self) -> IgnLayer {
        self.ign_layer.unwrap_or(self.config.ign.layer)
    }

    /// Provider configuration for `source`.
    ///
    /// CLI arguments take precedence over the config file.
    pub fn source_config(&self, source: MapSource) -> Result<MapSourceConfig, CliError> {
        let mut config = self.config.clone();
        if let Some(key) = &self.api_key {
            match source {
                MapSource::Ign => config.ign.api_key = Some(key.clone()),
                MapSource::OrdnanceSurvey => config.ordnance_survey.api_key = Some(key.clone()),
                _ => {}
            }
        }
        config.ign.layer = self.ign_layer();

        config.source_config_for(source).map_err(|e| match e {
            ConfigFileError::MissingValue { section, key } => CliError::Config(format!(
                "{} requires an API key. Set {} in the [{}] section of {} or use --api-key",
                source,
                key,
                section,
                self.config_path.display()
            )),
            other => other.into(),
        })
    }

    /// Factory using the download settings from the config file.
    pub fn factory(&self) -> Result<ProviderFactory, CliError> {
        let download = &self.config.download;
        let fetcher =
            HttpTileFetcher::with_timeouts(download.connect_timeout(), download.request_timeout())?;
        Ok(ProviderFactory::new(fetcher, download.retry_policy()))
    }

    /// Fully wired provider for `source`.
    pub fn provider(&self, source: MapSource) -> Result<TileStreamProvider, CliError> {
        let config = self.source_config(source)?;
        Ok(self.factory()?.create(source, &config)?)
    }
}

/// Default output file for a fetched tile: `{zoom}_{row}_{col}.{ext}`.
pub fn default_output_path(address: TileAddress, source: MapSource) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}_{}.{}",
        address.zoom,
        address.row,
        address.col,
        source.image_extension()
    ))
}
