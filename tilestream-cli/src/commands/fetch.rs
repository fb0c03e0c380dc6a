//! Fetch command - download a single tile.

use std::path::PathBuf;
use std::time::Duration;

use tilestream::provider::TileResult;
use tracing::info;

use super::common::{default_output_path, off_grid_warning, Context, TileArgs};
use crate::error::CliError;

/// Run the fetch command.
pub fn run(
    ctx: &Context,
    tile: &TileArgs,
    output: Option<PathBuf>,
    deadline: Option<u64>,
) -> Result<(), CliError> {
    let source = ctx.resolve_source(tile.source);
    let provider = ctx.provider(source)?;
    let address = tile.address();

    if let Some(warning) = off_grid_warning(address) {
        eprintln!("{}", warning);
    }
    println!("Fetching tile {} from {}", address, provider.name());

    let runtime = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;
    let result = runtime.block_on(async {
        match deadline {
            Some(secs) => {
                provider
                    .get_tile_stream_with_deadline(address, Duration::from_secs(secs))
                    .await
            }
            None => {
                provider
                    .get_tile_stream(address.zoom, address.row, address.col)
                    .await
            }
        }
    });

    match result {
        TileResult::Stream(stream) => {
            let path = output.unwrap_or_else(|| default_output_path(address, source));
            std::fs::write(&path, stream.bytes()).map_err(|error| CliError::FileWrite {
                path: path.display().to_string(),
                error,
            })?;

            info!(tile = %address, bytes = stream.len(), path = %path.display(), "Tile saved");
            println!("Saved {} bytes to {}", stream.len(), path.display());
            Ok(())
        }
        TileResult::OutOfBounds => Err(CliError::OutOfBounds { source, address }),
        TileResult::Failed(error) => Err(CliError::Fetch { address, error }),
    }
}
