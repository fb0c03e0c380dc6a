//! Url command - print the request URL for a tile.

use super::common::{off_grid_warning, Context, TileArgs};
use crate::error::CliError;

/// Run the url command.
///
/// Prints the URL even for addresses outside coverage, with a note on
/// stderr, since the URL is mostly used for diagnostics.
pub fn run(ctx: &Context, tile: &TileArgs) -> Result<(), CliError> {
    let source = ctx.resolve_source(tile.source);
    let provider = ctx.provider(source)?;
    let address = tile.address();

    println!("{}", provider.tile_url(address));

    if let Some(warning) = off_grid_warning(address) {
        eprintln!("{}", warning);
    }

    if provider.is_out_of_bounds(address) {
        eprintln!(
            "Note: tile {} is outside {} coverage and would not be requested",
            address,
            provider.name()
        );
    }
    Ok(())
}
