//! Tile addressing.
//!
//! Tiles are addressed by `(zoom, row, col)` in the Web Mercator slippy map
//! grid. The same address names a different place under each provider's
//! tile matrix, so addresses are only meaningful together with a source.

mod types;

pub use types::{AddressParseError, TileAddress, MAX_ZOOM};

/// Returns the number of tiles along one side of the grid at `zoom`.
///
/// The grid doubles in both directions at each zoom level. Saturates at
/// `u32::MAX` for zoom levels beyond 31.
#[inline]
pub fn tiles_per_side(zoom: u8) -> u32 {
    1u32.checked_shl(zoom as u32).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_per_side() {
        assert_eq!(tiles_per_side(0), 1);
        assert_eq!(tiles_per_side(1), 2);
        assert_eq!(tiles_per_side(10), 1024);
        assert_eq!(tiles_per_side(31), 1 << 31);
    }

    #[test]
    fn test_tiles_per_side_saturates() {
        assert_eq!(tiles_per_side(32), u32::MAX);
        assert_eq!(tiles_per_side(255), u32::MAX);
    }
}
