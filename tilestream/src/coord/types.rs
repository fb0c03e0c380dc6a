//! Tile address type definitions

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Highest zoom level any supported map service publishes.
pub const MAX_ZOOM: u8 = 22;

/// Address of a single raster tile.
///
/// Value-typed and immutable. Whether an address is inside a provider's
/// coverage is decided by that provider's bounds filter, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAddress {
    /// Zoom level, 0 being the whole world in one tile
    pub zoom: u8,
    /// Y coordinate (north-south), 0 at north
    pub row: u32,
    /// X coordinate (east-west), 0 at west
    pub col: u32,
}

impl TileAddress {
    /// Creates a new tile address.
    #[inline]
    pub const fn new(zoom: u8, row: u32, col: u32) -> Self {
        Self { zoom, row, col }
    }

    /// Returns true if `row` and `col` fall inside the grid for this zoom.
    #[inline]
    pub fn is_within_grid(&self) -> bool {
        let side = super::tiles_per_side(self.zoom);
        self.row < side && self.col < side
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.row, self.col)
    }
}

/// Error returned when parsing a `zoom/row/col` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tile address '{input}': expected zoom/row/col")]
pub struct AddressParseError {
    input: String,
}

impl FromStr for TileAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || AddressParseError {
            input: s.to_string(),
        };

        let mut parts = s.trim().split('/');
        let zoom = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let row = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let col = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self { zoom, row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TileAddress::new(5, 10, 12).to_string(), "5/10/12");
    }

    #[test]
    fn test_parse() {
        let addr: TileAddress = "15/11272/16597".parse().unwrap();
        assert_eq!(addr, TileAddress::new(15, 11272, 16597));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("15/11272".parse::<TileAddress>().is_err());
        assert!("15/11272/16597/1".parse::<TileAddress>().is_err());
        assert!("a/b/c".parse::<TileAddress>().is_err());
        assert!("300/0/0".parse::<TileAddress>().is_err());
    }

    #[test]
    fn test_is_within_grid() {
        assert!(TileAddress::new(0, 0, 0).is_within_grid());
        assert!(!TileAddress::new(0, 1, 0).is_within_grid());
        assert!(TileAddress::new(3, 7, 7).is_within_grid());
        assert!(!TileAddress::new(3, 7, 8).is_within_grid());
    }

    #[test]
    fn test_address_is_copy_and_hashable() {
        use std::collections::HashSet;

        let a = TileAddress::new(4, 5, 6);
        let b = a;
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
