//! Coverage filtering.
//!
//! Several services only publish imagery for a limited extent. At low zoom
//! levels that extent covers a handful of tiles, so requests outside it can
//! be answered without touching the network. Each filter is plain data: a
//! supported zoom range plus, for some zoom levels, the inclusive row and
//! column windows known to hold imagery.

/// Inclusive row/column window with imagery at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageWindow {
    pub zoom: u8,
    pub row_min: u32,
    pub row_max: u32,
    pub col_min: u32,
    pub col_max: u32,
}

impl CoverageWindow {
    /// Creates a window from inclusive `(min, max)` row and column ranges.
    pub const fn new(zoom: u8, rows: (u32, u32), cols: (u32, u32)) -> Self {
        Self {
            zoom,
            row_min: rows.0,
            row_max: rows.1,
            col_min: cols.0,
            col_max: cols.1,
        }
    }

    /// Returns true if `(row, col)` lies inside this window.
    #[inline]
    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.row_min..=self.row_max).contains(&row) && (self.col_min..=self.col_max).contains(&col)
    }
}

/// Per-provider coverage table.
///
/// Evaluation for an address, terminal in one step:
/// 1. `zoom > max_zoom` or `zoom < min_zoom` → out of bounds
/// 2. the zoom has declared windows and `(row, col)` is in none → out of bounds
/// 3. otherwise → in bounds
///
/// Zoom levels without declared windows are fully in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsFilter {
    min_zoom: u8,
    max_zoom: u8,
    windows: &'static [CoverageWindow],
}

impl BoundsFilter {
    /// Creates a filter supporting zoom `0..=max_zoom`.
    pub const fn new(max_zoom: u8, windows: &'static [CoverageWindow]) -> Self {
        Self {
            min_zoom: 0,
            max_zoom,
            windows,
        }
    }

    /// Sets the lowest zoom level the service answers.
    pub const fn with_min_zoom(self, min_zoom: u8) -> Self {
        Self { min_zoom, ..self }
    }

    /// Returns the lowest supported zoom level.
    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    /// Returns the highest supported zoom level.
    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// Returns the declared windows for `zoom`.
    pub fn windows_for(&self, zoom: u8) -> impl Iterator<Item = &CoverageWindow> {
        self.windows.iter().filter(move |w| w.zoom == zoom)
    }

    /// Returns true if the address is known to be outside coverage.
    ///
    /// Pure and deterministic; performs no I/O.
    pub fn is_out_of_bounds(&self, zoom: u8, row: u32, col: u32) -> bool {
        if zoom > self.max_zoom || zoom < self.min_zoom {
            return true;
        }

        let mut declared = self.windows_for(zoom).peekable();
        if declared.peek().is_none() {
            return false;
        }
        !declared.any(|w| w.contains(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINDOWS: &[CoverageWindow] = &[
        CoverageWindow::new(3, (1, 3), (2, 4)),
        CoverageWindow::new(4, (3, 6), (5, 9)),
        // Two disjoint windows at the same zoom
        CoverageWindow::new(5, (7, 8), (11, 12)),
        CoverageWindow::new(5, (20, 21), (2, 3)),
    ];

    const FILTER: BoundsFilter = BoundsFilter::new(17, WINDOWS);

    #[test]
    fn test_beyond_max_zoom_is_out() {
        assert!(FILTER.is_out_of_bounds(18, 0, 0));
        assert!(FILTER.is_out_of_bounds(22, 100, 100));
        assert!(!FILTER.is_out_of_bounds(17, 0, 0));
    }

    #[test]
    fn test_below_min_zoom_is_out() {
        let filter = BoundsFilter::new(16, &[]).with_min_zoom(7);
        assert!(filter.is_out_of_bounds(6, 0, 0));
        assert!(!filter.is_out_of_bounds(7, 0, 0));
        assert_eq!(filter.min_zoom(), 7);
        assert_eq!(filter.max_zoom(), 16);
    }

    #[test]
    fn test_window_edges_are_inclusive() {
        assert!(!FILTER.is_out_of_bounds(3, 1, 2));
        assert!(!FILTER.is_out_of_bounds(3, 3, 4));
        assert!(FILTER.is_out_of_bounds(3, 0, 2));
        assert!(FILTER.is_out_of_bounds(3, 4, 2));
        assert!(FILTER.is_out_of_bounds(3, 1, 1));
        assert!(FILTER.is_out_of_bounds(3, 1, 5));
    }

    #[test]
    fn test_any_window_at_zoom_admits() {
        assert!(!FILTER.is_out_of_bounds(5, 7, 11));
        assert!(!FILTER.is_out_of_bounds(5, 21, 3));
        assert!(FILTER.is_out_of_bounds(5, 7, 3));
    }

    #[test]
    fn test_undeclared_zoom_is_in_bounds() {
        assert!(!FILTER.is_out_of_bounds(0, 0, 0));
        assert!(!FILTER.is_out_of_bounds(10, 500, 500));
    }

    #[test]
    fn test_windows_for() {
        assert_eq!(FILTER.windows_for(5).count(), 2);
        assert_eq!(FILTER.windows_for(6).count(), 0);
    }

    proptest! {
        #[test]
        fn prop_inside_window_is_in_bounds(row in 3u32..=6, col in 5u32..=9) {
            prop_assert!(!FILTER.is_out_of_bounds(4, row, col));
        }

        #[test]
        fn prop_outside_window_is_out(row in 0u32..1000, col in 0u32..1000) {
            let inside = (3..=6).contains(&row) && (5..=9).contains(&col);
            prop_assert_eq!(FILTER.is_out_of_bounds(4, row, col), !inside);
        }

        #[test]
        fn prop_verdict_is_deterministic(
            zoom in 0u8..30,
            row in 0u32..100_000,
            col in 0u32..100_000,
        ) {
            prop_assert_eq!(
                FILTER.is_out_of_bounds(zoom, row, col),
                FILTER.is_out_of_bounds(zoom, row, col)
            );
        }
    }
}
