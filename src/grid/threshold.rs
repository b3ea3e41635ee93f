// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Grid thresholder: intensity raster to occupied cells

use super::Raster;
use serde::{Deserialize, Serialize};

/// Default intensity threshold. Dark pixels at or below it are walls.
pub const DEFAULT_THRESHOLD: u8 = 105;

/// One occupied grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccupiedCell {
    pub row: usize,
    pub col: usize,
}

impl OccupiedCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A cell is occupied iff its intensity is at or below the threshold.
///
/// Intensity 0 (black) is always occupied and 255 (white) is always free,
/// except that a threshold of 255 marks every cell occupied.
#[inline]
pub fn is_occupied(intensity: u8, threshold: u8) -> bool {
    intensity <= threshold
}

/// Set of occupied cells produced by [`threshold`].
///
/// Cells are unique and held in row-major order, which keeps downstream
/// mesh output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupiedCells {
    cells: Vec<OccupiedCell>,
}

impl OccupiedCells {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &OccupiedCell) -> bool {
        self.cells.binary_search(cell).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OccupiedCell> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[OccupiedCell] {
        &self.cells
    }
}

impl<'a> IntoIterator for &'a OccupiedCells {
    type Item = &'a OccupiedCell;
    type IntoIter = std::slice::Iter<'a, OccupiedCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Collect every cell of `raster` that [`is_occupied`] at `threshold_value`.
pub fn threshold(raster: &Raster, threshold_value: u8) -> OccupiedCells {
    let cells = raster
        .cells()
        .filter(|&(_, _, value)| is_occupied(value, threshold_value))
        .map(|(row, col, _)| OccupiedCell::new(row, col))
        .collect();
    OccupiedCells { cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center_wall() -> Raster {
        let mut raster = Raster::filled(3, 3, 255);
        assert!(raster.set(1, 1, 0));
        raster
    }

    #[test]
    fn test_black_is_occupied_white_is_free() {
        assert!(is_occupied(0, DEFAULT_THRESHOLD));
        assert!(!is_occupied(255, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        assert!(is_occupied(105, 105));
        assert!(!is_occupied(106, 105));
    }

    #[test]
    fn test_single_center_cell() {
        let cells = threshold(&center_wall(), DEFAULT_THRESHOLD);
        assert_eq!(cells.len(), 1);
        assert!(cells.contains(&OccupiedCell::new(1, 1)));
    }

    #[test]
    fn test_all_free_and_all_occupied() {
        let free = Raster::filled(4, 5, 255);
        assert!(threshold(&free, DEFAULT_THRESHOLD).is_empty());

        let walls = Raster::filled(4, 5, 0);
        assert_eq!(threshold(&walls, DEFAULT_THRESHOLD).len(), 20);
    }

    #[test]
    fn test_threshold_monotonic() {
        let data: Vec<u8> = (0..=255u8).collect();
        let raster = Raster::new(16, 16, data).unwrap();

        let mut previous = 0;
        for t in (0..=255u8).step_by(5) {
            let count = threshold(&raster, t).len();
            assert!(count >= previous, "count dropped at threshold {}", t);
            assert_eq!(count, t as usize + 1);
            previous = count;
        }
    }

    #[test]
    fn test_cells_are_row_major_and_unique() {
        let raster = Raster::filled(3, 2, 0);
        let cells = threshold(&raster, 0);
        let mut sorted = cells.as_slice().to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.as_slice(), cells.as_slice());
    }
}
