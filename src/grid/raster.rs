// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Grayscale occupancy raster

use serde::{Deserialize, Serialize};

/// Intensity an unknown sample is normalized to before thresholding.
pub const FREE_INTENSITY: u8 = 255;

/// Row-major grid of 8-bit intensities.
///
/// Row 0 is the bottom row of the source image: loaders flip the image
/// vertically so that increasing row index means increasing world Y.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Build a raster from row-major intensities already in grid order.
    ///
    /// Returns `None` if `data.len() != width * height`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a raster with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a raster from signed samples, normalizing unknown values.
    ///
    /// Negative samples (the usual `-1` unknown marker) become
    /// [`FREE_INTENSITY`]; values above 255 saturate.
    pub fn from_samples(width: usize, height: usize, samples: &[i16]) -> Option<Self> {
        let data = samples.iter().map(|&s| normalize_sample(s)).collect();
        Self::new(width, height, data)
    }

    /// Build a raster from rows listed top to bottom, as they appear in an
    /// image file. The rows are flipped into grid order.
    pub fn from_image_rows(rows: &[Vec<u8>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let data = rows.iter().rev().flatten().copied().collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in the grid
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Intensity at grid cell (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    /// Write the intensity at (row, col). Returns `false`, leaving the
    /// raster untouched, if the cell is outside the grid.
    #[must_use]
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        self.data[row * self.width + col] = value;
        true
    }

    /// Iterate over `(row, col, intensity)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &value)| (i / width, i % width, value))
    }
}

/// Map a signed sample into the intensity range.
pub fn normalize_sample(sample: i16) -> u8 {
    if sample < 0 {
        FREE_INTENSITY
    } else {
        sample.min(255) as u8
    }
}
