//! Distance to color intensity.

use crate::config::{HeatmapConfig, Resolution};
use crate::frame::{MAX_ZONES, RangingFrame};

/// Maps a distance onto `0..=255`, near bright and far dark.
///
/// The distance is clamped to `0..=max_distance_mm` first, so readings past
/// the range (or negative ones from invalid zones) saturate instead of
/// wrapping.
pub fn intensity(distance_mm: i16, max_distance_mm: u16) -> u8 {
    let max = u32::from(max_distance_mm.max(1));
    let distance = u32::from(distance_mm.max(0).unsigned_abs()).min(max);
    (255 - distance * 255 / max) as u8
}

/// Per-zone intensities for one frame. `None` marks a masked zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    resolution: Resolution,
    cells: [Option<u8>; MAX_ZONES],
}

impl Heatmap {
    pub fn from_frame(frame: &RangingFrame, config: &HeatmapConfig) -> Self {
        let mut cells = [None; MAX_ZONES];
        for (zone, cell) in cells.iter_mut().enumerate().take(frame.zones()) {
            if config.mask_invalid_zones && !frame.is_valid(zone) {
                continue;
            }
            *cell = Some(intensity(frame.distance(zone), config.max_distance_mm));
        }
        Self {
            resolution: frame.resolution,
            cells,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        let width = self.resolution.width();
        if row >= width || col >= width {
            return None;
        }
        self.cells[row * width + col]
    }

    /// Intensities in zone order, masked zones as `0`.
    pub fn intensities(&self) -> [u8; MAX_ZONES] {
        self.cells.map(|cell| cell.unwrap_or(0))
    }
}
