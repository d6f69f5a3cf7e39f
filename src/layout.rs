use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{ConfigError, Resolution};

/// Splits the display into one rectangle per zone.
///
/// Cell sizes are truncated, so a display that is not a multiple of the grid
/// width leaves a strip at the right and bottom edges uncovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    resolution: Resolution,
    cell: Size,
}

impl GridLayout {
    pub fn new(display: Size, resolution: Resolution) -> Result<Self, ConfigError> {
        let width = resolution.width() as u32;
        let cell = Size::new(display.width / width, display.height / width);
        if cell.width == 0 || cell.height == 0 {
            return Err(ConfigError::DisplayTooSmall {
                width: display.width,
                height: display.height,
                grid: resolution,
            });
        }
        Ok(Self { resolution, cell })
    }

    pub fn cell_size(&self) -> Size {
        self.cell
    }

    /// Area covered by all cells.
    pub fn grid_size(&self) -> Size {
        self.cell * self.resolution.width() as u32
    }

    pub fn cell(&self, row: usize, col: usize) -> Rectangle {
        let top_left = Point::new(
            (col as u32 * self.cell.width) as i32,
            (row as u32 * self.cell.height) as i32,
        );
        Rectangle::new(top_left, self.cell)
    }

    /// Every cell in zone order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Rectangle)> + '_ {
        let width = self.resolution.width();
        (0..width).flat_map(move |row| (0..width).map(move |col| (row, col, self.cell(row, col))))
    }
}
