use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::config::{AppConfig, ConfigError, Palette};
use crate::heatmap::Heatmap;
use crate::layout::GridLayout;

/// Paints a [`Heatmap`] as a grid of filled rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapRenderer {
    layout: GridLayout,
    palette: Palette,
    background: Rgb565,
}

impl HeatmapRenderer {
    pub fn new(layout: GridLayout, palette: Palette, background: Rgb565) -> Self {
        Self {
            layout,
            palette,
            background,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let layout = GridLayout::new(config.display.size(), config.sensor.resolution)?;
        Ok(Self::new(
            layout,
            config.heatmap.palette,
            config.display.background,
        ))
    }

    /// Fills the whole target with the background color.
    pub fn clear<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.clear(self.background)
    }

    /// Repaints every cell of the grid.
    ///
    /// Only the grid area is touched; anything outside it keeps whatever
    /// [`clear`](Self::clear) left there.
    pub fn draw<D>(&self, heatmap: &Heatmap, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        for (row, col, area) in self.layout.cells() {
            let color = heatmap
                .get(row, col)
                .map_or(self.background, |value| self.palette.color(value));
            target.fill_solid(&area, color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::Rgb888;

    use super::*;
    use crate::config::{HeatmapConfig, Resolution};
    use crate::frame::RangingFrame;

    fn renderer(size: u32, resolution: Resolution, palette: Palette) -> HeatmapRenderer {
        let layout = GridLayout::new(Size::new(size, size), resolution).unwrap();
        HeatmapRenderer::new(layout, palette, Rgb565::BLUE)
    }

    #[test]
    fn test_draws_each_cell_with_its_color() {
        let renderer = renderer(16, Resolution::Res4x4, Palette::Red);
        let mut frame = RangingFrame::new(Resolution::Res4x4);
        frame.distance_mm[..16].fill(750);
        frame.distance_mm[5] = 0; // row 1, col 1
        let heatmap = Heatmap::from_frame(&frame, &HeatmapConfig::default());

        let mut display = MockDisplay::<Rgb565>::new();
        renderer.draw(&heatmap, &mut display).unwrap();

        // Cells are 4x4 pixels.
        assert_eq!(display.get_pixel(Point::new(4, 4)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(7, 7)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(8, 4)), Some(Rgb565::BLACK));
        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::BLACK));
        assert_eq!(display.get_pixel(Point::new(15, 15)), Some(Rgb565::BLACK));
        assert_eq!(display.get_pixel(Point::new(16, 0)), None);
    }

    #[test]
    fn test_masked_cells_use_background() {
        let renderer = renderer(8, Resolution::Res4x4, Palette::Grayscale);
        let mut frame = RangingFrame::new(Resolution::Res4x4);
        frame.target_status[..16].fill(5);
        frame.target_status[0] = 0;
        let config = HeatmapConfig {
            mask_invalid_zones: true,
            ..HeatmapConfig::default()
        };
        let heatmap = Heatmap::from_frame(&frame, &config);

        let mut display = MockDisplay::<Rgb565>::new();
        renderer.draw(&heatmap, &mut display).unwrap();

        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::BLUE));
        assert_eq!(display.get_pixel(Point::new(2, 0)), Some(Rgb565::WHITE));
    }

    #[test]
    fn test_clear_then_draw_leaves_margin_as_background() {
        // 18 / 4 = 4 px cells, so columns and rows 16-17 stay background.
        let layout = GridLayout::new(Size::new(18, 18), Resolution::Res4x4).unwrap();
        let renderer = HeatmapRenderer::new(layout, Palette::Red, Rgb565::from(Rgb888::new(40, 40, 40)));
        let heatmap = Heatmap::from_frame(
            &RangingFrame::new(Resolution::Res4x4),
            &HeatmapConfig::default(),
        );

        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        renderer.clear(&mut display).unwrap();
        renderer.draw(&heatmap, &mut display).unwrap();

        let background = Rgb565::from(Rgb888::new(40, 40, 40));
        assert_eq!(display.get_pixel(Point::new(15, 15)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(16, 3)), Some(background));
        assert_eq!(display.get_pixel(Point::new(3, 17)), Some(background));
    }
}
