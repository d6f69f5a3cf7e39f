//! Sensor, heatmap and display settings.
//!
//! The defaults reproduce the stock demo: an 8x8 grid at 15 Hz, distances
//! up to 750 mm mapped onto the red channel, drawn on a 240x240 panel.

use core::fmt;

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;

/// Default 7-bit I2C address of the VL53L5CX.
pub const DEFAULT_SENSOR_ADDRESS: u8 = 0x29;

/// Distance that maps to the darkest cell.
pub const DEFAULT_MAX_DISTANCE_MM: u16 = 750;

/// Number of distance zones the sensor reports per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 16 zones, up to 60 Hz.
    Res4x4,
    /// 64 zones, up to 15 Hz.
    Res8x8,
}

impl Resolution {
    /// Zones along one side of the grid.
    pub const fn width(self) -> usize {
        match self {
            Resolution::Res4x4 => 4,
            Resolution::Res8x8 => 8,
        }
    }

    pub const fn zones(self) -> usize {
        self.width() * self.width()
    }

    /// Highest ranging frequency the sensor accepts at this resolution.
    pub const fn max_frequency_hz(self) -> u8 {
        match self {
            Resolution::Res4x4 => 60,
            Resolution::Res8x8 => 15,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.width())
    }
}

/// A ranging frequency that is known to be valid for a given resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangingFrequency(u8);

impl RangingFrequency {
    /// Accepts `1..=resolution.max_frequency_hz()`.
    pub fn new(resolution: Resolution, hz: u8) -> Result<Self, ConfigError> {
        let max = resolution.max_frequency_hz();
        if hz == 0 || hz > max {
            return Err(ConfigError::FrequencyOutOfRange {
                resolution,
                requested: hz,
                max,
            });
        }
        Ok(Self(hz))
    }

    /// Fastest rate for `resolution`.
    pub const fn max_for(resolution: Resolution) -> Self {
        Self(resolution.max_frequency_hz())
    }

    pub const fn hz(self) -> u8 {
        self.0
    }
}

/// How the sensor is set up before ranging starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    pub resolution: Resolution,
    pub frequency: RangingFrequency,
    pub address: u8,
}

impl SensorConfig {
    pub fn new(resolution: Resolution, frequency_hz: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            resolution,
            frequency: RangingFrequency::new(resolution, frequency_hz)?,
            address: DEFAULT_SENSOR_ADDRESS,
        })
    }

    /// Checks the frequency against the resolution.
    ///
    /// The fields are public, so a frequency built for 4x4 can end up paired
    /// with 8x8.
    pub fn validate(&self) -> Result<(), ConfigError> {
        RangingFrequency::new(self.resolution, self.frequency.hz()).map(|_| ())
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::Res8x8,
            frequency: RangingFrequency::max_for(Resolution::Res8x8),
            address: DEFAULT_SENSOR_ADDRESS,
        }
    }
}

/// Maps a cell intensity (`0` = far, `255` = near) to a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Palette {
    /// Intensity on the red channel only.
    #[default]
    Red,
    /// Intensity on all three channels.
    Grayscale,
}

impl Palette {
    pub fn color(self, intensity: u8) -> Rgb565 {
        let rgb = match self {
            Palette::Red => Rgb888::new(intensity, 0, 0),
            Palette::Grayscale => Rgb888::new(intensity, intensity, intensity),
        };
        Rgb565::from(rgb)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeatmapConfig {
    /// Readings at or beyond this distance are drawn darkest.
    pub max_distance_mm: u16,
    pub palette: Palette,
    /// Draw zones without a valid target as background instead of a color.
    pub mask_invalid_zones: bool,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            max_distance_mm: DEFAULT_MAX_DISTANCE_MM,
            palette: Palette::Red,
            mask_invalid_zones: false,
        }
    }
}

impl HeatmapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_distance_mm == 0 {
            return Err(ConfigError::ZeroMaxDistance);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgb565,
}

impl DisplayConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 240,
            background: Rgb565::from(Rgb888::new(40, 40, 40)),
        }
    }
}

/// Everything the polling loop needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub sensor: SensorConfig,
    pub heatmap: HeatmapConfig,
    pub display: DisplayConfig,
    /// Pause between polls. `0` polls in a tight loop.
    pub poll_interval_ms: u32,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sensor.validate()?;
        self.heatmap.validate()?;
        let grid = self.sensor.resolution.width() as u32;
        if self.display.width < grid || self.display.height < grid {
            return Err(ConfigError::DisplayTooSmall {
                width: self.display.width,
                height: self.display.height,
                grid: self.sensor.resolution,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Ranging frequency outside `1..=max` for the resolution.
    FrequencyOutOfRange {
        resolution: Resolution,
        requested: u8,
        max: u8,
    },
    ZeroMaxDistance,
    /// The display has fewer pixels than the grid has cells on some axis.
    DisplayTooSmall {
        width: u32,
        height: u32,
        grid: Resolution,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FrequencyOutOfRange {
                resolution,
                requested,
                max,
            } => write!(
                f,
                "ranging frequency {requested} Hz out of range for {resolution} (1-{max} Hz)"
            ),
            ConfigError::ZeroMaxDistance => write!(f, "max distance must be non-zero"),
            ConfigError::DisplayTooSmall {
                width,
                height,
                grid,
            } => write!(f, "{width}x{height} display cannot hold a {grid} grid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_limits_follow_resolution() {
        assert!(RangingFrequency::new(Resolution::Res8x8, 15).is_ok());
        assert!(RangingFrequency::new(Resolution::Res4x4, 60).is_ok());
        assert!(RangingFrequency::new(Resolution::Res4x4, 1).is_ok());

        assert_eq!(
            RangingFrequency::new(Resolution::Res8x8, 16),
            Err(ConfigError::FrequencyOutOfRange {
                resolution: Resolution::Res8x8,
                requested: 16,
                max: 15,
            })
        );
        assert!(RangingFrequency::new(Resolution::Res4x4, 0).is_err());
        assert!(RangingFrequency::new(Resolution::Res4x4, 61).is_err());
    }

    #[test]
    fn test_default_matches_stock_demo() {
        let config = AppConfig::default();
        assert_eq!(config.sensor.resolution, Resolution::Res8x8);
        assert_eq!(config.sensor.frequency.hz(), 15);
        assert_eq!(config.sensor.address, 0x29);
        assert_eq!(config.heatmap.max_distance_mm, 750);
        assert_eq!(config.display.size(), Size::new(240, 240));
        assert_eq!(config.poll_interval_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mismatched_frequency_is_caught() {
        let mut config = AppConfig::default();
        config.sensor.frequency = RangingFrequency::max_for(Resolution::Res4x4);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FrequencyOutOfRange { requested: 60, .. })
        ));
    }

    #[test]
    fn test_display_must_fit_grid() {
        let mut config = AppConfig::default();
        config.display.width = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DisplayTooSmall { width: 7, .. })
        ));

        config.sensor = SensorConfig::new(Resolution::Res4x4, 60).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_max_distance_rejected() {
        let config = HeatmapConfig {
            max_distance_mm: 0,
            ..HeatmapConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxDistance));
    }

    #[test]
    fn test_palette_channels() {
        assert_eq!(Palette::Red.color(255), Rgb565::RED);
        assert_eq!(Palette::Red.color(0), Rgb565::BLACK);
        assert_eq!(Palette::Grayscale.color(255), Rgb565::WHITE);

        let gray = Palette::Grayscale.color(128);
        assert_eq!(gray.r(), gray.b());
        assert!(gray.g() > 0);
    }
}
