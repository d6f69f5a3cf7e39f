use crate::config::Resolution;

/// Zones in the largest (8x8) frame.
pub const MAX_ZONES: usize = 64;

/// Target status codes ST documents as a valid range measurement.
const VALID_TARGET_STATUS: [u8; 2] = [5, 9];

/// One frame of per-zone readings.
///
/// Zones are stored row-major, `row * width + col`. Entries past
/// `resolution.zones()` are unused and stay zero.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangingFrame {
    pub resolution: Resolution,
    pub distance_mm: [i16; MAX_ZONES],
    /// Estimated target reflectance, in percent.
    pub reflectance: [u8; MAX_ZONES],
    pub target_status: [u8; MAX_ZONES],
}

impl RangingFrame {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            distance_mm: [0; MAX_ZONES],
            reflectance: [0; MAX_ZONES],
            target_status: [0; MAX_ZONES],
        }
    }

    pub fn zones(&self) -> usize {
        self.resolution.zones()
    }

    pub fn zone_index(&self, row: usize, col: usize) -> usize {
        row * self.resolution.width() + col
    }

    pub fn distance(&self, zone: usize) -> i16 {
        self.distance_mm[zone]
    }

    pub fn reflectance(&self, zone: usize) -> u8 {
        self.reflectance[zone]
    }

    pub fn is_valid(&self, zone: usize) -> bool {
        VALID_TARGET_STATUS.contains(&self.target_status[zone])
    }

    /// Integer mean distance over the active zones.
    pub fn distance_avg(&self) -> i16 {
        let zones = self.zones();
        let sum: i32 = self.distance_mm[..zones].iter().map(|&d| i32::from(d)).sum();
        (sum / zones as i32) as i16
    }

    /// Integer mean reflectance over the active zones.
    pub fn reflectance_avg(&self) -> u8 {
        let zones = self.zones();
        let sum: u32 = self.reflectance[..zones].iter().map(|&r| u32::from(r)).sum();
        (sum / zones as u32) as u8
    }
}
