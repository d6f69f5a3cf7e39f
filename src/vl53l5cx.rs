//! [`RangingSensor`] on top of the ST Ultra Lite Driver wrapper.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use vl53l5cx_driver::{DriverError, Vl53l5cx};

use crate::config::Resolution;
use crate::frame::RangingFrame;
use crate::sensor::RangingSensor;

/// A VL53L5CX with its firmware loaded.
pub struct Vl53l5cxSensor<'a, I, D>
where
    I: I2c<SevenBitAddress> + 'a,
    D: DelayNs + 'a,
{
    driver: Vl53l5cx<'a, I, D>,
    resolution: Resolution,
}

impl<'a, I, D> Vl53l5cxSensor<'a, I, D>
where
    I: I2c<SevenBitAddress> + 'a,
    D: DelayNs + 'a,
{
    /// Boots the sensor. This uploads roughly 90KB of firmware, so its
    /// duration scales with the bus speed.
    pub fn new(i2c: I, delay: D, address: u8) -> Result<Self, DriverError> {
        debug!("Uploading VL53L5CX firmware to 0x{=u8:X}", address);
        let driver = Vl53l5cx::new(i2c, delay, address)?;
        Ok(Self {
            driver,
            // The ULD boots in 4x4.
            resolution: Resolution::Res4x4,
        })
    }

    /// Checks the device and revision IDs.
    pub fn is_alive(&mut self) -> Result<bool, DriverError> {
        self.driver.is_alive()
    }
}

impl<'a, I, D> RangingSensor for Vl53l5cxSensor<'a, I, D>
where
    I: I2c<SevenBitAddress> + 'a,
    D: DelayNs + 'a,
{
    type Error = DriverError;

    fn set_resolution(&mut self, resolution: Resolution) -> Result<(), DriverError> {
        let raw = match resolution {
            Resolution::Res4x4 => vl53l5cx_driver::Resolution::Res4x4,
            Resolution::Res8x8 => vl53l5cx_driver::Resolution::Res8x8,
        };
        self.driver.set_resolution(raw)?;
        self.resolution = resolution;
        Ok(())
    }

    fn set_ranging_frequency_hz(&mut self, hz: u8) -> Result<(), DriverError> {
        self.driver.set_ranging_frequency_hz(hz)
    }

    fn start_ranging(&mut self) -> Result<(), DriverError> {
        self.driver.start_ranging()
    }

    fn stop_ranging(&mut self) -> Result<(), DriverError> {
        self.driver.stop_ranging()
    }

    fn data_ready(&mut self) -> Result<bool, DriverError> {
        self.driver.check_data_ready()
    }

    fn read_frame(&mut self) -> Result<RangingFrame, DriverError> {
        let results = self.driver.get_ranging_data()?;
        let mut frame = RangingFrame::new(self.resolution);
        let zones = frame.zones();

        // One target per zone, so result slots line up with zones.
        frame.distance_mm[..zones].copy_from_slice(&results.distance_mm[..zones]);
        frame.reflectance[..zones].copy_from_slice(&results.reflectance[..zones]);
        frame.target_status[..zones].copy_from_slice(&results.target_status[..zones]);
        Ok(frame)
    }
}
