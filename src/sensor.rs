//! The boundary between the heatmap loop and a multizone ranging driver.

use crate::config::{Resolution, SensorConfig};
use crate::frame::RangingFrame;

/// Operations the heatmap needs from a multizone time-of-flight sensor.
///
/// The driver owns firmware upload, bus traffic and result decoding. Settings
/// only take effect if applied before [`start_ranging`](Self::start_ranging).
pub trait RangingSensor {
    type Error: core::fmt::Debug;

    fn set_resolution(&mut self, resolution: Resolution) -> Result<(), Self::Error>;

    /// `hz` must be within the limit for the current resolution.
    fn set_ranging_frequency_hz(&mut self, hz: u8) -> Result<(), Self::Error>;

    fn start_ranging(&mut self) -> Result<(), Self::Error>;

    fn stop_ranging(&mut self) -> Result<(), Self::Error>;

    /// Whether a new frame can be read.
    fn data_ready(&mut self) -> Result<bool, Self::Error>;

    /// Reads the latest frame. Call after [`data_ready`](Self::data_ready)
    /// returns `true`.
    fn read_frame(&mut self) -> Result<RangingFrame, Self::Error>;
}

/// Applies `config` and starts ranging.
///
/// Resolution goes first since it bounds the frequency the sensor accepts.
pub fn configure<S: RangingSensor>(sensor: &mut S, config: &SensorConfig) -> Result<(), S::Error> {
    debug!("Setting resolution to {}", config.resolution);
    sensor.set_resolution(config.resolution)?;

    debug!("Setting ranging frequency to {} Hz", config.frequency.hz());
    sensor.set_ranging_frequency_hz(config.frequency.hz())?;

    sensor.start_ranging()?;
    info!(
        "Ranging started ({} @ {} Hz)",
        config.resolution,
        config.frequency.hz()
    );
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::mock::{Call, MockSensor};
    use super::*;

    #[test]
    fn test_configure_applies_settings_before_start() {
        let mut sensor = MockSensor::default();
        let config = SensorConfig::new(Resolution::Res4x4, 60).unwrap();

        configure(&mut sensor, &config).unwrap();

        assert_eq!(
            sensor.calls,
            [
                Call::SetResolution(Resolution::Res4x4),
                Call::SetFrequency(60),
                Call::Start,
            ]
        );
    }

    #[test]
    fn test_configure_propagates_start_failure() {
        let mut sensor = MockSensor::failing_start();

        assert!(configure(&mut sensor, &SensorConfig::default()).is_err());
        assert_eq!(sensor.calls.len(), 2);
    }
}
