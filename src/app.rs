//! The configure, poll, map, draw loop.

use core::fmt::Debug;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;

use crate::config::AppConfig;
use crate::error::Error;
use crate::fmt::Debug2Format;
use crate::heatmap::Heatmap;
use crate::render::HeatmapRenderer;
use crate::sensor::{self, RangingSensor};

/// What a drawn frame looked like, for logging and callers that want it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameSummary {
    /// 1-based count of frames drawn so far.
    pub frame: u32,
    /// First zone's distance.
    pub distance_mm: i16,
    /// First zone's reflectance, in percent.
    pub reflectance: u8,
    pub distance_avg: i16,
    pub reflectance_avg: u8,
}

/// Owns the sensor and the display and moves frames from one to the other.
pub struct HeatmapApp<S, D> {
    sensor: S,
    display: D,
    renderer: HeatmapRenderer,
    config: AppConfig,
    frames: u32,
}

impl<S, D> HeatmapApp<S, D>
where
    S: RangingSensor,
    D: DrawTarget<Color = Rgb565>,
    D::Error: Debug,
{
    /// Configures the sensor, starts ranging and paints the background.
    pub fn start(mut sensor: S, mut display: D, config: AppConfig) -> Result<Self, Error<S::Error, D::Error>> {
        config.validate()?;
        let renderer = HeatmapRenderer::from_config(&config)?;

        sensor::configure(&mut sensor, &config.sensor).map_err(Error::Sensor)?;
        renderer.clear(&mut display).map_err(Error::Display)?;

        Ok(Self {
            sensor,
            display,
            renderer,
            config,
            frames: 0,
        })
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Draws the next frame if the sensor has one.
    pub fn poll(&mut self) -> Result<Option<FrameSummary>, Error<S::Error, D::Error>> {
        if !self.sensor.data_ready().map_err(Error::Sensor)? {
            return Ok(None);
        }

        let frame = self.sensor.read_frame().map_err(Error::Sensor)?;
        let heatmap = Heatmap::from_frame(&frame, &self.config.heatmap);
        trace!("Intensity matrix: {}", heatmap.intensities());

        self.renderer
            .draw(&heatmap, &mut self.display)
            .map_err(Error::Display)?;
        self.frames = self.frames.wrapping_add(1);

        let summary = FrameSummary {
            frame: self.frames,
            distance_mm: frame.distance(0),
            reflectance: frame.reflectance(0),
            distance_avg: frame.distance_avg(),
            reflectance_avg: frame.reflectance_avg(),
        };
        info!(
            "{}mm {}% (avg: {}mm {}%)",
            summary.distance_mm,
            summary.reflectance,
            summary.distance_avg,
            summary.reflectance_avg
        );
        Ok(Some(summary))
    }

    /// Polls forever. A failed frame is logged and skipped.
    pub fn run<T: DelayNs>(&mut self, delay: &mut T) -> ! {
        info!("Entering heatmap loop");
        loop {
            self.step(delay);
        }
    }

    /// One iteration of [`run`](Self::run): poll, log any failure, wait.
    pub fn step<T: DelayNs>(&mut self, delay: &mut T) -> Option<FrameSummary> {
        let summary = match self.poll() {
            Ok(summary) => summary,
            Err(e) => {
                error!("Frame update failed: {}", Debug2Format(&e));
                None
            }
        };
        self.wait(delay);
        summary
    }

    /// Blocks until `count` more frames have been drawn and returns the last
    /// one, or `None` for a count of zero. Stops at the first error.
    pub fn run_frames<T: DelayNs>(
        &mut self,
        delay: &mut T,
        count: u32,
    ) -> Result<Option<FrameSummary>, Error<S::Error, D::Error>> {
        let mut last = None;
        let mut drawn = 0;
        while drawn < count {
            if let Some(summary) = self.poll()? {
                last = Some(summary);
                drawn += 1;
            }
            self.wait(delay);
        }
        Ok(last)
    }

    fn wait<T: DelayNs>(&self, delay: &mut T) {
        if self.config.poll_interval_ms > 0 {
            delay.delay_ms(self.config.poll_interval_ms);
        }
    }

    /// Stops ranging and hands the peripherals back.
    pub fn stop(mut self) -> Result<(S, D), Error<S::Error, D::Error>> {
        self.sensor.stop_ranging().map_err(Error::Sensor)?;
        info!("Ranging stopped after {} frames", self.frames);
        Ok((self.sensor, self.display))
    }
}
