//! # VL53L5CX Distance Heatmap for Raspberry Pi Pico 2
//!
//! Reads the 8x8 (or 4x4) distance grid of a VL53L5CX time-of-flight sensor over
//! I2C0 and draws it as a red heatmap on a 240x240 ST7789 LCD over SPI0.
//! Near objects are bright red, anything at 750 mm or further is black.
//!
//! ## Hardware
//!
//! - **Sensor:** VL53L5CX 8x8 Time-of-Flight breakout (e.g., Pimoroni PIM520)
//! - **Display:** 1.3" 240x240 SPI LCD with ST7789 controller (e.g., Pimoroni PIM543)
//! - **I2C Address:** 0x29 (default)
//!
//! The VL53L5CX has no flash of its own. The driver uploads its firmware
//! (~90KB) over I2C on every boot, so start-up time depends on the bus speed.
//!
//! ## Wiring
//!
//! ```
//!      VL53L5CX Sensor -> RPi Pico 2
//! (black)  GND -> GND
//! (red)    VCC -> 3.3V
//! (yellow) SCL -> GPIO5 (Pin 7)
//! (blue)   SDA -> GPIO4 (Pin 6)
//!
//!      ST7789 LCD -> RPi Pico 2
//!          GND -> GND
//!          VCC -> 3.3V
//!          CS  -> GPIO17 (Pin 22)
//!          SCK -> GPIO18 (Pin 24)
//!          SDA -> GPIO19 (Pin 25) (MOSI)
//!          DC  -> GPIO16 (Pin 21)
//!          BL  -> GPIO20 (Pin 26)
//! ```
//!
//! These are the Breakout Garden pins, so both breakouts plug straight in.
//!
//! Run with `cargo flash`.

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use defmt::*;
use display_interface_spi::SPIInterface;
use embedded_hal::digital::OutputPin;
use embedded_hal_bus::spi::ExclusiveDevice;
use hal::I2C;
use hal::Sio;
use hal::Timer;
use hal::Watchdog;
use hal::clocks::ClockSource;
use hal::clocks::init_clocks_and_plls;
use hal::fugit::RateExtU32;
use hal::gpio::{FunctionI2C, FunctionSpi, Pin};
use hal::pac;
use mipidsi::{Builder, models::ST7789, options::ColorInversion};
use rp235x_hal as hal;

use hal::block::ImageDef;

use tof_heatmap::config::{
    AppConfig, DEFAULT_SENSOR_ADDRESS, DisplayConfig, RangingFrequency, Resolution, SensorConfig,
};
use tof_heatmap::HeatmapApp;
use tof_heatmap::vl53l5cx::Vl53l5cxSensor;

/// Tell the Boot ROM about our application
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

/// 8x8 runs at up to 15 Hz, 4x4 at up to 60 Hz
const RESOLUTION: Resolution = Resolution::Res8x8;

/// Firmware upload time scales with this. 1 MHz is the RP2350's Fast-mode Plus
/// limit; drop to 400 kHz if the sensor is on a long cable.
const I2C_FREQ_KHZ: u32 = 1_000;

const DISPLAY_WIDTH: u16 = 240;
const DISPLAY_HEIGHT: u16 = 240;

#[hal::entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let sio = Sio::new(pac.SIO);

    // External high-speed crystal on the pico board is 12Mhz
    let external_xtal_freq_hz = 12_000_000u32;
    let clocks = init_clocks_and_plls(
        external_xtal_freq_hz,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let sensor_timer = Timer::new_timer0(pac.TIMER0, &mut pac.RESETS, &clocks);

    let mut timer = Timer::new_timer1(pac.TIMER1, &mut pac.RESETS, &clocks);

    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // Applied before ranging starts; 8x8 is limited to 15 Hz
    let config = AppConfig {
        sensor: SensorConfig {
            resolution: RESOLUTION,
            frequency: RangingFrequency::max_for(RESOLUTION),
            address: DEFAULT_SENSOR_ADDRESS,
        },
        display: DisplayConfig {
            width: u32::from(DISPLAY_WIDTH),
            height: u32::from(DISPLAY_HEIGHT),
            ..DisplayConfig::default()
        },
        ..AppConfig::default()
    };

    // Display setup

    info!("Initializing ST7789 LCD display (240x240)...");

    let sclk: Pin<_, FunctionSpi, _> = pins.gpio18.into_function::<FunctionSpi>();
    let mosi: Pin<_, FunctionSpi, _> = pins.gpio19.into_function::<FunctionSpi>();

    let cs = pins.gpio17.into_push_pull_output(); // CS - Chip Select
    let dc = pins.gpio16.into_push_pull_output(); // DC - Data/Command
    let mut backlight = pins.gpio20.into_push_pull_output(); // BL - Backlight

    // The breakout has no reset line; mipidsi falls back to a software reset.
    let spi = hal::Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, sclk)).init(
        &mut pac.RESETS,
        clocks.peripheral_clock.get_freq(),
        62_500_000.Hz(),
        embedded_hal::spi::MODE_0,
    );

    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();

    let di = SPIInterface::new(spi_device, dc);

    let display = Builder::new(ST7789, di)
        .display_size(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        .invert_colors(ColorInversion::Inverted)
        .init(&mut timer)
        .unwrap();

    let _ = backlight.set_high();

    info!("Display initialized!");

    // Sensor setup

    let sda_pin: Pin<_, FunctionI2C, _> = pins.gpio4.reconfigure();
    let scl_pin: Pin<_, FunctionI2C, _> = pins.gpio5.reconfigure();

    let i2c = I2C::i2c0(
        pac.I2C0,
        sda_pin,
        scl_pin,
        I2C_FREQ_KHZ.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );

    info!("Starting up sensor...");

    let started = timer.get_counter();

    let mut sensor = match Vl53l5cxSensor::new(i2c, sensor_timer, config.sensor.address) {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("Failed to initialize VL53L5CX: {:?}", Debug2Format(&e));
            halt();
        }
    };

    info!("Done in {}ms...", (timer.get_counter() - started).to_millis());

    match sensor.is_alive() {
        Ok(true) => info!("VL53L5CX detected at 0x{=u8:X}", config.sensor.address),
        Ok(false) => {
            error!("Unexpected device ID at 0x{=u8:X}", config.sensor.address);
            halt();
        }
        Err(e) => {
            error!("Failed to read device ID: {:?}", Debug2Format(&e));
            halt();
        }
    }

    let mut app = match HeatmapApp::start(sensor, display, config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start ranging: {:?}", Debug2Format(&e));
            halt();
        }
    };

    app.run(&mut timer)
}

fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
