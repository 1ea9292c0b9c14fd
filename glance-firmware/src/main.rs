//! Glance - Wrist-Glance Detection Firmware
//!
//! Main firmware binary for RP2040-based wrist devices. Watches the
//! accelerometer for the raise-and-look gesture and lights the display
//! while the wearer is looking at it.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::I2C0;
use {defmt_rtt as _, panic_probe as _};

use glance_drivers::output::backlight::DEFAULT_HOLD_MS;
use glance_drivers::output::{GpioBacklight, VibeMotor};
use glance_drivers::sensor::{Lis3dh, Lis3dhConfig};

mod channels;
mod config;
mod platform;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

/// Accelerometer I2C clock
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Glance firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    info!("Configuration loaded");

    // Accelerometer on I2C0 (SDA=GPIO4, SCL=GPIO5)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let bus = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let accel = Lis3dh::new(bus, Lis3dhConfig::default());

    // Backlight enable (GPIO25), vibration motor (GPIO15), button (GPIO14)
    let backlight = GpioBacklight::new(Output::new(p.PIN_25, Level::Low), false, DEFAULT_HOLD_MS);
    let vibe = VibeMotor::new(Output::new(p.PIN_15, Level::Low));
    let button = Input::new(p.PIN_14, Pull::Up);

    info!("Outputs initialized");

    // Spawn tasks
    spawner.spawn(tasks::timer_task()).unwrap();
    spawner.spawn(tasks::accel_task(accel)).unwrap();
    spawner.spawn(tasks::backlight_task(backlight)).unwrap();
    spawner.spawn(tasks::vibe_task(vibe)).unwrap();
    spawner.spawn(tasks::button_task(button)).unwrap();
    spawner.spawn(tasks::glance_task(config)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
