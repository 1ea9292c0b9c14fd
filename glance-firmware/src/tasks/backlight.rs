//! Backlight task
//!
//! Applies light commands in order and ends interactive holds.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant, Timer};

use glance_core::traits::Backlight;
use glance_drivers::output::GpioBacklight;

use crate::channels::{LightCommand, LIGHT_CMD};

/// Backlight task - owns the backlight pin
#[embassy_executor::task]
pub async fn backlight_task(mut light: GpioBacklight<Output<'static>>) {
    info!("Backlight task started");

    // Generation and deadline of the running interactive hold
    let mut hold: Option<(u32, Instant)> = None;

    loop {
        let wake = hold.map(|(_, at)| at).unwrap_or(Instant::MAX);

        match select(LIGHT_CMD.receive(), Timer::at(wake)).await {
            Either::First(cmd) => {
                trace!("Light: {:?}", cmd);
                match cmd {
                    LightCommand::On => {
                        light.set_on(true);
                        hold = None;
                    }
                    LightCommand::Off => {
                        light.set_on(false);
                        hold = None;
                    }
                    LightCommand::Pulse => {
                        light.pulse_interactive();
                        let until = Instant::now() + Duration::from_millis(light.hold_ms() as u64);
                        hold = Some((light.generation(), until));
                    }
                }
            }
            Either::Second(()) => {
                if let Some((generation, _)) = hold.take() {
                    if light.release(generation) {
                        trace!("Backlight hold expired");
                    }
                }
            }
        }
    }
}
