//! Vibration task

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Timer;

use glance_core::traits::Haptics;
use glance_drivers::output::VibeMotor;

use crate::channels::VIBE_SIGNAL;

/// Vibration task - plays the double pulse on request
#[embassy_executor::task]
pub async fn vibe_task(mut motor: VibeMotor<Output<'static>>) {
    info!("Vibe task started");

    loop {
        VIBE_SIGNAL.wait().await;
        motor.vibrate_double_pulse();

        let mut segment = motor.segment_ms();
        while let Some(ms) = segment {
            Timer::after_millis(ms as u64).await;
            segment = motor.advance();
        }
    }
}
