//! Button task
//!
//! A press toggles glance detection on and off.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use crate::channels::TOGGLE_SIGNAL;

/// Debounce delay in milliseconds
const DEBOUNCE_MS: u64 = 30;

/// Button task - active-low push button with pull-up
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>) {
    info!("Button task started");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after_millis(DEBOUNCE_MS).await;

        if button.is_low() {
            debug!("Button pressed");
            TOGGLE_SIGNAL.signal(());
            button.wait_for_high().await;
        }
    }
}
