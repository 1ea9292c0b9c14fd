//! Glance task
//!
//! Owns the glance service and is the single event loop for it: sample
//! batches, taps and expired timers are delivered here one at a time, so
//! the engine never sees concurrent callbacks.

use defmt::*;
use embassy_futures::select::{select4, Either4};

use glance_core::config::GlanceConfig;
use glance_core::engine::GlanceService;
use glance_core::state::GlanceState;

use crate::channels::{BATCH_CHANNEL, TAP_CHANNEL, TIMER_FIRED, TOGGLE_SIGNAL};
use crate::platform::BoardPlatform;

type Service = GlanceService<BoardPlatform, fn(GlanceState)>;

/// Glance task - runs the detector
#[embassy_executor::task]
pub async fn glance_task(config: GlanceConfig) {
    info!("Glance task started");

    let mut service: Service = GlanceService::new(BoardPlatform::new(), config);
    subscribe(&mut service);

    loop {
        match select4(
            BATCH_CHANNEL.receive(),
            TAP_CHANNEL.receive(),
            TIMER_FIRED.receive(),
            TOGGLE_SIGNAL.wait(),
        )
        .await
        {
            Either4::First(batch) => service.on_accel_batch(&batch),
            Either4::Second(tap) => service.on_tap(tap),
            Either4::Third(handle) => service.on_timer(handle),
            Either4::Fourth(()) => {
                if service.is_subscribed() {
                    match service.unsubscribe() {
                        Ok(()) => info!("Glance detection off"),
                        Err(e) => warn!("Unsubscribe failed: {:?}", e),
                    }
                } else {
                    subscribe(&mut service);
                }
            }
        }
    }
}

fn subscribe(service: &mut Service) {
    let options = service.config().subscribe_options();
    match service.subscribe(options, report_state) {
        Ok(()) => info!(
            "Glance detection on (timeout {}ms, backlight {})",
            options.timeout_ms, options.control_backlight
        ),
        Err(e) => error!("Glance subscribe failed: {:?}", e),
    }
}

fn report_state(state: GlanceState) {
    info!("Glance state: {:?}", state);
}
