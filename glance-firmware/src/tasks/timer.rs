//! One-shot timer task
//!
//! Keeps the deadlines requested through the platform and reports each
//! expired handle back to the glance task, which runs it on the same loop
//! as sensor input.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};
use heapless::Vec;

use glance_core::traits::TimerHandle;

use crate::channels::{TimerCommand, TIMER_CMD, TIMER_FIRED};

/// Concurrent timers (the engine uses at most two)
const MAX_TIMERS: usize = 4;

/// Timer task - fires scheduled handles
#[embassy_executor::task]
pub async fn timer_task() {
    info!("Timer task started");

    let mut pending: Vec<(TimerHandle, Instant), MAX_TIMERS> = Vec::new();

    loop {
        let next = pending
            .iter()
            .map(|(_, deadline)| *deadline)
            .min()
            .unwrap_or(Instant::MAX);

        match select(TIMER_CMD.receive(), Timer::at(next)).await {
            Either::First(TimerCommand::Schedule { handle, deadline }) => {
                if pending.push((handle, deadline)).is_err() {
                    warn!("Timer table full, {} dropped", handle);
                }
            }
            Either::First(TimerCommand::Cancel(handle)) => {
                pending.retain(|(h, _)| *h != handle);
            }
            Either::Second(()) => {
                let now = Instant::now();
                while let Some(idx) = pending.iter().position(|(_, d)| *d <= now) {
                    let (handle, _) = pending.swap_remove(idx);
                    trace!("Timer {} fired", handle);
                    if TIMER_FIRED.try_send(handle).is_err() {
                        warn!("Timer channel full, {} lost", handle);
                    }
                }
            }
        }
    }
}
