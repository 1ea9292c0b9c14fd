//! Accelerometer task
//!
//! Owns the LIS3DH and serves both feeds from one loop, so the I2C bus has
//! a single user. Batches are drained from the FIFO once per batch period
//! and only ever forwarded whole; a FIFO still short of a batch is polled
//! again one sample period later. The latched click source is polled at a
//! fixed interval.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Timer};

use glance_core::config::SamplingConfig;
use glance_drivers::sensor::Lis3dh;

use crate::channels::{FeedCommand, BATCH_CHANNEL, FEED_CMD, TAP_CHANNEL};

/// Click source poll interval in milliseconds
pub const TAP_POLL_MS: u64 = 50;

/// The accelerometer's bus
pub type AccelBus = I2c<'static, I2C0, Async>;

fn batch_period(sampling: &SamplingConfig) -> Duration {
    Duration::from_millis(sampling.batch_period_ms().max(1) as u64)
}

fn sample_period(sampling: &SamplingConfig) -> Duration {
    Duration::from_millis((1000 / sampling.rate_hz.max(1) as u64).max(1))
}

/// Accelerometer task - feeds batches and taps to the glance task
#[embassy_executor::task]
pub async fn accel_task(mut accel: Lis3dh<AccelBus>) {
    info!("Accel task started");

    if let Err(e) = accel.init().await {
        error!("Accelerometer init failed: {:?}", e);
        return;
    }
    info!("LIS3DH ready at 0x{:02x}", accel.config().address);

    let mut sampling: Option<SamplingConfig> = None;
    let mut next_batch = Instant::MAX;
    let mut next_tap = Instant::MAX;

    loop {
        match select(FEED_CMD.receive(), Timer::at(next_batch.min(next_tap))).await {
            Either::First(cmd) => {
                debug!("Feed command: {:?}", cmd);
                let result = match cmd {
                    FeedCommand::StartAccel(cfg) => {
                        sampling = Some(cfg);
                        next_batch = Instant::now() + batch_period(&cfg);
                        accel.start_sampling(cfg).await
                    }
                    FeedCommand::StopAccel => {
                        sampling = None;
                        next_batch = Instant::MAX;
                        accel.stop_sampling().await
                    }
                    FeedCommand::StartTaps => {
                        next_tap = Instant::now() + Duration::from_millis(TAP_POLL_MS);
                        accel.enable_taps().await
                    }
                    FeedCommand::StopTaps => {
                        next_tap = Instant::MAX;
                        accel.disable_taps().await
                    }
                };
                if let Err(e) = result {
                    warn!("Feed command {:?} failed: {:?}", cmd, e);
                }
            }

            Either::Second(()) => {
                let now = Instant::now();

                if let Some(cfg) = sampling {
                    if now >= next_batch {
                        next_batch += batch_period(&cfg);
                        match accel.read_batch(cfg.batch_size as usize).await {
                            Ok(batch) if batch.is_empty() => {
                                trace!("FIFO short of a batch, retrying");
                                next_batch = now + sample_period(&cfg);
                            }
                            Ok(batch) => {
                                trace!("Batch of {} samples", batch.len());
                                if BATCH_CHANNEL.try_send(batch).is_err() {
                                    warn!("Batch channel full, batch dropped");
                                }
                            }
                            Err(e) => warn!("FIFO read failed: {:?}", e),
                        }
                    }
                }

                if next_tap != Instant::MAX && now >= next_tap {
                    next_tap += Duration::from_millis(TAP_POLL_MS);
                    match accel.read_tap().await {
                        Ok(Some(tap)) => {
                            if TAP_CHANNEL.try_send(tap).is_err() {
                                warn!("Tap channel full, tap dropped");
                            }
                        }
                        Ok(None) => {}
                        Err(e) => warn!("Click read failed: {:?}", e),
                    }
                }
            }
        }
    }
}
