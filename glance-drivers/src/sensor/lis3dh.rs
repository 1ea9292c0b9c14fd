//! LIS3DH accelerometer (I2C)
//!
//! 3-axis MEMS accelerometer with a 32-entry FIFO and click detection.
//! The driver keeps the part in high-resolution ±2 g mode, where one
//! output LSB (after the 4-bit left justification) is 1 mg, so samples map
//! directly onto the milli-g units the engine works in.
//!
//! # Feeds
//!
//! - Sample batches: FIFO in stream mode at the configured data rate. The
//!   caller polls [`Lis3dh::read_batch`] once per batch period and only
//!   ever gets full batches back; a partly filled FIFO is left queued.
//! - Taps: single-click detection on all three axes with a latched source
//!   register, polled through [`Lis3dh::read_tap`].
//!
//! Clicks need the sensor powered, so the output data rate is derived
//! from both feeds: the sampling rate while batches are enabled, the tap
//! rate while only taps are, and power-down otherwise.

use embedded_hal_async::i2c::I2c;
use glance_core::config::SamplingConfig;
use glance_core::sensor::{AccelSample, Axis, Batch, TapEvent, MAX_BATCH_SIZE};

/// LIS3DH register addresses
pub mod reg {
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0F;
    /// Data rate and axis enable
    pub const CTRL_REG1: u8 = 0x20;
    /// INT1 routing
    pub const CTRL_REG3: u8 = 0x22;
    /// Scale, resolution and block data update
    pub const CTRL_REG4: u8 = 0x23;
    /// FIFO enable
    pub const CTRL_REG5: u8 = 0x24;
    /// First output register (X low byte)
    pub const OUT_X_L: u8 = 0x28;
    /// FIFO mode and watermark
    pub const FIFO_CTRL_REG: u8 = 0x2E;
    /// FIFO status
    pub const FIFO_SRC_REG: u8 = 0x2F;
    /// Click axis enable
    pub const CLICK_CFG: u8 = 0x38;
    /// Click source (clears on read when latched)
    pub const CLICK_SRC: u8 = 0x39;
    /// Click threshold and latch
    pub const CLICK_THS: u8 = 0x3A;
    /// Maximum click duration
    pub const TIME_LIMIT: u8 = 0x3B;
    /// Quiet time after a click
    pub const TIME_LATENCY: u8 = 0x3C;
}

/// Expected WHO_AM_I value
pub const DEVICE_ID: u8 = 0x33;

/// Register auto-increment flag for multi-byte access
const AUTO_INCREMENT: u8 = 0x80;

const CTRL1_XYZ_EN: u8 = 0x07;
const CTRL3_I1_CLICK: u8 = 0x80;
const CTRL4_BDU: u8 = 0x80;
const CTRL4_HR: u8 = 0x08;
const CTRL5_FIFO_EN: u8 = 0x40;
const FIFO_MODE_STREAM: u8 = 0x80;
const FIFO_SRC_OVRN: u8 = 0x40;
const FIFO_SRC_EMPTY: u8 = 0x20;
const FIFO_SRC_FSS: u8 = 0x1F;
const CLICK_CFG_SINGLE_XYZ: u8 = 0x15;
const CLICK_THS_LIR: u8 = 0x80;
const CLICK_SRC_IA: u8 = 0x40;
const CLICK_SRC_SIGN: u8 = 0x08;

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lis3dhConfig {
    /// 7-bit I2C address (0x18 with SA0 low, 0x19 with SA0 high)
    pub address: u8,
    /// Negate X to match the watch face axes
    pub invert_x: bool,
    /// Negate Y to match the watch face axes
    pub invert_y: bool,
    /// Negate Z to match the watch face axes
    pub invert_z: bool,
    /// Click threshold (7 bits, 16 mg/LSB at ±2 g)
    pub click_threshold: u8,
    /// Maximum click duration in ODR periods
    pub click_time_limit: u8,
    /// Dead time after a click in ODR periods
    pub click_latency: u8,
    /// Output data rate used while only taps are enabled (Hz)
    pub tap_rate_hz: u16,
}

impl Default for Lis3dhConfig {
    fn default() -> Self {
        Self {
            address: 0x18,
            invert_x: false,
            invert_y: false,
            // Face-up must read -1 g on Z
            invert_z: true,
            click_threshold: 20,
            click_time_limit: 10,
            click_latency: 20,
            tap_rate_hz: 100,
        }
    }
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelError<E> {
    /// I2C transfer failed
    Bus(E),
    /// WHO_AM_I returned something other than [`DEVICE_ID`]
    UnknownDevice(u8),
}

/// Map a requested rate onto the lowest ODR setting that meets it
///
/// Returns the 4-bit ODR field; zero powers the sensor down.
pub fn odr_bits(rate_hz: u16) -> u8 {
    match rate_hz {
        0 => 0,
        1 => 1,
        2..=10 => 2,
        11..=25 => 3,
        26..=50 => 4,
        51..=100 => 5,
        101..=200 => 6,
        _ => 7,
    }
}

/// Decode one FIFO entry (X, Y, Z little-endian pairs) into milli-g
pub fn decode_sample(raw: &[u8; 6], config: &Lis3dhConfig) -> AccelSample {
    let axis = |lo: u8, hi: u8, invert: bool| {
        // 12-bit left-justified; arithmetic shift keeps the sign
        let mg = i16::from_le_bytes([lo, hi]) >> 4;
        if invert {
            -mg
        } else {
            mg
        }
    };

    AccelSample::new(
        axis(raw[0], raw[1], config.invert_x),
        axis(raw[2], raw[3], config.invert_y),
        axis(raw[4], raw[5], config.invert_z),
    )
}

/// Decode CLICK_SRC into a tap event
pub fn decode_click(src: u8, config: &Lis3dhConfig) -> Option<TapEvent> {
    if src & CLICK_SRC_IA == 0 {
        return None;
    }

    let (axis, invert) = if src & 0x01 != 0 {
        (Axis::X, config.invert_x)
    } else if src & 0x02 != 0 {
        (Axis::Y, config.invert_y)
    } else if src & 0x04 != 0 {
        (Axis::Z, config.invert_z)
    } else {
        return None;
    };

    let negative = (src & CLICK_SRC_SIGN != 0) != invert;
    Some(TapEvent::new(axis, if negative { -1 } else { 1 }))
}

/// LIS3DH driver
pub struct Lis3dh<I2C> {
    i2c: I2C,
    config: Lis3dhConfig,
    /// Sampling rate while the batch feed is running
    sampling_hz: Option<u16>,
    /// Click detection enabled
    taps: bool,
}

impl<I2C: I2c> Lis3dh<I2C> {
    /// Create a driver; call [`Lis3dh::init`] before use
    pub fn new(i2c: I2C, config: Lis3dhConfig) -> Self {
        Self {
            i2c,
            config,
            sampling_hz: None,
            taps: false,
        }
    }

    pub fn config(&self) -> &Lis3dhConfig {
        &self.config
    }

    pub fn is_sampling(&self) -> bool {
        self.sampling_hz.is_some()
    }

    pub fn taps_enabled(&self) -> bool {
        self.taps
    }

    /// Verify the part and put it in a known powered-down state
    pub async fn init(&mut self) -> Result<(), AccelError<I2C::Error>> {
        let id = self.read_reg(reg::WHO_AM_I).await?;
        if id != DEVICE_ID {
            return Err(AccelError::UnknownDevice(id));
        }

        self.write_reg(reg::CTRL_REG1, 0).await?;
        self.write_reg(reg::CTRL_REG3, 0).await?;
        self.write_reg(reg::CTRL_REG4, CTRL4_BDU | CTRL4_HR).await?;
        self.write_reg(reg::CTRL_REG5, 0).await?;
        self.write_reg(reg::CLICK_CFG, 0).await?;

        self.sampling_hz = None;
        self.taps = false;
        Ok(())
    }

    /// Start the batch feed
    ///
    /// Resets the FIFO so the first batch only holds fresh samples.
    pub async fn start_sampling(
        &mut self,
        sampling: SamplingConfig,
    ) -> Result<(), AccelError<I2C::Error>> {
        let watermark = sampling.batch_size.min(MAX_BATCH_SIZE as u8).saturating_sub(1);

        self.write_reg(reg::CTRL_REG5, CTRL5_FIFO_EN).await?;
        // Bypass clears the FIFO
        self.write_reg(reg::FIFO_CTRL_REG, 0).await?;
        self.write_reg(reg::FIFO_CTRL_REG, FIFO_MODE_STREAM | (watermark & FIFO_SRC_FSS))
            .await?;

        self.sampling_hz = Some(sampling.rate_hz);
        self.apply_rate().await
    }

    /// Stop the batch feed
    pub async fn stop_sampling(&mut self) -> Result<(), AccelError<I2C::Error>> {
        self.write_reg(reg::FIFO_CTRL_REG, 0).await?;
        self.write_reg(reg::CTRL_REG5, 0).await?;

        self.sampling_hz = None;
        self.apply_rate().await
    }

    /// Start click detection
    pub async fn enable_taps(&mut self) -> Result<(), AccelError<I2C::Error>> {
        let ths = CLICK_THS_LIR | (self.config.click_threshold & 0x7F);

        self.write_reg(reg::CLICK_THS, ths).await?;
        self.write_reg(reg::TIME_LIMIT, self.config.click_time_limit).await?;
        self.write_reg(reg::TIME_LATENCY, self.config.click_latency).await?;
        self.write_reg(reg::CLICK_CFG, CLICK_CFG_SINGLE_XYZ).await?;
        self.write_reg(reg::CTRL_REG3, CTRL3_I1_CLICK).await?;

        self.taps = true;
        self.apply_rate().await
    }

    /// Stop click detection
    pub async fn disable_taps(&mut self) -> Result<(), AccelError<I2C::Error>> {
        self.write_reg(reg::CLICK_CFG, 0).await?;
        self.write_reg(reg::CTRL_REG3, 0).await?;

        self.taps = false;
        self.apply_rate().await
    }

    /// Drain exactly `size` samples from the FIFO
    ///
    /// Returns an empty batch without touching the FIFO when fewer than
    /// `size` samples are queued.
    pub async fn read_batch(&mut self, size: usize) -> Result<Batch, AccelError<I2C::Error>> {
        let src = self.read_reg(reg::FIFO_SRC_REG).await?;
        let available = if src & FIFO_SRC_EMPTY != 0 {
            0
        } else if src & FIFO_SRC_OVRN != 0 {
            MAX_BATCH_SIZE
        } else {
            (src & FIFO_SRC_FSS) as usize
        };

        let size = size.min(MAX_BATCH_SIZE);
        let mut batch = Batch::new();
        if available < size {
            return Ok(batch);
        }

        for _ in 0..size {
            let mut raw = [0u8; 6];
            self.i2c
                .write_read(
                    self.config.address,
                    &[reg::OUT_X_L | AUTO_INCREMENT],
                    &mut raw,
                )
                .await
                .map_err(AccelError::Bus)?;
            if batch.push(decode_sample(&raw, &self.config)).is_err() {
                break;
            }
        }

        Ok(batch)
    }

    /// Read and clear the latched click source
    pub async fn read_tap(&mut self) -> Result<Option<TapEvent>, AccelError<I2C::Error>> {
        let src = self.read_reg(reg::CLICK_SRC).await?;
        Ok(decode_click(src, &self.config))
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    async fn apply_rate(&mut self) -> Result<(), AccelError<I2C::Error>> {
        let rate = match (self.sampling_hz, self.taps) {
            (Some(hz), _) => hz,
            (None, true) => self.config.tap_rate_hz,
            (None, false) => 0,
        };

        let odr = odr_bits(rate);
        let ctrl1 = if odr == 0 { 0 } else { (odr << 4) | CTRL1_XYZ_EN };
        self.write_reg(reg::CTRL_REG1, ctrl1).await
    }

    async fn read_reg(&mut self, reg: u8) -> Result<u8, AccelError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.config.address, &[reg], &mut buf)
            .await
            .map_err(AccelError::Bus)?;
        Ok(buf[0])
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), AccelError<I2C::Error>> {
        self.i2c
            .write(self.config.address, &[reg, value])
            .await
            .map_err(AccelError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};

    const ADDR: u8 = 0x18;

    /// Register-file model of the sensor
    struct MockI2c {
        regs: [u8; 0x40],
        fifo: Vec<[u8; 6]>,
        fail: bool,
    }

    impl MockI2c {
        fn new() -> Self {
            let mut regs = [0u8; 0x40];
            regs[reg::WHO_AM_I as usize] = DEVICE_ID;
            Self {
                regs,
                fifo: Vec::new(),
                fail: false,
            }
        }

        fn fifo_src(&self) -> u8 {
            match self.fifo.len() {
                0 => FIFO_SRC_EMPTY,
                n if n >= MAX_BATCH_SIZE => FIFO_SRC_OVRN | FIFO_SRC_FSS,
                n => n as u8,
            }
        }

        fn read(&mut self, pointer: u8, buf: &mut [u8]) {
            match pointer {
                reg::OUT_X_L => {
                    let entry = if self.fifo.is_empty() {
                        [0; 6]
                    } else {
                        self.fifo.remove(0)
                    };
                    buf.copy_from_slice(&entry[..buf.len()]);
                }
                reg::FIFO_SRC_REG => buf[0] = self.fifo_src(),
                reg::CLICK_SRC => {
                    buf[0] = self.regs[reg::CLICK_SRC as usize];
                    self.regs[reg::CLICK_SRC as usize] = 0;
                }
                _ => {
                    for (i, b) in buf.iter_mut().enumerate() {
                        *b = self.regs[pointer as usize + i];
                    }
                }
            }
        }
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            assert_eq!(address, ADDR);

            let mut pointer = 0u8;
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        pointer = bytes[0] & !AUTO_INCREMENT;
                        for (i, b) in bytes[1..].iter().enumerate() {
                            self.regs[pointer as usize + i] = *b;
                        }
                    }
                    Operation::Read(buf) => self.read(pointer, buf),
                }
            }
            Ok(())
        }
    }

    fn encode(sample: AccelSample) -> [u8; 6] {
        let x = (sample.x << 4).to_le_bytes();
        let y = (sample.y << 4).to_le_bytes();
        let z = (sample.z << 4).to_le_bytes();
        [x[0], x[1], y[0], y[1], z[0], z[1]]
    }

    fn plain() -> Lis3dhConfig {
        Lis3dhConfig {
            invert_z: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_sample() {
        // 1000 mg = 0x3E80 left-justified
        let raw = [0x80, 0x3E, 0x80, 0xC1, 0x00, 0x00];
        assert_eq!(decode_sample(&raw, &plain()), AccelSample::new(1000, -1000, 0));
    }

    #[test]
    fn test_decode_sample_inverted_z() {
        let raw = encode(AccelSample::new(12, -34, 1000));
        let sample = decode_sample(&raw, &Lis3dhConfig::default());
        assert_eq!(sample, AccelSample::new(12, -34, -1000));
    }

    #[test]
    fn test_decode_click() {
        let config = plain();
        assert_eq!(decode_click(0x00, &config), None);
        // Axis bit without the interrupt-active flag
        assert_eq!(decode_click(0x01, &config), None);
        assert_eq!(
            decode_click(CLICK_SRC_IA | 0x10 | 0x01, &config),
            Some(TapEvent::new(Axis::X, 1))
        );
        assert_eq!(
            decode_click(CLICK_SRC_IA | 0x10 | CLICK_SRC_SIGN | 0x02, &config),
            Some(TapEvent::new(Axis::Y, -1))
        );
        // Z is inverted by default
        assert_eq!(
            decode_click(CLICK_SRC_IA | 0x10 | 0x04, &Lis3dhConfig::default()),
            Some(TapEvent::new(Axis::Z, -1))
        );
    }

    #[test]
    fn test_odr_bits() {
        assert_eq!(odr_bits(0), 0);
        assert_eq!(odr_bits(1), 1);
        assert_eq!(odr_bits(10), 2);
        assert_eq!(odr_bits(11), 3);
        assert_eq!(odr_bits(100), 5);
        assert_eq!(odr_bits(400), 7);
        assert_eq!(odr_bits(1000), 7);
    }

    #[test]
    fn test_init_checks_identity() {
        block_on(async {
            let mut accel = Lis3dh::new(MockI2c::new(), Lis3dhConfig::default());
            assert_eq!(accel.init().await, Ok(()));
            let i2c = accel.release();
            assert_eq!(i2c.regs[reg::CTRL_REG4 as usize], CTRL4_BDU | CTRL4_HR);
            assert_eq!(i2c.regs[reg::CTRL_REG1 as usize], 0);

            let mut i2c = MockI2c::new();
            i2c.regs[reg::WHO_AM_I as usize] = 0x44;
            let mut accel = Lis3dh::new(i2c, Lis3dhConfig::default());
            assert_eq!(accel.init().await, Err(AccelError::UnknownDevice(0x44)));
        });
    }

    #[test]
    fn test_start_sampling_configures_fifo() {
        block_on(async {
            let mut accel = Lis3dh::new(MockI2c::new(), Lis3dhConfig::default());
            accel.init().await.unwrap();
            accel.start_sampling(SamplingConfig::default()).await.unwrap();
            assert!(accel.is_sampling());

            let i2c = accel.release();
            // 10 Hz, all axes
            assert_eq!(i2c.regs[reg::CTRL_REG1 as usize], 0x27);
            assert_eq!(i2c.regs[reg::CTRL_REG5 as usize], CTRL5_FIFO_EN);
            assert_eq!(i2c.regs[reg::FIFO_CTRL_REG as usize], FIFO_MODE_STREAM | 4);
        });
    }

    #[test]
    fn test_read_batch_takes_full_batches_only() {
        block_on(async {
            let mut i2c = MockI2c::new();
            for i in 0..7 {
                i2c.fifo.push(encode(AccelSample::new(i, -400, -900)));
            }
            let mut accel = Lis3dh::new(i2c, plain());

            let batch = accel.read_batch(5).await.unwrap();
            assert_eq!(batch.len(), 5);
            assert_eq!(batch[0], AccelSample::new(0, -400, -900));
            assert_eq!(batch[4], AccelSample::new(4, -400, -900));

            // Two left over: not enough for a batch
            let batch = accel.read_batch(5).await.unwrap();
            assert!(batch.is_empty());

            let mut i2c = accel.release();
            assert_eq!(i2c.fifo.len(), 2);
            for i in 7..10 {
                i2c.fifo.push(encode(AccelSample::new(i, -400, -900)));
            }
            let mut accel = Lis3dh::new(i2c, plain());

            let batch = accel.read_batch(5).await.unwrap();
            assert_eq!(batch.len(), 5);
            assert_eq!(batch[0], AccelSample::new(5, -400, -900));
            assert_eq!(batch[4], AccelSample::new(9, -400, -900));
        });
    }

    #[test]
    fn test_read_batch_short_fifo_left_queued() {
        block_on(async {
            let mut i2c = MockI2c::new();
            i2c.fifo.push(encode(AccelSample::new(0, -400, -900)));
            let mut accel = Lis3dh::new(i2c, plain());

            assert!(accel.read_batch(5).await.unwrap().is_empty());
            assert!(accel.read_batch(5).await.unwrap().is_empty());
            assert_eq!(accel.release().fifo.len(), 1);
        });
    }

    #[test]
    fn test_read_batch_after_overrun() {
        block_on(async {
            let mut i2c = MockI2c::new();
            for _ in 0..40 {
                i2c.fifo.push(encode(AccelSample::new(0, 0, 1000)));
            }
            let mut accel = Lis3dh::new(i2c, plain());

            let batch = accel.read_batch(MAX_BATCH_SIZE).await.unwrap();
            assert_eq!(batch.len(), MAX_BATCH_SIZE);

            // Oversized requests are capped to the FIFO depth
            let batch = accel.read_batch(usize::MAX).await.unwrap();
            assert!(batch.is_empty());
        });
    }

    #[test]
    fn test_taps_keep_sensor_powered() {
        block_on(async {
            let mut accel = Lis3dh::new(MockI2c::new(), Lis3dhConfig::default());
            accel.init().await.unwrap();
            accel.start_sampling(SamplingConfig::default()).await.unwrap();
            accel.enable_taps().await.unwrap();
            accel.stop_sampling().await.unwrap();
            assert!(accel.taps_enabled());
            assert!(!accel.is_sampling());

            let mut i2c = accel.release();
            // Falls back to the 100 Hz tap rate
            assert_eq!(i2c.regs[reg::CTRL_REG1 as usize], 0x57);
            assert_eq!(i2c.regs[reg::CLICK_CFG as usize], CLICK_CFG_SINGLE_XYZ);
            assert_eq!(i2c.regs[reg::CLICK_THS as usize], CLICK_THS_LIR | 20);

            i2c.regs[reg::CTRL_REG1 as usize] = 0xFF;
            let mut accel = Lis3dh::new(i2c, Lis3dhConfig::default());
            accel.disable_taps().await.unwrap();
            let i2c = accel.release();
            assert_eq!(i2c.regs[reg::CTRL_REG1 as usize], 0);
            assert_eq!(i2c.regs[reg::CLICK_CFG as usize], 0);
        });
    }

    #[test]
    fn test_read_tap_clears_latch() {
        block_on(async {
            let mut i2c = MockI2c::new();
            i2c.regs[reg::CLICK_SRC as usize] = CLICK_SRC_IA | 0x10 | 0x01;
            let mut accel = Lis3dh::new(i2c, plain());

            assert_eq!(accel.read_tap().await, Ok(Some(TapEvent::new(Axis::X, 1))));
            assert_eq!(accel.read_tap().await, Ok(None));
        });
    }

    #[test]
    fn test_bus_error() {
        block_on(async {
            let mut i2c = MockI2c::new();
            i2c.fail = true;
            let mut accel = Lis3dh::new(i2c, Lis3dhConfig::default());
            assert_eq!(accel.init().await, Err(AccelError::Bus(ErrorKind::Other)));
        });
    }
}
