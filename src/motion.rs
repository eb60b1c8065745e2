// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! MPU6500 motion sensor session.
//!
//! The session programs the sensor from a [`MotionConfig`] on open and then
//! converts every raw register read with the scale fixed for the configured
//! range. Readings are never cached: each call samples the sensor.

use log::{debug, trace, warn};

use crate::{
    config::MotionConfig,
    constants::ATTITUDE_SCALE,
    interface::MotionInterface,
    session::SessionState,
    units::{AttitudeVector, MotionSnapshot, MotionVector, Scale},
    Error, Result,
};

const SESSION: &str = "motion";

/// Session over the board's IMU
pub struct MotionSession<I: MotionInterface> {
    interface: I,
    state: SessionState,
    config: MotionConfig,
    accel_scale: Scale,
    gyro_scale: Scale,
}

impl<I: MotionInterface> MotionSession<I> {
    /// Wrap an interface with the default configuration
    pub fn new_with_interface(interface: I) -> Self {
        Self::with_config(interface, MotionConfig::default())
    }

    /// Wrap an interface; `config` is applied on [`Self::open`]
    pub fn with_config(interface: I, config: MotionConfig) -> Self {
        Self {
            interface,
            state: SessionState::Closed,
            config,
            accel_scale: config.accel_range.scale(),
            gyro_scale: config.gyro_range.scale(),
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Scale currently applied to accelerometer counts, in g per LSB
    pub fn accel_scale(&self) -> Scale {
        self.accel_scale
    }

    /// Scale currently applied to gyroscope counts, in degrees/second per LSB
    pub fn gyro_scale(&self) -> Scale {
        self.gyro_scale
    }

    /// Initialise the sensor with the session's configuration.
    ///
    /// Opening an open session does nothing.
    pub fn open(&mut self) -> Result<&mut Self> {
        if self.state.is_open() {
            trace!("motion session already open");
            return Ok(self);
        }
        self.config.validate()?;
        self.interface.mpu_open(
            self.config.sample_rate_hz,
            self.config.accel_range.full_scale_g(),
            self.config.gyro_range.full_scale_dps(),
        )?;
        self.accel_scale = self.config.accel_range.scale();
        self.gyro_scale = self.config.gyro_range.scale();
        self.state = SessionState::Open;
        debug!(
            "motion session opened at {} Hz, ±{} g, ±{} dps",
            self.config.sample_rate_hz,
            self.config.accel_range.full_scale_g(),
            self.config.gyro_range.full_scale_dps()
        );
        Ok(self)
    }

    /// Replace the configuration and open with it, reprogramming the sensor
    /// if the session was already open with a different one
    pub fn open_with(&mut self, config: MotionConfig) -> Result<&mut Self> {
        config.validate()?;
        if self.state.is_open() && self.config != config {
            self.close()?;
        }
        self.config = config;
        self.open()
    }

    /// Power the sensor down. Closing twice is harmless.
    pub fn close(&mut self) -> Result<&mut Self> {
        if !self.state.is_open() {
            return Ok(self);
        }
        self.state = SessionState::Closed;
        self.interface.mpu_close()?;
        debug!("motion session closed");
        Ok(self)
    }

    /// Attitude in degrees
    pub fn read_attitude(&mut self) -> Result<AttitudeVector> {
        self.state.require_open(SESSION)?;
        let raw = self
            .interface
            .read_attitude_raw()
            .map_err(Error::SensorReadFailed)?;
        Ok(ATTITUDE_SCALE.apply_triple(raw))
    }

    /// Angular rate in degrees/second
    pub fn read_gyro(&mut self) -> Result<MotionVector> {
        self.state.require_open(SESSION)?;
        let raw = self
            .interface
            .read_gyro_raw()
            .map_err(Error::SensorReadFailed)?;
        Ok(self.gyro_scale.apply_triple(raw))
    }

    /// Acceleration in g
    pub fn read_accel(&mut self) -> Result<MotionVector> {
        self.state.require_open(SESSION)?;
        let raw = self
            .interface
            .read_accel_raw()
            .map_err(Error::SensorReadFailed)?;
        Ok(self.accel_scale.apply_triple(raw))
    }

    /// Sample attitude, angular rate and acceleration back to back
    pub fn read_all(&mut self) -> Result<MotionSnapshot> {
        Ok(MotionSnapshot {
            attitude: self.read_attitude()?,
            gyro: self.read_gyro()?,
            accel: self.read_accel()?,
        })
    }
}

#[cfg(feature = "native")]
impl MotionSession<crate::interface::NativeBoard> {
    /// Session over the linked native library
    pub fn native(config: MotionConfig) -> Self {
        Self::with_config(crate::interface::NativeBoard::new(), config)
    }
}

impl<I: MotionInterface> Drop for MotionSession<I> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("closing motion session on drop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::{ACCEL_LSB_PER_G, GYRO_LSB_PER_DPS},
        interface::{MockBoard, MockCall},
        units::{AccelRange, GyroRange},
    };

    const TOLERANCE: f32 = 1e-4;

    fn assert_close(actual: MotionVector, expected: [f32; 3]) {
        for (a, e) in actual.as_array().iter().zip(expected) {
            assert!((a - e).abs() < TOLERANCE, "{:?} != {:?}", actual, expected);
        }
    }

    fn open_session(config: MotionConfig) -> (MockBoard, MotionSession<MockBoard>) {
        let board = MockBoard::new();
        let mut imu = MotionSession::with_config(board.clone(), config);
        imu.open().unwrap();
        (board, imu)
    }

    #[test]
    fn test_reads_require_open() {
        let board = MockBoard::new();
        let mut imu = MotionSession::new_with_interface(board.clone());
        assert!(matches!(
            imu.read_accel(),
            Err(Error::SessionNotOpen("motion"))
        ));
        assert!(matches!(imu.read_gyro(), Err(Error::SessionNotOpen(_))));
        assert!(matches!(imu.read_attitude(), Err(Error::SessionNotOpen(_))));
        assert!(board.calls().is_empty());
    }

    #[test]
    fn test_open_programs_configured_ranges() {
        let config = MotionConfig::default()
            .with_sample_rate(100)
            .with_accel_range(AccelRange::G8)
            .with_gyro_range(GyroRange::Dps500);
        let (board, imu) = open_session(config);
        assert!(imu.is_open());
        assert_eq!(
            board.calls(),
            vec![MockCall::MpuOpen {
                sample_rate_hz: 100,
                accel_fsr_g: 8,
                gyro_fsr_dps: 500
            }]
        );
    }

    #[test]
    fn test_accel_is_raw_times_scale() {
        let (board, mut imu) = open_session(MotionConfig::default());
        let raw = [16384, -4096, 1234];
        board.set_accel_raw(raw);

        let scale = 1.0 / ACCEL_LSB_PER_G[0];
        let accel = imu.read_accel().unwrap();
        assert_close(
            accel,
            [
                raw[0] as f32 * scale,
                raw[1] as f32 * scale,
                raw[2] as f32 * scale,
            ],
        );
        assert!((accel.x - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_accel_scale_follows_range() {
        let config = MotionConfig::default().with_accel_range(AccelRange::G16);
        let (board, mut imu) = open_session(config);
        board.set_accel_raw([2048, 4096, -2048]);
        assert_close(imu.read_accel().unwrap(), [1.0, 2.0, -1.0]);
    }

    #[test]
    fn test_gyro_is_raw_times_scale() {
        let config = MotionConfig::default().with_gyro_range(GyroRange::Dps250);
        let (board, mut imu) = open_session(config);
        board.set_gyro_raw([131, -262, 0]);
        assert_close(imu.read_gyro().unwrap(), [1.0, -2.0, 0.0]);

        assert!((imu.gyro_scale().factor * GYRO_LSB_PER_DPS[0] - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_attitude_in_degrees() {
        let (board, mut imu) = open_session(MotionConfig::default());
        board.set_attitude_raw([1050, -9000, 17999]);
        assert_close(imu.read_attitude().unwrap(), [10.5, -90.0, 179.99]);
    }

    #[test]
    fn test_every_read_samples_the_sensor() {
        let (board, mut imu) = open_session(MotionConfig::default());
        board.set_accel_raw([16384, 0, 0]);
        let first = imu.read_accel().unwrap();
        board.set_accel_raw([0, 16384, 0]);
        let second = imu.read_accel().unwrap();
        assert_ne!(first, second);
        assert_eq!(board.call_count(&MockCall::ReadAccelRaw), 2);
    }

    #[test]
    fn test_read_failure_keeps_session_open() {
        let (board, mut imu) = open_session(MotionConfig::default());
        board.set_gyro_raw([16, 0, 0]);
        board.fail_reads(1);

        match imu.read_gyro() {
            Err(Error::SensorReadFailed(e)) => assert_eq!(e.function, "mpu_get_gyro_reg"),
            other => panic!("expected SensorReadFailed, got {:?}", other),
        }
        assert!(imu.is_open());
        assert!(imu.read_gyro().is_ok());
    }

    #[test]
    fn test_read_all() {
        let (board, mut imu) = open_session(MotionConfig::default());
        board.set_attitude_raw([100, 200, 300]);
        board.set_accel_raw([0, 0, 16384]);
        let snapshot = imu.read_all().unwrap();
        assert_close(snapshot.attitude, [1.0, 2.0, 3.0]);
        assert_close(snapshot.accel, [0.0, 0.0, 1.0]);
        assert_close(snapshot.gyro, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_invalid_sample_rate_rejected_before_native_call() {
        let board = MockBoard::new();
        let mut imu = MotionSession::with_config(
            board.clone(),
            MotionConfig::default().with_sample_rate(0),
        );
        assert!(matches!(imu.open(), Err(Error::InvalidSampleRate(0))));
        assert!(!imu.is_open());
        assert!(board.calls().is_empty());
    }

    #[test]
    fn test_failed_open_stays_closed() {
        let board = MockBoard::new();
        board.fail_opens(1);
        let mut imu = MotionSession::new_with_interface(board.clone());
        assert!(matches!(imu.open(), Err(Error::Native(_))));
        assert!(!imu.is_open());
        imu.open().unwrap();
        assert!(imu.is_open());
    }

    #[test]
    fn test_open_and_close_are_idempotent() {
        let (board, mut imu) = open_session(MotionConfig::default());
        imu.open().unwrap();
        imu.close().unwrap().close().unwrap();
        assert_eq!(board.call_count(&MockCall::MpuClose), 1);
        assert_eq!(board.calls().len(), 2);
    }

    #[test]
    fn test_open_with_new_config_reprograms() {
        let (board, mut imu) = open_session(MotionConfig::default());
        imu.open_with(MotionConfig::default()).unwrap();
        assert_eq!(board.calls().len(), 1);

        let config = MotionConfig::default().with_accel_range(AccelRange::G4);
        imu.open_with(config).unwrap();
        assert_eq!(board.call_count(&MockCall::MpuClose), 1);
        assert_eq!(imu.config().accel_range, AccelRange::G4);
        assert_eq!(imu.accel_scale(), AccelRange::G4.scale());
    }

    #[test]
    fn test_drop_closes_open_session() {
        let board = MockBoard::new();
        {
            let mut imu = MotionSession::new_with_interface(board.clone());
            imu.open().unwrap();
        }
        assert_eq!(board.call_count(&MockCall::MpuClose), 1);
    }
}
