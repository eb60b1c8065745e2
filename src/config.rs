// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Session configuration.
//!
//! Both configs are plain values with board defaults; they are checked when a
//! session is opened, not when they are built.

use crate::{
    color::Color,
    constants::{DEFAULT_SAMPLE_RATE_HZ, MAX_SAMPLE_RATE_HZ, MIN_SAMPLE_RATE_HZ},
    display::{Direction, Font},
    units::{AccelRange, GyroRange},
    Error, Result,
};

/// How the motion sensor is programmed on open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionConfig {
    /// Output data rate in Hz
    pub sample_rate_hz: u16,
    pub accel_range: AccelRange,
    pub gyro_range: GyroRange,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            accel_range: AccelRange::default(),
            gyro_range: GyroRange::default(),
        }
    }
}

impl MotionConfig {
    pub fn with_sample_rate(mut self, sample_rate_hz: u16) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    pub fn with_accel_range(mut self, range: AccelRange) -> Self {
        self.accel_range = range;
        self
    }

    pub fn with_gyro_range(mut self, range: GyroRange) -> Self {
        self.gyro_range = range;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(MIN_SAMPLE_RATE_HZ..=MAX_SAMPLE_RATE_HZ).contains(&self.sample_rate_hz) {
            return Err(Error::InvalidSampleRate(self.sample_rate_hz));
        }
        Ok(())
    }
}

/// Screen orientation and text style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub direction: Direction,
    pub font: Font,
    pub fore_color: Color,
    pub back_color: Color,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            font: Font::Font8x14,
            fore_color: Color::WHITE,
            back_color: Color::BLACK,
        }
    }
}
