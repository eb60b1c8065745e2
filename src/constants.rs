// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Constants for the UpTech controller board.
//!
//! This module contains the fixed board dimensions, the raw codes passed to
//! the native library, and the scale tables used to convert raw IMU register
//! values into physical units.

use crate::units::Scale;

// =============================================================================
// Board Dimensions
// =============================================================================

/// Number of digital IO lines on the expansion header
pub const IO_CHANNEL_COUNT: usize = 8;
/// Number of analog input lines sampled by the ADC
pub const ADC_CHANNEL_COUNT: usize = 10;
/// Number of addressable RGB LEDs next to the screen
pub const LED_COUNT: usize = 2;

/// IO bitmask with every channel set
pub const IO_MASK_ALL: u8 = 0xFF;
/// IO bitmask with every channel cleared
pub const IO_MASK_NONE: u8 = 0x00;

// =============================================================================
// Native Codes
// =============================================================================

/// IO mode code for an input line
pub const IO_MODE_INPUT: u8 = 0;
/// IO mode code for an output line
pub const IO_MODE_OUTPUT: u8 = 1;

/// Display direction code: portrait
pub const LCD_DIRECTION_VERTICAL: u8 = 1;
/// Display direction code: landscape
pub const LCD_DIRECTION_HORIZONTAL: u8 = 2;

/// Maximum value of a single color component
pub const COLOR_COMPONENT_MAX: u32 = 0xFF;

// =============================================================================
// IMU Sample Rate
// =============================================================================

/// Slowest sample rate the MPU6500 accepts
pub const MIN_SAMPLE_RATE_HZ: u16 = 4;
/// Fastest sample rate the MPU6500 accepts
pub const MAX_SAMPLE_RATE_HZ: u16 = 1000;
/// Sample rate used when none is configured
pub const DEFAULT_SAMPLE_RATE_HZ: u16 = 200;

// =============================================================================
// IMU Scale Tables (from the MPU6500 register map)
// =============================================================================

/// Attitude is reported in hundredths of a degree
pub const ATTITUDE_SCALE: Scale = Scale::linear(0.01);

/// Accelerometer LSB per g, indexed by full-scale range (2, 4, 8, 16 g)
pub const ACCEL_LSB_PER_G: [f32; 4] = [16384.0, 8192.0, 4096.0, 2048.0];

/// Gyroscope LSB per degree/second, indexed by full-scale range
/// (250, 500, 1000, 2000 dps)
pub const GYRO_LSB_PER_DPS: [f32; 4] = [131.0, 65.5, 32.8, 16.4];

/// Accelerometer scale in g per LSB, indexed by full-scale range
pub const ACCEL_SCALES: [Scale; 4] = [
    Scale::linear(1.0 / ACCEL_LSB_PER_G[0]),
    Scale::linear(1.0 / ACCEL_LSB_PER_G[1]),
    Scale::linear(1.0 / ACCEL_LSB_PER_G[2]),
    Scale::linear(1.0 / ACCEL_LSB_PER_G[3]),
];

/// Gyroscope scale in degrees/second per LSB, indexed by full-scale range
pub const GYRO_SCALES: [Scale; 4] = [
    Scale::linear(1.0 / GYRO_LSB_PER_DPS[0]),
    Scale::linear(1.0 / GYRO_LSB_PER_DPS[1]),
    Scale::linear(1.0 / GYRO_LSB_PER_DPS[2]),
    Scale::linear(1.0 / GYRO_LSB_PER_DPS[3]),
];
