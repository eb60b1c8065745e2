// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unit conversion for raw IMU samples.
//!
//! Raw register values are signed 16-bit counts. Each physical quantity has
//! one fixed [`Scale`] chosen from the tables in [`crate::constants`] by the
//! configured full-scale range; nothing here is derived at runtime.

use crate::constants::{ACCEL_SCALES, GYRO_SCALES};

/// A raw 3-axis register sample [x, y, z]
pub type RawTriple = [i16; 3];

/// Fixed conversion from a raw count to a physical value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Physical units per LSB
    pub factor: f32,
    /// Physical value added after scaling
    pub offset: f32,
}

impl Scale {
    /// A scale with no offset
    pub const fn linear(factor: f32) -> Self {
        Self {
            factor,
            offset: 0.0,
        }
    }

    /// Convert one raw count
    #[inline]
    pub fn apply(&self, raw: i16) -> f32 {
        f32::from(raw) * self.factor + self.offset
    }

    /// Convert all three axes of a raw sample
    pub fn apply_triple(&self, raw: RawTriple) -> MotionVector {
        MotionVector {
            x: self.apply(raw[0]),
            y: self.apply(raw[1]),
            z: self.apply(raw[2]),
        }
    }
}

/// Three-axis physical reading.
///
/// Units depend on the quantity it came from: degrees for attitude, g for
/// acceleration, degrees/second for angular rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Attitude in degrees [pitch, roll, yaw]
pub type AttitudeVector = MotionVector;

impl MotionVector {
    pub fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean length of the vector
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl From<MotionVector> for [f32; 3] {
    fn from(v: MotionVector) -> Self {
        v.as_array()
    }
}

/// One reading of every IMU quantity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionSnapshot {
    /// Attitude in degrees
    pub attitude: AttitudeVector,
    /// Angular rate in degrees/second
    pub gyro: MotionVector,
    /// Acceleration in g
    pub accel: MotionVector,
}

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccelRange {
    #[default]
    G2,
    G4,
    G8,
    G16,
}

impl AccelRange {
    /// Full-scale value in g, as the native driver expects it
    pub fn full_scale_g(self) -> u8 {
        match self {
            AccelRange::G2 => 2,
            AccelRange::G4 => 4,
            AccelRange::G8 => 8,
            AccelRange::G16 => 16,
        }
    }

    pub fn scale(self) -> Scale {
        ACCEL_SCALES[self as usize]
    }
}

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GyroRange {
    Dps250,
    Dps500,
    Dps1000,
    #[default]
    Dps2000,
}

impl GyroRange {
    /// Full-scale value in degrees/second, as the native driver expects it
    pub fn full_scale_dps(self) -> u16 {
        match self {
            GyroRange::Dps250 => 250,
            GyroRange::Dps500 => 500,
            GyroRange::Dps1000 => 1000,
            GyroRange::Dps2000 => 2000,
        }
    }

    pub fn scale(self) -> Scale {
        GYRO_SCALES[self as usize]
    }
}
