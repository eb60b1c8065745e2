// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Native peripheral binding.
//!
//! The board's driver library exposes a fixed table of C entry points. The
//! sessions in this crate never call it directly: they go through the three
//! traits below, one per subsystem, so any binding (the real library, or
//! [`MockBoard`] in tests) can stand behind a session.
//!
//! Implementations do no validation of their own. Arguments reaching a trait
//! method have already been range checked by the owning session.

use crate::constants::ADC_CHANNEL_COUNT;
use crate::units::RawTriple;

pub mod mock;
#[cfg(feature = "native")]
pub mod native;

pub use mock::{MockBoard, MockCall};
#[cfg(feature = "native")]
pub use native::NativeBoard;

/// Failure reported by a native entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{function} failed with code {code}")]
pub struct NativeError {
    /// Name of the native function that failed
    pub function: &'static str,
    /// Return code it reported
    pub code: i32,
}

impl NativeError {
    pub fn new(function: &'static str, code: i32) -> Self {
        Self { function, code }
    }
}

pub type NativeResult<T> = Result<T, NativeError>;

/// Map a C status code to a result, negative codes being failures
#[cfg_attr(not(feature = "native"), allow(dead_code))]
pub(crate) fn check(function: &'static str, code: i32) -> NativeResult<i32> {
    if code < 0 {
        Err(NativeError::new(function, code))
    } else {
        Ok(code)
    }
}

/// IO expander and ADC entry points.
///
/// Batched calls carry one bit per IO channel, bit n being channel n.
pub trait PinInterface {
    fn adc_io_open(&mut self) -> NativeResult<()>;

    fn adc_io_close(&mut self) -> NativeResult<()>;

    /// Sample every ADC channel in one transfer
    fn read_adc_all(&mut self, samples: &mut [u16; ADC_CHANNEL_COUNT]) -> NativeResult<()>;

    fn set_io_mode(&mut self, index: u8, mode: u8) -> NativeResult<()>;

    /// Write the mode of every IO channel, set bits being outputs
    fn set_io_mode_all(&mut self, mode_mask: u8) -> NativeResult<()>;

    /// Read the mode of every IO channel, set bits being outputs
    fn read_io_modes(&mut self) -> NativeResult<u8>;

    fn set_io_level(&mut self, index: u8, level: u8) -> NativeResult<()>;

    /// Drive every output channel from one bitmask
    fn set_io_level_all(&mut self, level_mask: u8) -> NativeResult<()>;

    /// Read the level of every IO channel in one transfer
    fn read_io_levels(&mut self) -> NativeResult<u8>;
}

/// MPU6500 entry points
pub trait MotionInterface {
    /// Initialise the sensor and program its sample rate and ranges
    fn mpu_open(
        &mut self,
        sample_rate_hz: u16,
        accel_fsr_g: u8,
        gyro_fsr_dps: u16,
    ) -> NativeResult<()>;

    /// Power the sensor down
    fn mpu_close(&mut self) -> NativeResult<()>;

    /// Attitude registers in hundredths of a degree
    fn read_attitude_raw(&mut self) -> NativeResult<RawTriple>;

    fn read_gyro_raw(&mut self) -> NativeResult<RawTriple>;

    fn read_accel_raw(&mut self) -> NativeResult<RawTriple>;
}

/// One drawing call into the display's frame buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    FillScreen {
        color: u32,
    },
    PutString {
        x: i16,
        y: i16,
        text: String,
    },
    FillFrame {
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: u32,
    },
    FillRoundFrame {
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        r: i16,
        color: u32,
    },
    FillCircle {
        x0: i16,
        y0: i16,
        r: i16,
        color: u32,
    },
    DrawMesh {
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: u32,
    },
    DrawFrame {
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: u32,
    },
    DrawRoundFrame {
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        r: i16,
        color: u32,
    },
    DrawPixel {
        x0: i16,
        y0: i16,
        color: u32,
    },
    DrawCircle {
        x0: i16,
        y0: i16,
        r: i16,
        color: u32,
    },
    /// Arc of radius `r`; `s` selects the octants to draw
    DrawArc {
        x0: i16,
        y0: i16,
        r: i16,
        s: u8,
        color: u32,
    },
    DrawLine {
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: u32,
    },
}

/// LCD and LED entry points
pub trait DisplayInterface {
    fn lcd_open(&mut self, direction: u8) -> NativeResult<()>;

    fn lcd_close(&mut self) -> NativeResult<()>;

    /// Copy the frame buffer to the panel
    fn lcd_refresh(&mut self) -> NativeResult<()>;

    fn set_font(&mut self, font: u8) -> NativeResult<()>;

    fn set_fore_color(&mut self, color: u32) -> NativeResult<()>;

    fn set_back_color(&mut self, color: u32) -> NativeResult<()>;

    fn set_led_color(&mut self, index: u8, color: u32) -> NativeResult<()>;

    /// Rasterise into the frame buffer; nothing reaches the panel until
    /// [`DisplayInterface::lcd_refresh`]
    fn draw(&mut self, primitive: &Primitive) -> NativeResult<()>;
}
