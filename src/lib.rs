// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! # uptech
//!
//! Board support for the UpTech robotics controller: digital IO and ADC
//! pins, the MPU6500 motion sensor, and the LCD screen with its RGB LEDs.
//!
//! Each subsystem is a session that exclusively owns one native interface
//! value. Sessions start closed, must be opened before use, and close
//! themselves when dropped. Every mutating call returns the session, so
//! calls chain with `?`:
//!
//! ```
//! use uptech::{interface::MockBoard, Color, DisplaySession};
//!
//! # fn main() -> uptech::Result<()> {
//! let mut screen = DisplaySession::new_with_interface(MockBoard::new());
//! screen
//!     .open(2)?
//!     .fill_screen(Color::BLACK)?
//!     .put_string(0, 0, "hello")?
//!     .refresh()?;
//! # Ok(())
//! # }
//! ```
//!
//! With the `native` feature the [`interface::NativeBoard`] binding links the
//! vendor `libuptech` library.

pub mod color;
pub mod config;
pub mod constants;
pub mod display;
pub mod interface;
pub mod motion;
pub mod pins;
mod session;
pub mod units;

pub use color::{Color, Palette};
pub use config::{DisplayConfig, MotionConfig};
pub use constants::{ADC_CHANNEL_COUNT, IO_CHANNEL_COUNT, LED_COUNT};
pub use display::{Direction, DisplaySession, Font};
pub use interface::NativeError;
pub use motion::MotionSession;
pub use pins::{Channel, Level, Pin, PinController, PinMode};
pub use units::{AccelRange, AttitudeVector, GyroRange, MotionSnapshot, MotionVector, Scale};

/// Errors in this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Channel index outside the board's fixed range
    #[error("channel {channel} is out of range, the board has {count} channels")]
    InvalidChannel { channel: u8, count: usize },

    /// Digital level other than 0 or 1
    #[error("invalid level {0}, expected 0 or 1")]
    InvalidLevel(u8),

    /// Display direction other than 1 (vertical) or 2 (horizontal)
    #[error("invalid display direction {0}, expected 1 or 2")]
    InvalidDirection(u8),

    /// Color component outside 0..=255
    #[error("{name} component {value} is outside 0..=255")]
    InvalidColorComponent { name: &'static str, value: u32 },

    /// LED index outside the board's fixed range
    #[error("LED {index} is out of range, the board has {count} LEDs")]
    InvalidLedIndex { index: u8, count: usize },

    /// IMU sample rate the sensor cannot run at
    #[error("sample rate {0} Hz is not supported")]
    InvalidSampleRate(u16),

    /// Text that cannot be passed to the display as a C string
    #[error("text contains an interior NUL byte")]
    InvalidText,

    /// Operation on a session that has not been opened
    #[error("{0} session is not open")]
    SessionNotOpen(&'static str),

    /// The native layer failed while sampling a sensor
    #[error("sensor read failed")]
    SensorReadFailed(#[source] NativeError),

    /// Any other native call failure
    #[error(transparent)]
    Native(#[from] NativeError),
}

pub type Result<T> = std::result::Result<T, Error>;
