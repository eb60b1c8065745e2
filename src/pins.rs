// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Digital IO and ADC pins.
//!
//! [`PinController`] owns the IO expander/ADC interface. It persists the mode
//! of every IO channel so batched writes can be built from the current
//! configuration, and it prefers the batched native calls (one bitmask for
//! all eight IO lines, one transfer for all ADC channels) over per-channel
//! loops.

use log::{debug, trace, warn};

use crate::{
    constants::{
        ADC_CHANNEL_COUNT, IO_CHANNEL_COUNT, IO_MASK_ALL, IO_MASK_NONE, IO_MODE_INPUT,
        IO_MODE_OUTPUT,
    },
    interface::PinInterface,
    session::SessionState,
    Error, Result,
};

const SESSION: &str = "pin";

/// A validated IO channel index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Validate `index` against the board's IO channel count
    pub fn new(index: u8) -> Result<Self> {
        if usize::from(index) >= IO_CHANNEL_COUNT {
            return Err(Error::InvalidChannel {
                channel: index,
                count: IO_CHANNEL_COUNT,
            });
        }
        Ok(Channel(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Every IO channel in order
    pub fn all() -> impl Iterator<Item = Channel> {
        (0..IO_CHANNEL_COUNT as u8).map(Channel)
    }

    fn bit(self) -> u8 {
        1 << self.0
    }
}

fn adc_index(index: u8) -> Result<usize> {
    let index = usize::from(index);
    if index >= ADC_CHANNEL_COUNT {
        return Err(Error::InvalidChannel {
            channel: index as u8,
            count: ADC_CHANNEL_COUNT,
        });
    }
    Ok(index)
}

/// Direction of an IO channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PinMode {
    #[default]
    Input,
    Output,
}

impl PinMode {
    /// Native mode code
    pub fn code(self) -> u8 {
        match self {
            PinMode::Input => IO_MODE_INPUT,
            PinMode::Output => IO_MODE_OUTPUT,
        }
    }

    fn from_bit(set: bool) -> Self {
        if set {
            PinMode::Output
        } else {
            PinMode::Input
        }
    }
}

/// Digital level of an IO channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Level::Low),
            1 => Ok(Level::High),
            other => Err(Error::InvalidLevel(other)),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value {
            Level::High
        } else {
            Level::Low
        }
    }
}

fn mode_mask(modes: &[PinMode; IO_CHANNEL_COUNT]) -> u8 {
    Channel::all()
        .filter(|c| modes[usize::from(c.index())] == PinMode::Output)
        .fold(0, |mask, c| mask | c.bit())
}

/// Session over the board's IO and ADC lines
pub struct PinController<I: PinInterface> {
    interface: I,
    state: SessionState,
    modes: [PinMode; IO_CHANNEL_COUNT],
}

impl<I: PinInterface> PinController<I> {
    /// Wrap an interface; the controller starts closed
    pub fn new_with_interface(interface: I) -> Self {
        Self {
            interface,
            state: SessionState::Closed,
            modes: [PinMode::Input; IO_CHANNEL_COUNT],
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Open the IO expander and ADC. Opening an open controller does nothing.
    pub fn open(&mut self) -> Result<&mut Self> {
        if self.state.is_open() {
            trace!("pin controller already open");
            return Ok(self);
        }
        self.interface.adc_io_open()?;
        self.state = SessionState::Open;
        debug!("pin controller opened");
        Ok(self)
    }

    /// Release the IO expander and ADC. Closing twice is harmless.
    pub fn close(&mut self) -> Result<&mut Self> {
        if !self.state.is_open() {
            return Ok(self);
        }
        self.state = SessionState::Closed;
        self.interface.adc_io_close()?;
        debug!("pin controller closed");
        Ok(self)
    }

    /// Set the direction of one IO channel
    pub fn set_mode(&mut self, channel: u8, mode: PinMode) -> Result<&mut Self> {
        let channel = Channel::new(channel)?;
        self.state.require_open(SESSION)?;
        self.interface.set_io_mode(channel.index(), mode.code())?;
        self.modes[usize::from(channel.index())] = mode;
        Ok(self)
    }

    /// Set every IO channel to `mode` with one native call
    pub fn set_all_modes(&mut self, mode: PinMode) -> Result<&mut Self> {
        self.state.require_open(SESSION)?;
        let mask = match mode {
            PinMode::Input => IO_MASK_NONE,
            PinMode::Output => IO_MASK_ALL,
        };
        self.interface.set_io_mode_all(mask)?;
        self.modes = [mode; IO_CHANNEL_COUNT];
        Ok(self)
    }

    /// Set a group of IO channels to `mode` with one native call.
    ///
    /// Every channel is validated before anything is written; channels not
    /// listed keep their current mode.
    pub fn set_modes(&mut self, channels: &[u8], mode: PinMode) -> Result<&mut Self> {
        let channels = channels
            .iter()
            .map(|&c| Channel::new(c))
            .collect::<Result<Vec<_>>>()?;
        self.state.require_open(SESSION)?;

        let mut modes = self.modes;
        for channel in channels {
            modes[usize::from(channel.index())] = mode;
        }
        self.interface.set_io_mode_all(mode_mask(&modes))?;
        self.modes = modes;
        Ok(self)
    }

    /// Mode last written to `channel`
    pub fn mode(&self, channel: u8) -> Result<PinMode> {
        let channel = Channel::new(channel)?;
        Ok(self.modes[usize::from(channel.index())])
    }

    /// Mode last written to every channel
    pub fn modes(&self) -> [PinMode; IO_CHANNEL_COUNT] {
        self.modes
    }

    /// Read the mode register back from the hardware and adopt it
    pub fn sync_modes(&mut self) -> Result<[PinMode; IO_CHANNEL_COUNT]> {
        self.state.require_open(SESSION)?;
        let mask = self
            .interface
            .read_io_modes()
            .map_err(Error::SensorReadFailed)?;
        for channel in Channel::all() {
            let output = mask & channel.bit() != 0;
            self.modes[usize::from(channel.index())] = PinMode::from_bit(output);
        }
        debug!("synced IO modes: {:#010b}", mask);
        Ok(self.modes)
    }

    /// Drive one IO channel; `level` must be 0 or 1
    pub fn set_level(&mut self, channel: u8, level: u8) -> Result<&mut Self> {
        let channel = Channel::new(channel)?;
        let level = Level::try_from(level)?;
        self.state.require_open(SESSION)?;
        if self.modes[usize::from(channel.index())] != PinMode::Output {
            trace!("setting level on input channel {}", channel.index());
        }
        self.interface.set_io_level(channel.index(), level.into())?;
        Ok(self)
    }

    /// Drive every IO channel to the same level with one native call
    pub fn set_all_levels(&mut self, level: u8) -> Result<&mut Self> {
        let level = Level::try_from(level)?;
        self.state.require_open(SESSION)?;
        let mask = match level {
            Level::Low => IO_MASK_NONE,
            Level::High => IO_MASK_ALL,
        };
        self.interface.set_io_level_all(mask)?;
        Ok(self)
    }

    /// Levels of all IO channels as a bitmask, bit n being channel n
    pub fn read_levels_mask(&mut self) -> Result<u8> {
        self.state.require_open(SESSION)?;
        self.interface
            .read_io_levels()
            .map_err(Error::SensorReadFailed)
    }

    /// Levels of all IO channels, 0 or 1 each, in channel order.
    ///
    /// Inputs and outputs are both reported; filter with [`Self::modes`]
    /// if only one kind is wanted.
    pub fn read_all_channels(&mut self) -> Result<[u8; IO_CHANNEL_COUNT]> {
        let mask = self.read_levels_mask()?;
        let mut levels = [0u8; IO_CHANNEL_COUNT];
        for channel in Channel::all() {
            levels[usize::from(channel.index())] = u8::from(mask & channel.bit() != 0);
        }
        Ok(levels)
    }

    pub fn read_level(&mut self, channel: u8) -> Result<Level> {
        let channel = Channel::new(channel)?;
        let mask = self.read_levels_mask()?;
        Ok(Level::from(mask & channel.bit() != 0))
    }

    /// Raw samples of every ADC channel from one transfer
    pub fn read_all_adc(&mut self) -> Result<[u16; ADC_CHANNEL_COUNT]> {
        self.state.require_open(SESSION)?;
        let mut samples = [0u16; ADC_CHANNEL_COUNT];
        self.interface
            .read_adc_all(&mut samples)
            .map_err(Error::SensorReadFailed)?;
        Ok(samples)
    }

    /// Raw sample of one ADC channel
    pub fn read_adc(&mut self, channel: u8) -> Result<u16> {
        let index = adc_index(channel)?;
        let samples = self.read_all_adc()?;
        Ok(samples[index])
    }

    /// Handle bound to one IO channel
    pub fn pin(&mut self, channel: u8) -> Result<Pin<'_, I>> {
        let channel = Channel::new(channel)?;
        Ok(Pin {
            controller: self,
            channel,
        })
    }
}

#[cfg(feature = "native")]
impl PinController<crate::interface::NativeBoard> {
    /// Controller over the linked native library
    pub fn native() -> Self {
        Self::new_with_interface(crate::interface::NativeBoard::new())
    }
}

impl<I: PinInterface> Drop for PinController<I> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("closing pin controller on drop: {}", e);
        }
    }
}

/// One IO channel borrowed from its controller
pub struct Pin<'a, I: PinInterface> {
    controller: &'a mut PinController<I>,
    channel: Channel,
}

impl<I: PinInterface> Pin<'_, I> {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn mode(&self) -> PinMode {
        self.controller.modes[usize::from(self.channel.index())]
    }

    pub fn set_mode(&mut self, mode: PinMode) -> Result<&mut Self> {
        self.controller.set_mode(self.channel.index(), mode)?;
        Ok(self)
    }

    pub fn set_level(&mut self, level: u8) -> Result<&mut Self> {
        self.controller.set_level(self.channel.index(), level)?;
        Ok(self)
    }

    pub fn level(&mut self) -> Result<Level> {
        self.controller.read_level(self.channel.index())
    }
}
