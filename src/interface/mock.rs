// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! In-memory board for tests and host-side development.
//!
//! `MockBoard` implements every interface trait, records each native call in
//! order, and keeps just enough hardware state (IO modes and levels, ADC
//! samples, raw IMU registers) to answer reads. Clones share state, so a test
//! keeps one clone to inspect after moving the other into a session.

use std::{cell::RefCell, rc::Rc};

use super::{
    DisplayInterface, MotionInterface, NativeError, NativeResult, PinInterface, Primitive,
};
use crate::{constants::ADC_CHANNEL_COUNT, units::RawTriple};

/// Return code injected failures report
pub const MOCK_FAILURE_CODE: i32 = -1;

/// A native call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    AdcIoOpen,
    AdcIoClose,
    ReadAdcAll,
    SetIoMode { index: u8, mode: u8 },
    SetIoModeAll(u8),
    ReadIoModes,
    SetIoLevel { index: u8, level: u8 },
    SetIoLevelAll(u8),
    ReadIoLevels,
    MpuOpen {
        sample_rate_hz: u16,
        accel_fsr_g: u8,
        gyro_fsr_dps: u16,
    },
    MpuClose,
    ReadAttitudeRaw,
    ReadGyroRaw,
    ReadAccelRaw,
    LcdOpen(u8),
    LcdClose,
    LcdRefresh,
    SetFont(u8),
    SetForeColor(u32),
    SetBackColor(u32),
    SetLedColor { index: u8, color: u32 },
    Draw(Primitive),
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    adc: [u16; ADC_CHANNEL_COUNT],
    io_modes: u8,
    io_levels: u8,
    attitude: RawTriple,
    gyro: RawTriple,
    accel: RawTriple,
    read_failures: u32,
    open_failures: u32,
}

impl MockState {
    fn take_failure(counter: &mut u32, function: &'static str) -> NativeResult<()> {
        if *counter > 0 {
            *counter -= 1;
            return Err(NativeError::new(function, MOCK_FAILURE_CODE));
        }
        Ok(())
    }

    fn read(&mut self, call: MockCall, function: &'static str) -> NativeResult<()> {
        self.calls.push(call);
        Self::take_failure(&mut self.read_failures, function)
    }

    fn open(&mut self, call: MockCall, function: &'static str) -> NativeResult<()> {
        self.calls.push(call);
        Self::take_failure(&mut self.open_failures, function)
    }
}

/// Recording stand-in for the native library
#[derive(Debug, Clone, Default)]
pub struct MockBoard {
    state: Rc<RefCell<MockState>>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, oldest first
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.borrow().calls.clone()
    }

    /// Number of recorded calls equal to `call`
    pub fn call_count(&self, call: &MockCall) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    /// The drawing calls made so far
    pub fn primitives(&self) -> Vec<Primitive> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                MockCall::Draw(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn set_adc_samples(&self, samples: [u16; ADC_CHANNEL_COUNT]) {
        self.state.borrow_mut().adc = samples;
    }

    /// Simulate the level of every IO line, bit n being channel n
    pub fn set_io_levels(&self, mask: u8) {
        self.state.borrow_mut().io_levels = mask;
    }

    pub fn io_levels(&self) -> u8 {
        self.state.borrow().io_levels
    }

    /// Simulate the mode register of the IO expander
    pub fn set_io_modes(&self, mask: u8) {
        self.state.borrow_mut().io_modes = mask;
    }

    pub fn io_modes(&self) -> u8 {
        self.state.borrow().io_modes
    }

    pub fn set_attitude_raw(&self, raw: RawTriple) {
        self.state.borrow_mut().attitude = raw;
    }

    pub fn set_gyro_raw(&self, raw: RawTriple) {
        self.state.borrow_mut().gyro = raw;
    }

    pub fn set_accel_raw(&self, raw: RawTriple) {
        self.state.borrow_mut().accel = raw;
    }

    /// Make the next `count` sensor or pin reads fail
    pub fn fail_reads(&self, count: u32) {
        self.state.borrow_mut().read_failures = count;
    }

    /// Make the next `count` open calls fail
    pub fn fail_opens(&self, count: u32) {
        self.state.borrow_mut().open_failures = count;
    }

    fn record(&self, call: MockCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl PinInterface for MockBoard {
    fn adc_io_open(&mut self) -> NativeResult<()> {
        self.state
            .borrow_mut()
            .open(MockCall::AdcIoOpen, "adc_io_open")
    }

    fn adc_io_close(&mut self) -> NativeResult<()> {
        self.record(MockCall::AdcIoClose);
        Ok(())
    }

    fn read_adc_all(&mut self, samples: &mut [u16; ADC_CHANNEL_COUNT]) -> NativeResult<()> {
        let mut state = self.state.borrow_mut();
        state.read(MockCall::ReadAdcAll, "ADC_GetAll")?;
        *samples = state.adc;
        Ok(())
    }

    fn set_io_mode(&mut self, index: u8, mode: u8) -> NativeResult<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(MockCall::SetIoMode { index, mode });
        if mode == 0 {
            state.io_modes &= !(1 << index);
        } else {
            state.io_modes |= 1 << index;
        }
        Ok(())
    }

    fn set_io_mode_all(&mut self, mode_mask: u8) -> NativeResult<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(MockCall::SetIoModeAll(mode_mask));
        state.io_modes = mode_mask;
        Ok(())
    }

    fn read_io_modes(&mut self) -> NativeResult<u8> {
        let mut state = self.state.borrow_mut();
        state.read(MockCall::ReadIoModes, "adc_io_ModeGetAll")?;
        Ok(state.io_modes)
    }

    fn set_io_level(&mut self, index: u8, level: u8) -> NativeResult<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(MockCall::SetIoLevel { index, level });
        if level == 0 {
            state.io_levels &= !(1 << index);
        } else {
            state.io_levels |= 1 << index;
        }
        Ok(())
    }

    fn set_io_level_all(&mut self, level_mask: u8) -> NativeResult<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(MockCall::SetIoLevelAll(level_mask));
        state.io_levels = level_mask;
        Ok(())
    }

    fn read_io_levels(&mut self) -> NativeResult<u8> {
        let mut state = self.state.borrow_mut();
        state.read(MockCall::ReadIoLevels, "adc_io_InputGetAll")?;
        Ok(state.io_levels)
    }
}

impl MotionInterface for MockBoard {
    fn mpu_open(
        &mut self,
        sample_rate_hz: u16,
        accel_fsr_g: u8,
        gyro_fsr_dps: u16,
    ) -> NativeResult<()> {
        let call = MockCall::MpuOpen {
            sample_rate_hz,
            accel_fsr_g,
            gyro_fsr_dps,
        };
        self.state.borrow_mut().open(call, "mpu6500_dmp_init")
    }

    fn mpu_close(&mut self) -> NativeResult<()> {
        self.record(MockCall::MpuClose);
        Ok(())
    }

    fn read_attitude_raw(&mut self) -> NativeResult<RawTriple> {
        let mut state = self.state.borrow_mut();
        state.read(MockCall::ReadAttitudeRaw, "mpu6500_Get_Attitude_Raw")?;
        Ok(state.attitude)
    }

    fn read_gyro_raw(&mut self) -> NativeResult<RawTriple> {
        let mut state = self.state.borrow_mut();
        state.read(MockCall::ReadGyroRaw, "mpu_get_gyro_reg")?;
        Ok(state.gyro)
    }

    fn read_accel_raw(&mut self) -> NativeResult<RawTriple> {
        let mut state = self.state.borrow_mut();
        state.read(MockCall::ReadAccelRaw, "mpu_get_accel_reg")?;
        Ok(state.accel)
    }
}

impl DisplayInterface for MockBoard {
    fn lcd_open(&mut self, direction: u8) -> NativeResult<()> {
        self.state
            .borrow_mut()
            .open(MockCall::LcdOpen(direction), "lcd_open")
    }

    fn lcd_close(&mut self) -> NativeResult<()> {
        self.record(MockCall::LcdClose);
        Ok(())
    }

    fn lcd_refresh(&mut self) -> NativeResult<()> {
        self.record(MockCall::LcdRefresh);
        Ok(())
    }

    fn set_font(&mut self, font: u8) -> NativeResult<()> {
        self.record(MockCall::SetFont(font));
        Ok(())
    }

    fn set_fore_color(&mut self, color: u32) -> NativeResult<()> {
        self.record(MockCall::SetForeColor(color));
        Ok(())
    }

    fn set_back_color(&mut self, color: u32) -> NativeResult<()> {
        self.record(MockCall::SetBackColor(color));
        Ok(())
    }

    fn set_led_color(&mut self, index: u8, color: u32) -> NativeResult<()> {
        self.record(MockCall::SetLedColor { index, color });
        Ok(())
    }

    fn draw(&mut self, primitive: &Primitive) -> NativeResult<()> {
        self.record(MockCall::Draw(primitive.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let observer = MockBoard::new();
        let mut board = observer.clone();
        board.lcd_open(2).unwrap();
        assert_eq!(observer.calls(), vec![MockCall::LcdOpen(2)]);
    }

    #[test]
    fn test_io_bits_follow_writes() {
        let mut board = MockBoard::new();
        board.set_io_level(3, 1).unwrap();
        board.set_io_mode(5, 1).unwrap();
        assert_eq!(board.io_levels(), 0b0000_1000);
        assert_eq!(board.read_io_modes().unwrap(), 0b0010_0000);

        board.set_io_level(3, 0).unwrap();
        assert_eq!(board.read_io_levels().unwrap(), 0);
    }

    #[test]
    fn test_injected_read_failure_is_one_shot() {
        let mut board = MockBoard::new();
        board.set_accel_raw([1, 2, 3]);
        board.fail_reads(1);

        let err = board.read_accel_raw().unwrap_err();
        assert_eq!(err.function, "mpu_get_accel_reg");
        assert_eq!(err.code, MOCK_FAILURE_CODE);
        assert_eq!(board.read_accel_raw().unwrap(), [1, 2, 3]);
    }

    #[test]
    fn test_primitives_filter() {
        let mut board = MockBoard::new();
        board.lcd_open(1).unwrap();
        board
            .draw(&Primitive::DrawPixel {
                x0: 1,
                y0: 2,
                color: 0xFF,
            })
            .unwrap();
        board.lcd_refresh().unwrap();
        assert_eq!(board.primitives().len(), 1);
        assert_eq!(board.call_count(&MockCall::LcdRefresh), 1);
    }
}
