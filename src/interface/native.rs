// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Binding to the vendor `libuptech` shared library.
//!
//! The library is linked at build time; locating it at runtime is left to
//! the dynamic loader (`LD_LIBRARY_PATH` or the system library path).

use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_short, c_uchar, c_uint, c_ulong, c_ushort};

use log::trace;

use super::{
    check, DisplayInterface, MotionInterface, NativeError, NativeResult, PinInterface, Primitive,
};
use crate::{constants::ADC_CHANNEL_COUNT, units::RawTriple};

#[allow(non_snake_case)]
#[link(name = "uptech")]
extern "C" {
    fn adc_io_open() -> c_int;
    fn adc_io_close() -> c_int;
    fn ADC_GetAll(data: *mut c_ushort) -> c_int;
    fn adc_io_ModeSet(index: c_int, mode: c_int) -> c_int;
    fn adc_io_ModeSetAll(mode_mask: c_uchar) -> c_int;
    fn adc_io_ModeGetAll(mode_mask: *mut c_uchar) -> c_int;
    fn adc_io_Set(index: c_int, level: c_int) -> c_int;
    fn adc_io_SetAll(level_mask: c_uchar) -> c_int;
    fn adc_io_InputGetAll() -> c_int;
    fn adc_led_set(index: c_int, color: c_uint) -> c_int;

    fn mpu6500_dmp_init() -> c_int;
    fn mpu_set_sample_rate(rate: c_ushort) -> c_int;
    fn mpu_set_accel_fsr(fsr: c_uchar) -> c_int;
    fn mpu_set_gyro_fsr(fsr: c_ushort) -> c_int;
    fn mpu_set_sensors(sensors: c_uchar) -> c_int;
    fn mpu6500_Get_Attitude_Raw(data: *mut c_short) -> c_int;
    fn mpu_get_gyro_reg(data: *mut c_short, timestamp: *mut c_ulong) -> c_int;
    fn mpu_get_accel_reg(data: *mut c_short, timestamp: *mut c_ulong) -> c_int;

    fn lcd_open(direction: c_int) -> c_int;
    fn lcd_close() -> c_int;
    fn LCD_Refresh();
    fn LCD_SetFont(font: c_int);
    fn UG_SetForecolor(color: c_uint);
    fn UG_SetBackcolor(color: c_uint);
    fn UG_FillScreen(color: c_uint);
    fn UG_PutString(x: c_short, y: c_short, text: *const c_char);
    fn UG_FillFrame(x1: c_short, y1: c_short, x2: c_short, y2: c_short, color: c_uint);
    fn UG_FillRoundFrame(
        x1: c_short,
        y1: c_short,
        x2: c_short,
        y2: c_short,
        r: c_short,
        color: c_uint,
    );
    fn UG_FillCircle(x0: c_short, y0: c_short, r: c_short, color: c_uint);
    fn UG_DrawMesh(x1: c_short, y1: c_short, x2: c_short, y2: c_short, color: c_uint);
    fn UG_DrawFrame(x1: c_short, y1: c_short, x2: c_short, y2: c_short, color: c_uint);
    fn UG_DrawRoundFrame(
        x1: c_short,
        y1: c_short,
        x2: c_short,
        y2: c_short,
        r: c_short,
        color: c_uint,
    );
    fn UG_DrawPixel(x0: c_short, y0: c_short, color: c_uint);
    fn UG_DrawCircle(x0: c_short, y0: c_short, r: c_short, color: c_uint);
    fn UG_DrawArc(x0: c_short, y0: c_short, r: c_short, s: c_uchar, color: c_uint);
    fn UG_DrawLine(x1: c_short, y1: c_short, x2: c_short, y2: c_short, color: c_uint);
}

/// `mpu_set_sensors` mask enabling the gyroscope and accelerometer
const MPU_SENSORS_ON: c_uchar = 0x70 | 0x08;
const MPU_SENSORS_OFF: c_uchar = 0;

/// Handle to the linked native library.
///
/// The library keeps its device state globally, so the handle itself carries
/// nothing; owning one is what entitles a session to call into it.
#[derive(Debug, Default)]
pub struct NativeBoard {
    _private: (),
}

impl NativeBoard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PinInterface for NativeBoard {
    fn adc_io_open(&mut self) -> NativeResult<()> {
        // SAFETY: no arguments; the library guards repeated opens itself.
        check("adc_io_open", unsafe { adc_io_open() })?;
        Ok(())
    }

    fn adc_io_close(&mut self) -> NativeResult<()> {
        // SAFETY: no arguments.
        check("adc_io_close", unsafe { adc_io_close() })?;
        Ok(())
    }

    fn read_adc_all(&mut self, samples: &mut [u16; ADC_CHANNEL_COUNT]) -> NativeResult<()> {
        // SAFETY: the library writes exactly ADC_CHANNEL_COUNT samples.
        check("ADC_GetAll", unsafe { ADC_GetAll(samples.as_mut_ptr()) })?;
        Ok(())
    }

    fn set_io_mode(&mut self, index: u8, mode: u8) -> NativeResult<()> {
        // SAFETY: plain integer arguments, range checked by the caller.
        let rc = unsafe { adc_io_ModeSet(c_int::from(index), c_int::from(mode)) };
        check("adc_io_ModeSet", rc)?;
        Ok(())
    }

    fn set_io_mode_all(&mut self, mode_mask: u8) -> NativeResult<()> {
        // SAFETY: plain integer argument.
        check("adc_io_ModeSetAll", unsafe { adc_io_ModeSetAll(mode_mask) })?;
        Ok(())
    }

    fn read_io_modes(&mut self) -> NativeResult<u8> {
        let mut mask: c_uchar = 0;
        // SAFETY: the library writes one byte through a valid pointer.
        check("adc_io_ModeGetAll", unsafe { adc_io_ModeGetAll(&mut mask) })?;
        Ok(mask)
    }

    fn set_io_level(&mut self, index: u8, level: u8) -> NativeResult<()> {
        // SAFETY: plain integer arguments, range checked by the caller.
        let rc = unsafe { adc_io_Set(c_int::from(index), c_int::from(level)) };
        check("adc_io_Set", rc)?;
        Ok(())
    }

    fn set_io_level_all(&mut self, level_mask: u8) -> NativeResult<()> {
        // SAFETY: plain integer argument.
        check("adc_io_SetAll", unsafe { adc_io_SetAll(level_mask) })?;
        Ok(())
    }

    fn read_io_levels(&mut self) -> NativeResult<u8> {
        // SAFETY: no arguments.
        let mask = check("adc_io_InputGetAll", unsafe { adc_io_InputGetAll() })?;
        Ok(mask as u8)
    }
}

impl MotionInterface for NativeBoard {
    fn mpu_open(
        &mut self,
        sample_rate_hz: u16,
        accel_fsr_g: u8,
        gyro_fsr_dps: u16,
    ) -> NativeResult<()> {
        // SAFETY: plain integer arguments, validated by the session.
        unsafe {
            check("mpu6500_dmp_init", mpu6500_dmp_init())?;
            check("mpu_set_sensors", mpu_set_sensors(MPU_SENSORS_ON))?;
            check("mpu_set_sample_rate", mpu_set_sample_rate(sample_rate_hz))?;
            check("mpu_set_accel_fsr", mpu_set_accel_fsr(accel_fsr_g))?;
            check("mpu_set_gyro_fsr", mpu_set_gyro_fsr(gyro_fsr_dps))?;
        }
        Ok(())
    }

    fn mpu_close(&mut self) -> NativeResult<()> {
        // SAFETY: plain integer argument.
        check("mpu_set_sensors", unsafe { mpu_set_sensors(MPU_SENSORS_OFF) })?;
        Ok(())
    }

    fn read_attitude_raw(&mut self) -> NativeResult<RawTriple> {
        let mut raw: RawTriple = [0; 3];
        // SAFETY: the library writes three shorts.
        let rc = unsafe { mpu6500_Get_Attitude_Raw(raw.as_mut_ptr()) };
        check("mpu6500_Get_Attitude_Raw", rc)?;
        Ok(raw)
    }

    fn read_gyro_raw(&mut self) -> NativeResult<RawTriple> {
        let mut raw: RawTriple = [0; 3];
        let mut timestamp: c_ulong = 0;
        // SAFETY: the library writes three shorts and one timestamp.
        let rc = unsafe { mpu_get_gyro_reg(raw.as_mut_ptr(), &mut timestamp) };
        check("mpu_get_gyro_reg", rc)?;
        trace!("gyro sample at {}", timestamp);
        Ok(raw)
    }

    fn read_accel_raw(&mut self) -> NativeResult<RawTriple> {
        let mut raw: RawTriple = [0; 3];
        let mut timestamp: c_ulong = 0;
        // SAFETY: the library writes three shorts and one timestamp.
        let rc = unsafe { mpu_get_accel_reg(raw.as_mut_ptr(), &mut timestamp) };
        check("mpu_get_accel_reg", rc)?;
        trace!("accel sample at {}", timestamp);
        Ok(raw)
    }
}

impl DisplayInterface for NativeBoard {
    fn lcd_open(&mut self, direction: u8) -> NativeResult<()> {
        // SAFETY: direction already checked to be 1 or 2.
        check("lcd_open", unsafe { lcd_open(c_int::from(direction)) })?;
        Ok(())
    }

    fn lcd_close(&mut self) -> NativeResult<()> {
        // SAFETY: no arguments.
        check("lcd_close", unsafe { lcd_close() })?;
        Ok(())
    }

    fn lcd_refresh(&mut self) -> NativeResult<()> {
        // SAFETY: no arguments.
        unsafe { LCD_Refresh() };
        Ok(())
    }

    fn set_font(&mut self, font: u8) -> NativeResult<()> {
        // SAFETY: font index comes from the closed Font enum.
        unsafe { LCD_SetFont(c_int::from(font)) };
        Ok(())
    }

    fn set_fore_color(&mut self, color: u32) -> NativeResult<()> {
        // SAFETY: plain integer argument.
        unsafe { UG_SetForecolor(color) };
        Ok(())
    }

    fn set_back_color(&mut self, color: u32) -> NativeResult<()> {
        // SAFETY: plain integer argument.
        unsafe { UG_SetBackcolor(color) };
        Ok(())
    }

    fn set_led_color(&mut self, index: u8, color: u32) -> NativeResult<()> {
        // SAFETY: index already checked against LED_COUNT.
        check("adc_led_set", unsafe { adc_led_set(c_int::from(index), color) })?;
        Ok(())
    }

    fn draw(&mut self, primitive: &Primitive) -> NativeResult<()> {
        // SAFETY: every call takes plain integers except UG_PutString, which
        // gets a NUL-terminated string that outlives the call.
        unsafe {
            match *primitive {
                Primitive::FillScreen { color } => UG_FillScreen(color),
                Primitive::PutString { x, y, ref text } => {
                    let text = CString::new(text.as_str())
                        .map_err(|_| NativeError::new("UG_PutString", -1))?;
                    UG_PutString(x, y, text.as_ptr())
                }
                Primitive::FillFrame {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                } => UG_FillFrame(x1, y1, x2, y2, color),
                Primitive::FillRoundFrame {
                    x1,
                    y1,
                    x2,
                    y2,
                    r,
                    color,
                } => UG_FillRoundFrame(x1, y1, x2, y2, r, color),
                Primitive::FillCircle { x0, y0, r, color } => UG_FillCircle(x0, y0, r, color),
                Primitive::DrawMesh {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                } => UG_DrawMesh(x1, y1, x2, y2, color),
                Primitive::DrawFrame {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                } => UG_DrawFrame(x1, y1, x2, y2, color),
                Primitive::DrawRoundFrame {
                    x1,
                    y1,
                    x2,
                    y2,
                    r,
                    color,
                } => UG_DrawRoundFrame(x1, y1, x2, y2, r, color),
                Primitive::DrawPixel { x0, y0, color } => UG_DrawPixel(x0, y0, color),
                Primitive::DrawCircle { x0, y0, r, color } => UG_DrawCircle(x0, y0, r, color),
                Primitive::DrawArc {
                    x0,
                    y0,
                    r,
                    s,
                    color,
                } => UG_DrawArc(x0, y0, r, s, color),
                Primitive::DrawLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                } => UG_DrawLine(x1, y1, x2, y2, color),
            }
        }
        Ok(())
    }
}
