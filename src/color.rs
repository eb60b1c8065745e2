// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Display and LED colors.
//!
//! The canonical encoding is 24-bit packed RGB, `(r << 16) | (g << 8) | b`.
//! Older firmware used a 16-bit RGB565 palette; those codes are still
//! accepted through [`Palette`] and passed to the display untouched.

use crate::{constants::COLOR_COMPONENT_MAX, Error, Result};

/// A color value as handed to the native display and LED calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color::from_rgb8(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb8(255, 255, 255);
    pub const RED: Color = Color::from_rgb8(255, 0, 0);
    pub const GREEN: Color = Color::from_rgb8(0, 255, 0);
    pub const BLUE: Color = Color::from_rgb8(0, 0, 255);
    pub const YELLOW: Color = Color::from_rgb8(255, 255, 0);
    pub const CYAN: Color = Color::from_rgb8(0, 255, 255);
    pub const MAGENTA: Color = Color::from_rgb8(255, 0, 255);
    pub const GRAY: Color = Color::from_rgb8(128, 128, 128);

    /// Pack three components, rejecting any outside 0..=255
    pub fn rgb(r: u32, g: u32, b: u32) -> Result<Self> {
        check_component("red", r)?;
        check_component("green", g)?;
        check_component("blue", b)?;
        Ok(Color((r << 16) | (g << 8) | b))
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Wrap a legacy 16-bit palette code without interpreting it
    pub const fn from_legacy(code: u16) -> Self {
        Color(code as u32)
    }

    /// The value passed to the native library
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Component triple, only meaningful for 24-bit colors
    pub const fn components(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

fn check_component(name: &'static str, value: u32) -> Result<()> {
    if value > COLOR_COMPONENT_MAX {
        return Err(Error::InvalidColorComponent { name, value });
    }
    Ok(())
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.raw()
    }
}

impl From<Palette> for Color {
    fn from(palette: Palette) -> Self {
        Color::from_legacy(palette.code())
    }
}

/// Legacy RGB565 palette of the first display firmware.
///
/// Several names share a code (`Bred`/`Magenta`, `Gred`/`Yellow`), so the
/// codes are returned by [`Palette::code`] rather than used as discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    White,
    Black,
    Blue,
    Bred,
    Gred,
    Gblue,
    Red,
    Magenta,
    Green,
    Cyan,
    Yellow,
    Brown,
    Brred,
    Gray,
    DarkBlue,
    LightBlue,
    GrayBlue,
    LightGreen,
    Lgray,
    LgrayBlue,
    LbBlue,
}

impl Palette {
    pub const fn code(self) -> u16 {
        match self {
            Palette::White => 0xFFFF,
            Palette::Black => 0x0000,
            Palette::Blue => 0x001F,
            Palette::Bred => 0xF81F,
            Palette::Gred => 0xFFE0,
            Palette::Gblue => 0x07FF,
            Palette::Red => 0xF800,
            Palette::Magenta => 0xF81F,
            Palette::Green => 0x07E0,
            Palette::Cyan => 0x7FFF,
            Palette::Yellow => 0xFFE0,
            Palette::Brown => 0xBC40,
            Palette::Brred => 0xFC07,
            Palette::Gray => 0x8430,
            Palette::DarkBlue => 0x01CF,
            Palette::LightBlue => 0x7D7C,
            Palette::GrayBlue => 0x5458,
            Palette::LightGreen => 0x841F,
            Palette::Lgray => 0xC618,
            Palette::LgrayBlue => 0xA651,
            Palette::LbBlue => 0x2B12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_packing() {
        assert_eq!(Color::rgb(255, 0, 0).unwrap().raw(), 0xFF0000);
        assert_eq!(Color::rgb(0, 255, 0).unwrap().raw(), 0x00FF00);
        assert_eq!(Color::rgb(0, 0, 255).unwrap().raw(), 0x0000FF);
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).unwrap().raw(), 0x123456);
    }

    #[test]
    fn test_rgb_rejects_out_of_range_component() {
        match Color::rgb(256, 0, 0) {
            Err(Error::InvalidColorComponent { name, value }) => {
                assert_eq!(name, "red");
                assert_eq!(value, 256);
            }
            other => panic!("expected InvalidColorComponent, got {:?}", other),
        }
        assert!(matches!(
            Color::rgb(0, 0, 1000),
            Err(Error::InvalidColorComponent { name: "blue", .. })
        ));
    }

    #[test]
    fn test_named_colors_match_rgb() {
        assert_eq!(Color::RED, Color::rgb(255, 0, 0).unwrap());
        assert_eq!(Color::WHITE.raw(), 0xFFFFFF);
        assert_eq!(Color::BLACK.raw(), 0);
        assert_eq!(Color::CYAN.components(), (0, 255, 255));
    }

    #[test]
    fn test_legacy_palette_is_verbatim() {
        assert_eq!(Color::from(Palette::Red).raw(), 0xF800);
        assert_eq!(Color::from(Palette::White).raw(), 0xFFFF);
        assert_eq!(Palette::Magenta.code(), Palette::Bred.code());
        assert_eq!(Color::from_legacy(0x2B12).raw(), 0x2B12);
    }
}
