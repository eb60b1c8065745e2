// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! LCD screen and RGB LED session.
//!
//! The screen is double buffered: drawing calls rasterise into the library's
//! frame buffer and only [`DisplaySession::refresh`] copies it to the panel.
//! The session counts draws since the last refresh so a refresh with nothing
//! new to show is skipped.

use log::{debug, trace, warn};

use crate::{
    color::Color,
    config::DisplayConfig,
    constants::{LCD_DIRECTION_HORIZONTAL, LCD_DIRECTION_VERTICAL, LED_COUNT},
    interface::{DisplayInterface, Primitive},
    session::SessionState,
    Error, Result,
};

const SESSION: &str = "display";

/// Screen orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    Vertical,
    #[default]
    Horizontal,
}

impl Direction {
    pub fn code(self) -> u8 {
        match self {
            Direction::Vertical => LCD_DIRECTION_VERTICAL,
            Direction::Horizontal => LCD_DIRECTION_HORIZONTAL,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            LCD_DIRECTION_VERTICAL => Ok(Direction::Vertical),
            LCD_DIRECTION_HORIZONTAL => Ok(Direction::Horizontal),
            other => Err(Error::InvalidDirection(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.code()
    }
}

/// Bitmap fonts built into the display library, named by glyph size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Font {
    Font4x6 = 0,
    Font5x8 = 1,
    Font5x12 = 2,
    Font6x8 = 3,
    Font6x10 = 4,
    Font7x12 = 5,
    Font8x8 = 6,
    Font8x12 = 7,
    Font8x14 = 8,
    Font10x16 = 9,
    Font12x16 = 10,
    Font12x20 = 11,
    Font16x26 = 12,
    Font22x36 = 13,
    Font24x40 = 14,
}

impl Font {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Session over the board's screen and LEDs
pub struct DisplaySession<I: DisplayInterface> {
    interface: I,
    state: SessionState,
    direction: Option<Direction>,
    pending_draws: usize,
}

impl<I: DisplayInterface> DisplaySession<I> {
    /// Wrap an interface; the screen starts closed
    pub fn new_with_interface(interface: I) -> Self {
        Self {
            interface,
            state: SessionState::Closed,
            direction: None,
            pending_draws: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Orientation the screen was opened with
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Whether anything has been drawn since the last refresh
    pub fn has_pending_draws(&self) -> bool {
        self.pending_draws > 0
    }

    /// Open the screen; `direction` is 1 (vertical) or 2 (horizontal).
    ///
    /// Reopening with the same direction does nothing; a different
    /// direction re-orients the screen.
    pub fn open(&mut self, direction: u8) -> Result<&mut Self> {
        let direction = Direction::try_from(direction)?;
        if self.state.is_open() && self.direction == Some(direction) {
            trace!("display already open {:?}", direction);
            return Ok(self);
        }
        self.interface.lcd_open(direction.code())?;
        self.state = SessionState::Open;
        self.direction = Some(direction);
        debug!("display opened {:?}", direction);
        Ok(self)
    }

    /// Open in the default horizontal orientation
    pub fn open_default(&mut self) -> Result<&mut Self> {
        self.open(Direction::default().code())
    }

    /// Open, clear to the configured background and show it
    pub fn open_cleared(&mut self, config: &DisplayConfig) -> Result<&mut Self> {
        self.open(config.direction.code())?
            .apply_config(config)?
            .fill_screen(config.back_color)?
            .refresh()
    }

    /// Release the screen. Closing twice is harmless.
    pub fn close(&mut self) -> Result<&mut Self> {
        if !self.state.is_open() {
            return Ok(self);
        }
        self.state = SessionState::Closed;
        self.direction = None;
        self.pending_draws = 0;
        self.interface.lcd_close()?;
        debug!("display closed");
        Ok(self)
    }

    /// Apply the font and text colors from `config`
    pub fn apply_config(&mut self, config: &DisplayConfig) -> Result<&mut Self> {
        self.set_font(config.font)?
            .set_fore_color(config.fore_color)?
            .set_back_color(config.back_color)
    }

    /// Copy the frame buffer to the panel.
    ///
    /// With nothing drawn since the last refresh the panel already shows the
    /// buffer, so no native call is made.
    pub fn refresh(&mut self) -> Result<&mut Self> {
        self.state.require_open(SESSION)?;
        if self.pending_draws == 0 {
            trace!("refresh with no pending draws");
            return Ok(self);
        }
        self.interface.lcd_refresh()?;
        trace!("refreshed {} draws", self.pending_draws);
        self.pending_draws = 0;
        Ok(self)
    }

    pub fn set_font(&mut self, font: Font) -> Result<&mut Self> {
        self.state.require_open(SESSION)?;
        self.interface.set_font(font.code())?;
        Ok(self)
    }

    /// Color used for text and outlines
    pub fn set_fore_color(&mut self, color: Color) -> Result<&mut Self> {
        self.state.require_open(SESSION)?;
        self.interface.set_fore_color(color.raw())?;
        Ok(self)
    }

    /// Color behind text
    pub fn set_back_color(&mut self, color: Color) -> Result<&mut Self> {
        self.state.require_open(SESSION)?;
        self.interface.set_back_color(color.raw())?;
        Ok(self)
    }

    /// Set one of the RGB LEDs beside the screen
    pub fn set_led_color(&mut self, index: u8, color: Color) -> Result<&mut Self> {
        if usize::from(index) >= LED_COUNT {
            return Err(Error::InvalidLedIndex {
                index,
                count: LED_COUNT,
            });
        }
        self.state.require_open(SESSION)?;
        self.interface.set_led_color(index, color.raw())?;
        Ok(self)
    }

    fn draw(&mut self, primitive: Primitive) -> Result<&mut Self> {
        self.state.require_open(SESSION)?;
        self.interface.draw(&primitive)?;
        self.pending_draws += 1;
        Ok(self)
    }

    pub fn fill_screen(&mut self, color: Color) -> Result<&mut Self> {
        self.draw(Primitive::FillScreen { color: color.raw() })
    }

    /// Draw `text` with its top-left corner at (x, y) in the current font
    pub fn put_string(&mut self, x: i16, y: i16, text: &str) -> Result<&mut Self> {
        if text.contains('\0') {
            return Err(Error::InvalidText);
        }
        self.draw(Primitive::PutString {
            x,
            y,
            text: text.to_owned(),
        })
    }

    pub fn fill_frame(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Color,
    ) -> Result<&mut Self> {
        self.draw(Primitive::FillFrame {
            x1,
            y1,
            x2,
            y2,
            color: color.raw(),
        })
    }

    pub fn fill_round_frame(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        r: i16,
        color: Color,
    ) -> Result<&mut Self> {
        self.draw(Primitive::FillRoundFrame {
            x1,
            y1,
            x2,
            y2,
            r,
            color: color.raw(),
        })
    }

    pub fn fill_circle(&mut self, x0: i16, y0: i16, r: i16, color: Color) -> Result<&mut Self> {
        self.draw(Primitive::FillCircle {
            x0,
            y0,
            r,
            color: color.raw(),
        })
    }

    /// Dotted grid covering the rectangle
    pub fn draw_mesh(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Color,
    ) -> Result<&mut Self> {
        self.draw(Primitive::DrawMesh {
            x1,
            y1,
            x2,
            y2,
            color: color.raw(),
        })
    }

    pub fn draw_frame(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Color,
    ) -> Result<&mut Self> {
        self.draw(Primitive::DrawFrame {
            x1,
            y1,
            x2,
            y2,
            color: color.raw(),
        })
    }

    pub fn draw_round_frame(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        r: i16,
        color: Color,
    ) -> Result<&mut Self> {
        self.draw(Primitive::DrawRoundFrame {
            x1,
            y1,
            x2,
            y2,
            r,
            color: color.raw(),
        })
    }

    pub fn draw_pixel(&mut self, x0: i16, y0: i16, color: Color) -> Result<&mut Self> {
        self.draw(Primitive::DrawPixel {
            x0,
            y0,
            color: color.raw(),
        })
    }

    pub fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, color: Color) -> Result<&mut Self> {
        self.draw(Primitive::DrawCircle {
            x0,
            y0,
            r,
            color: color.raw(),
        })
    }

    /// Arc around (x0, y0); each set bit of `sectors` draws one octant
    pub fn draw_arc(
        &mut self,
        x0: i16,
        y0: i16,
        r: i16,
        sectors: u8,
        color: Color,
    ) -> Result<&mut Self> {
        self.draw(Primitive::DrawArc {
            x0,
            y0,
            r,
            s: sectors,
            color: color.raw(),
        })
    }

    pub fn draw_line(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Color,
    ) -> Result<&mut Self> {
        self.draw(Primitive::DrawLine {
            x1,
            y1,
            x2,
            y2,
            color: color.raw(),
        })
    }
}

#[cfg(feature = "native")]
impl DisplaySession<crate::interface::NativeBoard> {
    /// Session over the linked native library
    pub fn native() -> Self {
        Self::new_with_interface(crate::interface::NativeBoard::new())
    }
}

impl<I: DisplayInterface> Drop for DisplaySession<I> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("closing display on drop: {}", e);
        }
    }
}
