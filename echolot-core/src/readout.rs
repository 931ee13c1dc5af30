//! Distance readout layout
//!
//! ```text
//! col  0         1
//!      0123456789012345
//! row0 Distance = 42cm
//! ```
//!
//! The label is drawn once. Each reading rewrites only the value field, so
//! the field is padded with blanks to erase digits left by a longer
//! previous value.

use crate::error::RangeError;
use crate::traits::display::{CharacterDisplay, DisplayError};

/// Fixed label in front of the value
pub const LABEL: &str = "Distance = ";

/// Row holding the readout
pub const VALUE_ROW: u8 = 0;

/// First column of the value field
pub const VALUE_COL: u8 = LABEL.len() as u8;

/// Unit suffix
pub const UNIT: &str = "cm";

/// Columns on the reference panel
pub const PANEL_COLS: u8 = 16;

/// Width of the value field including the unit
pub const FIELD_WIDTH: usize = (PANEL_COLS - VALUE_COL) as usize;

/// Largest reading that fits in the field with its unit
pub const MAX_SHOWN: u16 = 999;

/// Shown in place of a reading above `MAX_SHOWN`
pub const OVER_RANGE: &str = ">999";

/// Shown in place of a value when no echo came back
pub const NO_ECHO: &str = "---";

/// Shown in place of a value for any other failure
pub const FAULT: &str = "Err";

const BLANKS: &str = "     ";

/// Renders measurements onto a character display
#[derive(Debug, Default)]
pub struct DistanceReadout {
    label_drawn: bool,
}

impl DistanceReadout {
    pub const fn new() -> Self {
        Self { label_drawn: false }
    }

    /// Force the label to be redrawn on the next render
    pub fn invalidate(&mut self) {
        self.label_drawn = false;
    }

    /// Show one measurement
    pub fn render<D: CharacterDisplay + ?Sized>(
        &mut self,
        display: &mut D,
        reading: Result<u16, RangeError>,
    ) -> Result<(), DisplayError> {
        if !self.label_drawn {
            display.clear()?;
            display.move_cursor(VALUE_ROW, 0)?;
            display.write_str(LABEL)?;
            self.label_drawn = true;
        }

        display.move_cursor(VALUE_ROW, VALUE_COL)?;
        let used = match reading {
            Ok(cm) if cm > MAX_SHOWN => {
                display.write_str(OVER_RANGE)?;
                OVER_RANGE.len()
            }
            Ok(cm) => {
                display.write_u16(cm)?;
                display.write_str(UNIT)?;
                decimal_digits(cm) + UNIT.len()
            }
            Err(RangeError::Timeout) => {
                display.write_str(NO_ECHO)?;
                NO_ECHO.len()
            }
            Err(_) => {
                display.write_str(FAULT)?;
                FAULT.len()
            }
        };

        let pad = FIELD_WIDTH.saturating_sub(used);
        if pad > 0 {
            display.write_str(&BLANKS[..pad])?;
        }
        Ok(())
    }
}

fn decimal_digits(mut value: u16) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    /// 2x16 panel backed by a byte grid
    struct MockDisplay {
        cells: [[u8; 16]; 2],
        row: usize,
        col: usize,
        clears: usize,
    }

    impl MockDisplay {
        fn new() -> Self {
            Self {
                cells: [[b' '; 16]; 2],
                row: 0,
                col: 0,
                clears: 0,
            }
        }

        fn row(&self, row: usize) -> &str {
            core::str::from_utf8(&self.cells[row]).unwrap()
        }
    }

    impl CharacterDisplay for MockDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.cells = [[b' '; 16]; 2];
            self.row = 0;
            self.col = 0;
            self.clears += 1;
            Ok(())
        }

        fn move_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
            if row >= 2 || col >= 16 {
                return Err(DisplayError::InvalidCoordinates);
            }
            self.row = row as usize;
            self.col = col as usize;
            Ok(())
        }

        fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
            for byte in text.bytes() {
                if self.col >= 16 {
                    return Err(DisplayError::BufferOverflow);
                }
                self.cells[self.row][self.col] = byte;
                self.col += 1;
            }
            Ok(())
        }
    }

    #[test]
    fn test_first_render_draws_label() {
        let mut display = MockDisplay::new();
        let mut readout = DistanceReadout::new();

        readout.render(&mut display, Ok(100)).unwrap();
        assert_eq!(display.row(0), "Distance = 100cm");
        assert_eq!(display.clears, 1);
    }

    #[test]
    fn test_label_drawn_once() {
        let mut display = MockDisplay::new();
        let mut readout = DistanceReadout::new();

        readout.render(&mut display, Ok(100)).unwrap();
        readout.render(&mut display, Ok(101)).unwrap();
        assert_eq!(display.clears, 1);

        readout.invalidate();
        readout.render(&mut display, Ok(102)).unwrap();
        assert_eq!(display.clears, 2);
        assert_eq!(display.row(0), "Distance = 102cm");
    }

    #[test]
    fn test_shorter_value_erases_stale_digits() {
        let mut display = MockDisplay::new();
        let mut readout = DistanceReadout::new();

        readout.render(&mut display, Ok(123)).unwrap();
        readout.render(&mut display, Ok(42)).unwrap();
        assert_eq!(display.row(0), "Distance = 42cm ");

        readout.render(&mut display, Ok(7)).unwrap();
        assert_eq!(display.row(0), "Distance = 7cm  ");
    }

    #[test]
    fn test_failures() {
        let mut display = MockDisplay::new();
        let mut readout = DistanceReadout::new();

        readout.render(&mut display, Ok(250)).unwrap();
        readout.render(&mut display, Err(RangeError::Timeout)).unwrap();
        assert_eq!(display.row(0), "Distance = ---  ");

        readout
            .render(
                &mut display,
                Err(RangeError::Config(ConfigError::ZeroCpuClock)),
            )
            .unwrap();
        assert_eq!(display.row(0), "Distance = Err  ");
    }

    #[test]
    fn test_long_reading_stays_on_panel() {
        let mut display = MockDisplay::new();
        let mut readout = DistanceReadout::new();

        readout.render(&mut display, Ok(999)).unwrap();
        assert_eq!(display.row(0), "Distance = 999cm");

        readout.render(&mut display, Ok(1129)).unwrap();
        assert_eq!(display.row(0), "Distance = >999 ");

        readout.render(&mut display, Ok(u16::MAX)).unwrap();
        assert_eq!(display.row(0), "Distance = >999 ");

        readout.render(&mut display, Ok(5)).unwrap();
        assert_eq!(display.row(0), "Distance = 5cm  ");
    }

    #[test]
    fn test_display_error_propagates() {
        struct Broken;
        impl CharacterDisplay for Broken {
            fn clear(&mut self) -> Result<(), DisplayError> {
                Ok(())
            }
            fn move_cursor(&mut self, _row: u8, _col: u8) -> Result<(), DisplayError> {
                Err(DisplayError::InvalidCoordinates)
            }
            fn write_str(&mut self, _text: &str) -> Result<(), DisplayError> {
                Ok(())
            }
        }

        let mut readout = DistanceReadout::new();
        assert_eq!(
            readout.render(&mut Broken, Ok(1)),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(999), 3);
        assert_eq!(decimal_digits(u16::MAX), 5);
    }
}
