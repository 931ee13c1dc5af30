//! Character display trait

use core::fmt::Write;

use heapless::String;

/// Errors that can occur while driving a character display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Cursor position outside the panel
    InvalidCoordinates,
    /// Text did not fit the formatting buffer
    BufferOverflow,
}

/// Text-mode display addressed by row and column
///
/// The panel keeps what was written until it is overwritten or cleared.
pub trait CharacterDisplay {
    /// Clear the screen and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Place the cursor
    ///
    /// - `row`: Row number, 0 at the top
    /// - `col`: Column number, 0 at the left
    fn move_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Write ASCII text at the cursor
    fn write_str(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Write an unsigned number in decimal at the cursor
    fn write_u16(&mut self, value: u16) -> Result<(), DisplayError> {
        let mut buf: String<5> = String::new();
        write!(buf, "{}", value).map_err(|_| DisplayError::BufferOverflow)?;
        self.write_str(&buf)
    }
}
