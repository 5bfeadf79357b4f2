//! Status text for the character LCD, and the LCD that shows it

use ag_lcd::{Blink, Cursor, Display, LcdDisplay, Lines};
use embedded_hal::{blocking::delay::DelayUs, digital::v2::OutputPin};
use heapless::String;
use ufmt::uwrite;

use crate::encoder::Snapshot;

/// Width of the 20x4 display
pub const LCD_COLUMNS: usize = 20_usize;
pub const STATUS_ROWS: usize = 3_usize;

/// Enough for the longest label plus a full u32
pub type Line = String<24>;

pub struct StatusLines {
    lines: [Line; STATUS_ROWS],
}

impl StatusLines {
    pub fn render(snapshot: &Snapshot) -> Self {
        let mut lines: [Line; STATUS_ROWS] = [String::new(), String::new(), String::new()];
        // Can't overflow, every line has room for its label and a u32
        let _ = uwrite!(lines[0], "Pos: {}", snapshot.position);
        let _ = uwrite!(lines[1], "Increments: {}", snapshot.increments);
        let _ = uwrite!(lines[2], "Decrements: {}", snapshot.decrements);
        Self { lines }
    }

    /// Row number and the text that fits on it
    pub fn rows(&self) -> impl Iterator<Item = (u8, &str)> {
        self.lines.iter().enumerate().map(|(row, line)| {
            let text = line.as_str();
            (row as u8, text.get(..LCD_COLUMNS).unwrap_or(text))
        })
    }
}

/// 20x4 HD44780 on a 4 bit bus. Rows 2 and 3 start `LCD_COLUMNS` past rows
/// 0 and 1 in display memory, so the column count has to be set too.
pub struct StatusLcd<Pin, Delay>
where
    Pin: OutputPin,
    Delay: DelayUs<u16>,
{
    lcd: LcdDisplay<Pin, Delay>,
    /// Skip redrawing (and the flicker that comes with it) when nothing moved
    last_shown: Option<Snapshot>,
}

impl<Pin, Delay> StatusLcd<Pin, Delay>
where
    Pin: OutputPin,
    Delay: DelayUs<u16>,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(rs: Pin, enable: Pin, d4: Pin, d5: Pin, d6: Pin, d7: Pin, delay: Delay) -> Self {
        let lcd = LcdDisplay::new(rs, enable, delay)
            .with_half_bus(d4, d5, d6, d7)
            .with_display(Display::On)
            .with_cursor(Cursor::Off)
            .with_blink(Blink::Off)
            .with_lines(Lines::FourLines)
            .with_cols(LCD_COLUMNS as u8)
            .build();
        Self {
            lcd,
            last_shown: None,
        }
    }

    /// Draw the snapshot unless it's the one already on screen. Returns
    /// whether anything was sent to the display.
    pub fn show(&mut self, snapshot: &Snapshot) -> bool {
        if self.last_shown == Some(*snapshot) {
            return false;
        }

        self.lcd.clear();
        for (row, text) in StatusLines::render(snapshot).rows() {
            self.lcd.set_position(0, row);
            self.lcd.print(text);
        }
        self.last_shown = Some(*snapshot);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_counter() {
        let status = StatusLines::render(&Snapshot {
            position: 7,
            increments: 12,
            decrements: 5,
        });
        let mut rows = status.rows();
        assert_eq!(rows.next(), Some((0, "Pos: 7")));
        assert_eq!(rows.next(), Some((1, "Increments: 12")));
        assert_eq!(rows.next(), Some((2, "Decrements: 5")));
        assert_eq!(rows.next(), None);
    }

    #[test]
    fn clips_to_the_display_width() {
        let status = StatusLines::render(&Snapshot {
            position: 0,
            increments: u32::MAX,
            decrements: 0,
        });
        let (_, text) = status.rows().nth(1).unwrap();
        assert_eq!(text, "Increments: 42949672");
        assert_eq!(text.len(), LCD_COLUMNS);
    }
}
