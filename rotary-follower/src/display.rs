//! Character LCD status display

use arduino_hal::Delay;
use rotary_core::{status::StatusLcd, Snapshot};

use crate::{
    console::trace,
    pins::{character_lcd::LcdPin, CharacterLcdPins},
};

/// Trait that everything showing the encoder state has
pub trait Display {
    fn display(&mut self, snapshot: &Snapshot);
}

pub struct StatusDisplay {
    lcd: StatusLcd<LcdPin, Delay>,
}

impl StatusDisplay {
    pub fn from_pins(pins: CharacterLcdPins) -> Self {
        let CharacterLcdPins {
            rs,
            enable,
            d4,
            d5,
            d6,
            d7,
        } = pins;
        Self {
            lcd: StatusLcd::new(rs, enable, d4, d5, d6, d7, Delay::new()),
        }
    }
}

impl Display for StatusDisplay {
    fn display(&mut self, snapshot: &Snapshot) {
        if self.lcd.show(snapshot) {
            trace!("[TRACE] [LCD] Redrew {:?}", *snapshot);
        }
    }
}
