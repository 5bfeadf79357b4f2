//! Per-board pin and timer assignments.
//!
//! Pins are Arduino digital pin numbers as printed on the board. The firmware
//! picks one of these tables with a cargo feature and its typed pin map in
//! `pins.rs` mirrors it; the tables are also what gets printed in the startup
//! banner.

use crate::config::ConfigError;

const MICROS_PER_SECOND: u64 = 1_000_000_u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderPins {
    /// Leads B when rotating clockwise
    pub a: u8,
    pub b: u8,
    /// Low when pressed
    pub button: u8,
    pub reset_switch: Option<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcdPins {
    pub rs: u8,
    pub enable: u8,
    pub d4: u8,
    pub d5: u8,
    pub d6: u8,
    pub d7: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepperPins {
    pub step: u8,
    pub dir: u8,
    pub enable: u8,
    pub chip_select: u8,
}

/// A hardware timer's clocking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerAssignment {
    pub cpu_hz: u32,
    pub prescaler: u16,
}

impl TimerAssignment {
    /// Compare-register increment that schedules the next tick `tick_us` after
    /// the current one. The interval has to be a whole number of timer counts
    /// and fit in an 8 bit compare register.
    pub const fn compare_increment(&self, tick_us: u16) -> Result<u8, ConfigError> {
        if tick_us == 0 {
            return Err(ConfigError::NoTickInterval);
        }
        let scaled = tick_us as u64 * self.cpu_hz as u64;
        let per_count = self.prescaler as u64 * MICROS_PER_SECOND;
        if scaled % per_count != 0 {
            return Err(ConfigError::TickNotMultipleOfTimer);
        }
        let counts = scaled / per_count;
        if counts > u8::MAX as u64 {
            return Err(ConfigError::TickTooLong);
        }
        Ok(counts as u8)
    }

    pub const fn counts_to_micros(&self, counts: u32) -> u32 {
        (counts as u64 * self.prescaler as u64 * MICROS_PER_SECOND / self.cpu_hz as u64) as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub name: &'static str,
    pub encoder: EncoderPins,
    pub lcd: LcdPins,
    pub buzzer: u8,
    /// Only the Mega drives a stepper
    pub stepper: Option<StepperPins>,
    /// Timer 0, compare match A (and B with dual interrupts)
    pub tick_timer: TimerAssignment,
    /// Timer 1, free running; only used to time the tick handler
    pub timestamp_timer: TimerAssignment,
}

const CPU_HZ: u32 = 16_000_000_u32;

const TICK_TIMER: TimerAssignment = TimerAssignment {
    cpu_hz: CPU_HZ,
    prescaler: 64_u16,
};

const TIMESTAMP_TIMER: TimerAssignment = TimerAssignment {
    cpu_hz: CPU_HZ,
    prescaler: 8_u16,
};

pub const ARDUINO_UNO: BoardConfig = BoardConfig {
    name: "Arduino Uno",
    encoder: EncoderPins {
        a: 8,
        b: 9,
        button: 10,
        reset_switch: None,
    },
    lcd: LcdPins {
        rs: 2,
        enable: 3,
        d4: 4,
        d5: 5,
        d6: 6,
        d7: 7,
    },
    buzzer: 11,
    stepper: None,
    tick_timer: TICK_TIMER,
    timestamp_timer: TIMESTAMP_TIMER,
};

/// RAMPS style wiring: EXP1/EXP2 headers for the LCD and encoder, X axis driver
pub const ARDUINO_MEGA2560: BoardConfig = BoardConfig {
    name: "Arduino Mega 2560",
    encoder: EncoderPins {
        a: 31,
        b: 33,
        button: 35,
        reset_switch: Some(41),
    },
    lcd: LcdPins {
        rs: 16,
        enable: 17,
        d4: 23,
        d5: 25,
        d6: 27,
        d7: 29,
    },
    buzzer: 37,
    stepper: Some(StepperPins {
        step: 54,
        dir: 55,
        enable: 38,
        chip_select: 53,
    }),
    tick_timer: TICK_TIMER,
    timestamp_timer: TIMESTAMP_TIMER,
};
