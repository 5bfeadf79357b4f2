//! Encoder tuning. Everything here is meant to be evaluated at compile time.

use ufmt::derive::uDebug;

pub const DETENTS_PER_REVOLUTION: u16 = 20_u16;
/// Consecutive identical samples, the changing one included, before a level is trusted
pub const DEBOUNCE_THRESHOLD: u8 = 4_u8;
/// 256us keeps the whole debounce window around a millisecond
pub const TICK_INTERVAL_US: u16 = 256_u16;
/// Most detents whose doubled count still fits in the position counter
pub const MAX_DETENTS: u16 = u16::MAX / 2_u16;

/// Which confirmed edges of channel A move the position
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum CountedEdges {
    /// One count per rising edge of A
    Rising,
    /// Both edges of A; the direction rule holds for either edge
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum ConfigError {
    NoDetents,
    /// Doubling the detents doesn't fit in the position counter
    TooManyDetents,
    NoDebounce,
    NoTickInterval,
    /// The tick interval isn't a whole number of timer counts
    TickNotMultipleOfTimer,
    /// The tick interval doesn't fit in the 8 bit compare register
    TickTooLong,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    pub detents_per_revolution: u16,
    pub debounce_threshold: u8,
    pub tick_interval_us: u16,
    pub counted_edges: CountedEdges,
}

impl EncoderConfig {
    pub const DEFAULT: Self = Self {
        detents_per_revolution: DETENTS_PER_REVOLUTION,
        debounce_threshold: DEBOUNCE_THRESHOLD,
        tick_interval_us: TICK_INTERVAL_US,
        counted_edges: CountedEdges::Rising,
    };

    /// Positions per revolution; the position wraps at this value. Detents
    /// past `MAX_DETENTS` are clamped so an unvalidated config can't overflow.
    pub const fn edges_per_revolution(&self) -> u16 {
        if self.detents_per_revolution > MAX_DETENTS {
            MAX_DETENTS * 2_u16
        } else {
            self.detents_per_revolution * 2_u16
        }
    }

    pub const fn validate(self) -> Result<Self, ConfigError> {
        if self.detents_per_revolution == 0 {
            return Err(ConfigError::NoDetents);
        }
        if self.detents_per_revolution > MAX_DETENTS {
            return Err(ConfigError::TooManyDetents);
        }
        if self.debounce_threshold == 0 {
            return Err(ConfigError::NoDebounce);
        }
        if self.tick_interval_us == 0 {
            return Err(ConfigError::NoTickInterval);
        }
        Ok(self)
    }

    /// Time between two runs of the pipeline when `tick_sources` compare
    /// channels each fire once per tick interval, evenly out of phase
    pub const fn sampling_interval_us(&self, tick_sources: u8) -> u16 {
        let tick_sources = if tick_sources == 0 { 1_u8 } else { tick_sources };
        self.tick_interval_us / tick_sources as u16
    }

    /// Samples needed to confirm one transition, i.e. the debounce window
    pub const fn debounce_window_us(&self, tick_sources: u8) -> u32 {
        self.debounce_threshold as u32 * self.sampling_interval_us(tick_sources) as u32
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
