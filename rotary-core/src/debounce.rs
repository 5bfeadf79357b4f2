//! Per-channel debounce filter.
//!
//! A level is trusted once `threshold` consecutive samples agree, counting the
//! sample where it first appeared. Any flip in between restarts the count from
//! the newest level, so the filter only ever remembers one sample back.

use ufmt::derive::uDebug;

use crate::signal::{PinState, HIGH, LOW};

#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    /// The stable level after this edge
    pub const fn level(self) -> PinState {
        match self {
            Edge::Rising => HIGH,
            Edge::Falling => LOW,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debouncer {
    stable_level: PinState,
    candidate_level: PinState,
    /// 0 while idle, otherwise how many samples the candidate has held for
    run_length: u8,
    threshold: u8,
}

impl Debouncer {
    /// `idle_level` is what the pull-up gives us with nothing connected
    pub const fn new(idle_level: PinState, threshold: u8) -> Self {
        Self {
            stable_level: idle_level,
            candidate_level: idle_level,
            run_length: 0_u8,
            // A zero threshold would never confirm anything
            threshold: if threshold == 0 { 1_u8 } else { threshold },
        }
    }

    pub const fn stable_level(&self) -> PinState {
        self.stable_level
    }

    /// A candidate level is being counted
    pub const fn is_settling(&self) -> bool {
        self.run_length != 0
    }

    /// `raw` would be the first sample of a new transition. This is the moment
    /// the companion channel has to be latched.
    pub const fn begins_change(&self, raw: PinState) -> bool {
        !self.is_settling() && raw != self.stable_level
    }

    /// Feed one raw sample. Returns the edge once, on the sample that confirms
    /// a level different from the previous stable one.
    pub fn sample(&mut self, raw: PinState) -> Option<Edge> {
        if raw != self.candidate_level {
            self.candidate_level = raw;
            self.run_length = 1_u8;
        } else if self.is_settling() {
            self.run_length += 1_u8;
        } else {
            // Idle and nothing changed
            return None;
        }

        if self.run_length < self.threshold {
            return None;
        }

        self.run_length = 0_u8;
        if self.candidate_level == self.stable_level {
            // Bounced and came back to where it was
            return None;
        }
        self.stable_level = self.candidate_level;
        Some(if self.stable_level {
            Edge::Rising
        } else {
            Edge::Falling
        })
    }
}
