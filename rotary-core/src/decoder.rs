//! Quadrature direction decode and the bounded position counter

use ufmt::derive::uDebug;

use crate::signal::PinState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// A leads B when rotating clockwise, so on a clockwise edge A has just
    /// moved away from B's level. If A lands on B's level, B was leading.
    pub const fn from_levels(a_after_edge: PinState, latched_b: PinState) -> Self {
        if a_after_edge == latched_b {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }
}

/// Position on a ring of `edges_per_revolution` steps, plus how many steps
/// each way have been taken since the last reset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadratureDecoder {
    position: u16,
    increments: u32,
    decrements: u32,
    edges_per_revolution: u16,
}

impl QuadratureDecoder {
    pub const fn new(edges_per_revolution: u16) -> Self {
        Self {
            position: 0_u16,
            increments: 0_u32,
            decrements: 0_u32,
            edges_per_revolution: if edges_per_revolution == 0 {
                1_u16
            } else {
                edges_per_revolution
            },
        }
    }

    pub const fn position(&self) -> u16 {
        self.position
    }

    pub const fn increments(&self) -> u32 {
        self.increments
    }

    pub const fn decrements(&self) -> u32 {
        self.decrements
    }

    pub const fn edges_per_revolution(&self) -> u16 {
        self.edges_per_revolution
    }

    /// Decode one confirmed edge of A against the level B had when A started moving
    pub fn decode(&mut self, a_after_edge: PinState, latched_b: PinState) -> Direction {
        let direction = Direction::from_levels(a_after_edge, latched_b);
        self.step(direction);
        direction
    }

    /// Move exactly one position, wrapping around the ring
    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Clockwise => {
                self.increments = self.increments.wrapping_add(1);
                self.position += 1;
                if self.position >= self.edges_per_revolution {
                    self.position -= self.edges_per_revolution;
                }
            }
            Direction::CounterClockwise => {
                self.decrements = self.decrements.wrapping_add(1);
                self.position = match self.position.checked_sub(1) {
                    Some(position) => position,
                    None => self.edges_per_revolution - 1,
                };
            }
        }
    }

    /// Zero the position and both counters
    pub fn reset(&mut self) {
        self.position = 0_u16;
        self.increments = 0_u32;
        self.decrements = 0_u32;
    }
}
