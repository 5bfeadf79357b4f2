//! The per-tick pipeline: sample → debounce A → decode against latched B → reset
//!
//! `EncoderState::tick` is the whole interrupt body minus the hardware. It is
//! constant time: no loops, no waiting, integer compares only.

use ufmt::derive::uDebug;

use crate::{
    config::{CountedEdges, EncoderConfig},
    debounce::{Debouncer, Edge},
    decoder::{Direction, QuadratureDecoder},
    signal::{PinState, Sample, HIGH},
};

/// Position and counters, copied together
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, uDebug)]
pub struct Snapshot {
    pub position: u16,
    pub increments: u32,
    pub decrements: u32,
}

/// How often the tick ran and how long it took, for the serial report only
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, uDebug)]
pub struct Telemetry {
    pub interrupts: u32,
    pub busy_us: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderState {
    a: Debouncer,
    /// B as it was when A started to move, held until the edge is decoded
    latched_b: Option<PinState>,
    decoder: QuadratureDecoder,
    counted_edges: CountedEdges,
    telemetry: Telemetry,
}

impl EncoderState {
    pub const fn new(config: EncoderConfig) -> Self {
        Self {
            a: Debouncer::new(HIGH, config.debounce_threshold),
            latched_b: None,
            decoder: QuadratureDecoder::new(config.edges_per_revolution()),
            counted_edges: config.counted_edges,
            telemetry: Telemetry {
                interrupts: 0_u32,
                busy_us: 0_u32,
            },
        }
    }

    /// Run one tick. Returns the direction if a counted edge was decoded on
    /// this tick (even if a held reset then zeroed it again).
    pub fn tick(&mut self, sample: Sample) -> Option<Direction> {
        self.telemetry.interrupts = self.telemetry.interrupts.wrapping_add(1);

        // B has to be captured now, by the time A is confirmed it may have moved too
        if self.a.begins_change(sample.a) {
            self.latched_b = Some(sample.b);
        }

        let direction = match self.a.sample(sample.a) {
            Some(edge) => {
                let latched_b = self.latched_b.take().unwrap_or(sample.b);
                if self.counts(edge) {
                    Some(self.decoder.decode(edge.level(), latched_b))
                } else {
                    None
                }
            }
            None => None,
        };

        // Zeroing is idempotent so the button needs no debounce of its own
        if sample.reset_requested() {
            self.decoder.reset();
        }

        direction
    }

    fn counts(&self, edge: Edge) -> bool {
        match self.counted_edges {
            CountedEdges::Rising => edge == Edge::Rising,
            CountedEdges::Both => true,
        }
    }

    pub fn record_busy(&mut self, micros: u32) {
        self.telemetry.busy_us = self.telemetry.busy_us.wrapping_add(micros);
    }

    pub const fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.decoder.position(),
            increments: self.decoder.increments(),
            decrements: self.decoder.decrements(),
        }
    }

    pub const fn telemetry(&self) -> Telemetry {
        self.telemetry
    }

    pub const fn edges_per_revolution(&self) -> u16 {
        self.decoder.edges_per_revolution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::LOW;

    fn hold(state: &mut EncoderState, sample: Sample, ticks: usize) -> Option<Direction> {
        let mut decoded = None;
        for _ in 0..ticks {
            if let Some(direction) = state.tick(sample) {
                decoded = Some(direction);
            }
        }
        decoded
    }

    #[test]
    fn b_is_latched_when_a_starts_moving() {
        let mut state = EncoderState::new(EncoderConfig::DEFAULT);
        hold(&mut state, Sample::new(LOW, LOW, HIGH), 4);
        assert_eq!(state.snapshot().position, 0);

        // A starts rising with B low, then B follows before A is confirmed
        state.tick(Sample::new(HIGH, LOW, HIGH));
        let decoded = hold(&mut state, Sample::new(HIGH, HIGH, HIGH), 3);
        assert_eq!(decoded, Some(Direction::Clockwise));
        assert_eq!(state.snapshot().position, 1);
    }

    #[test]
    fn b_only_activity_never_moves() {
        let mut state = EncoderState::new(EncoderConfig::DEFAULT);
        for _ in 0..10 {
            hold(&mut state, Sample::new(HIGH, LOW, HIGH), 5);
            hold(&mut state, Sample::new(HIGH, HIGH, HIGH), 5);
        }
        assert_eq!(state.snapshot(), Snapshot::default());
    }

    #[test]
    fn falling_edges_count_when_configured() {
        let config = EncoderConfig {
            counted_edges: CountedEdges::Both,
            ..EncoderConfig::DEFAULT
        };
        let mut state = EncoderState::new(config);
        // Clockwise quadrature: A falls while B is high, then B falls, A rises...
        let clockwise = [
            Sample::new(LOW, HIGH, HIGH),
            Sample::new(LOW, LOW, HIGH),
            Sample::new(HIGH, LOW, HIGH),
            Sample::new(HIGH, HIGH, HIGH),
        ];
        for sample in clockwise {
            hold(&mut state, sample, 4);
        }
        let snapshot = state.snapshot();
        assert_eq!(snapshot.position, 2);
        assert_eq!(snapshot.increments, 2);
        assert_eq!(snapshot.decrements, 0);
    }

    #[test]
    fn rising_only_ignores_falling_edges() {
        let mut state = EncoderState::new(EncoderConfig::DEFAULT);
        assert_eq!(hold(&mut state, Sample::new(LOW, HIGH, HIGH), 4), None);
        assert_eq!(state.snapshot().position, 0);
    }

    #[test]
    fn unvalidated_config_is_clamped() {
        let config = EncoderConfig {
            detents_per_revolution: u16::MAX,
            debounce_threshold: 0,
            ..EncoderConfig::DEFAULT
        };
        let mut state = EncoderState::new(config);
        assert_eq!(state.edges_per_revolution(), u16::MAX - 1);

        // Counter-clockwise from zero wraps to the clamped top
        hold(&mut state, Sample::new(LOW, HIGH, HIGH), 1);
        assert_eq!(
            hold(&mut state, Sample::new(HIGH, HIGH, HIGH), 1),
            Some(Direction::CounterClockwise)
        );
        assert_eq!(state.snapshot().position, u16::MAX - 2);
    }

    #[test]
    fn counts_interrupts_and_busy_time() {
        let mut state = EncoderState::new(EncoderConfig::DEFAULT);
        hold(&mut state, Sample::IDLE, 3);
        state.record_busy(12);
        state.record_busy(30);
        assert_eq!(
            state.telemetry(),
            Telemetry {
                interrupts: 3,
                busy_us: 42
            }
        );
    }

    #[test]
    fn reset_wins_over_an_edge_on_the_same_tick() {
        let mut state = EncoderState::new(EncoderConfig::DEFAULT);
        hold(&mut state, Sample::new(LOW, LOW, HIGH), 4);
        hold(&mut state, Sample::new(HIGH, LOW, HIGH), 3);
        let decoded = state.tick(Sample::new(HIGH, LOW, LOW));
        assert_eq!(decoded, Some(Direction::Clockwise));
        assert_eq!(state.snapshot(), Snapshot::default());
    }
}
