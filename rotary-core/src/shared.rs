//! Encoder state shared between the tick interrupt and the main loop.
//!
//! The interrupt is the only writer. The main loop never sees a field, only
//! copies taken inside a critical section, so a snapshot can't be torn by a
//! tick landing halfway through a multi-byte read. `critical_section::with`
//! puts the previous interrupt-enable state back on every way out.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::{
    config::EncoderConfig,
    decoder::Direction,
    encoder::{EncoderState, Snapshot, Telemetry},
    signal::Sample,
};

pub struct SharedEncoder {
    state: Mutex<RefCell<EncoderState>>,
}

impl SharedEncoder {
    /// Const so it can live in a `static`
    pub const fn new(config: EncoderConfig) -> Self {
        Self {
            state: Mutex::new(RefCell::new(EncoderState::new(config))),
        }
    }

    /// Interrupt side: run one tick of the pipeline
    pub fn tick(&self, sample: Sample) -> Option<Direction> {
        critical_section::with(|critical_section| {
            self.state.borrow_ref_mut(critical_section).tick(sample)
        })
    }

    /// Interrupt side: account for time spent in the handler
    pub fn record_busy(&self, micros: u32) {
        critical_section::with(|critical_section| {
            self.state
                .borrow_ref_mut(critical_section)
                .record_busy(micros)
        })
    }

    /// Main loop side: position and both counters, consistent with each other
    pub fn snapshot(&self) -> Snapshot {
        critical_section::with(|critical_section| {
            self.state.borrow_ref(critical_section).snapshot()
        })
    }

    pub fn telemetry(&self) -> Telemetry {
        critical_section::with(|critical_section| {
            self.state.borrow_ref(critical_section).telemetry()
        })
    }

    pub fn edges_per_revolution(&self) -> u16 {
        critical_section::with(|critical_section| {
            self.state.borrow_ref(critical_section).edges_per_revolution()
        })
    }
}
