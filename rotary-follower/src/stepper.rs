//! X axis stepper on the Mega's RAMPS driver socket, following the encoder

use arduino_hal::Delay;
use rotary_core::{follower::StepperFollower, SharedEncoder};

use crate::{
    console::trace,
    pins::{stepper, StepperPins},
};

pub struct XAxis {
    follower: StepperFollower<stepper::Step, stepper::Dir, Delay>,
    // Held low for as long as we run; kept so nobody else grabs them
    _enable: stepper::Enable,
    _chip_select: stepper::ChipSelect,
}

impl XAxis {
    pub fn from_pins(pins: StepperPins, edges_per_revolution: u16) -> Self {
        let StepperPins {
            step,
            dir,
            mut enable,
            mut chip_select,
        } = pins;
        // Both active low
        chip_select.set_low();
        enable.set_low();

        Self {
            follower: StepperFollower::new(step, dir, Delay::new(), edges_per_revolution),
            _enable: enable,
            _chip_select: chip_select,
        }
    }

    /// Step until the motor has caught up with the encoder. The position is
    /// re-read after every unit so turning the knob mid-move is picked up.
    pub fn catch_up(&mut self, encoder: &SharedEncoder) {
        while let Some(direction) = self.follower.step_towards(encoder.snapshot().position) {
            trace!(
                "[TRACE] [STEPPER] {:?} to {}",
                direction,
                self.follower.followed()
            );
        }
    }
}
