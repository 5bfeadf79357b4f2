//! Rotary encoder pins as seen by the tick. Only the sampling lives here; the
//! debouncing and decoding are in `rotary_core`, driven from the timer 0
//! interrupt in `interrupts.rs`.

use rotary_core::signal::PinSampler;
#[cfg(feature = "board-mega2560")]
use rotary_core::signal::WithResetSwitch;

use crate::pins::{self, RotaryEncoderPins};

type EncoderSampler =
    PinSampler<pins::rotary_encoder::A, pins::rotary_encoder::B, pins::rotary_encoder::Button>;

#[cfg(feature = "board-uno")]
pub type RotaryEncoder = EncoderSampler;
/// The Mega also resets from the E2_8 switch
#[cfg(feature = "board-mega2560")]
pub type RotaryEncoder = WithResetSwitch<EncoderSampler, pins::rotary_encoder::ResetSwitch>;

pub fn from_pins(rotary_encoder_pins: RotaryEncoderPins) -> RotaryEncoder {
    let sampler = PinSampler::new(
        rotary_encoder_pins.a,
        rotary_encoder_pins.b,
        rotary_encoder_pins.button,
    );
    #[cfg(feature = "board-mega2560")]
    let sampler = sampler.with_reset_switch(rotary_encoder_pins.reset_switch);
    sampler
}
