//! Pin types to improve type safety, one set per board. These mirror the
//! tables in `rotary_core::board`.

use arduino_hal::{
    hal::port::{self, Dynamic},
    port::{
        mode::{Input, Output, PullUp},
        Pin,
    },
    Pins,
};

#[cfg(feature = "board-uno")]
pub mod rotary_encoder {
    use super::*;
    pub type A = Pin<Input<PullUp>, port::PB0>;
    pub type B = Pin<Input<PullUp>, port::PB1>;
    pub type Button = Pin<Input<PullUp>, port::PB2>;
}

#[cfg(feature = "board-mega2560")]
pub mod rotary_encoder {
    use super::*;
    pub type A = Pin<Input<PullUp>, port::PC6>;
    pub type B = Pin<Input<PullUp>, port::PC4>;
    pub type Button = Pin<Input<PullUp>, port::PC2>;
    /// E2_8 on the RAMPS display header
    pub type ResetSwitch = Pin<Input<PullUp>, port::PG0>;
}

#[cfg(feature = "board-mega2560")]
pub mod stepper {
    use super::*;
    pub type Step = Pin<Output, port::PF0>;
    pub type Dir = Pin<Output, port::PF1>;
    pub type Enable = Pin<Output, port::PD7>;
    pub type ChipSelect = Pin<Output, port::PB0>;
}

pub mod serial {
    use super::*;
    #[cfg(feature = "board-uno")]
    pub type Rx = Pin<Input, port::PD0>;
    #[cfg(feature = "board-uno")]
    pub type Tx = Pin<Output, port::PD1>;
    #[cfg(feature = "board-mega2560")]
    pub type Rx = Pin<Input, port::PE0>;
    #[cfg(feature = "board-mega2560")]
    pub type Tx = Pin<Output, port::PE1>;
}

pub mod character_lcd {
    use super::*;
    /// ag-lcd wants every bus pin to be the same type
    pub type LcdPin = Pin<Output, Dynamic>;
}

pub mod buzzer {
    use super::*;
    #[cfg(feature = "board-uno")]
    pub type Buzzer = Pin<Output, port::PB3>;
    #[cfg(feature = "board-mega2560")]
    pub type Buzzer = Pin<Output, port::PC0>;
}

pub mod leds {
    use super::*;
    /// The on-board "L" LED
    #[cfg(feature = "board-uno")]
    pub type Builtin = Pin<Output, port::PB5>;
    #[cfg(feature = "board-mega2560")]
    pub type Builtin = Pin<Output, port::PB7>;
}

pub struct RotaryEncoderPins {
    pub a: rotary_encoder::A,
    pub b: rotary_encoder::B,
    pub button: rotary_encoder::Button,
    #[cfg(feature = "board-mega2560")]
    pub reset_switch: rotary_encoder::ResetSwitch,
}

pub struct CharacterLcdPins {
    pub rs: character_lcd::LcdPin,
    pub enable: character_lcd::LcdPin,
    pub d4: character_lcd::LcdPin,
    pub d5: character_lcd::LcdPin,
    pub d6: character_lcd::LcdPin,
    pub d7: character_lcd::LcdPin,
}

#[cfg(feature = "board-mega2560")]
pub struct StepperPins {
    pub step: stepper::Step,
    pub dir: stepper::Dir,
    pub enable: stepper::Enable,
    pub chip_select: stepper::ChipSelect,
}

pub struct SerialPins {
    pub rx: serial::Rx,
    pub tx: serial::Tx,
}

/// Every pin the firmware uses, already in the mode it's used in
pub struct BoardPins {
    pub serial: SerialPins,
    pub rotary_encoder: RotaryEncoderPins,
    pub character_lcd: CharacterLcdPins,
    pub buzzer: buzzer::Buzzer,
    pub led: leds::Builtin,
    #[cfg(feature = "board-mega2560")]
    pub stepper: StepperPins,
}

impl BoardPins {
    #[cfg(feature = "board-uno")]
    pub fn split(pins: Pins) -> Self {
        Self {
            serial: SerialPins {
                rx: pins.d0,
                tx: pins.d1.into_output(),
            },
            rotary_encoder: RotaryEncoderPins {
                a: pins.d8.into_pull_up_input(),
                b: pins.d9.into_pull_up_input(),
                button: pins.d10.into_pull_up_input(),
            },
            character_lcd: CharacterLcdPins {
                rs: pins.d2.into_output().downgrade(),
                enable: pins.d3.into_output().downgrade(),
                d4: pins.d4.into_output().downgrade(),
                d5: pins.d5.into_output().downgrade(),
                d6: pins.d6.into_output().downgrade(),
                d7: pins.d7.into_output().downgrade(),
            },
            buzzer: pins.d11.into_output(),
            led: pins.d13.into_output(),
        }
    }

    #[cfg(feature = "board-mega2560")]
    pub fn split(pins: Pins) -> Self {
        Self {
            serial: SerialPins {
                rx: pins.d0,
                tx: pins.d1.into_output(),
            },
            rotary_encoder: RotaryEncoderPins {
                a: pins.d31.into_pull_up_input(),
                b: pins.d33.into_pull_up_input(),
                button: pins.d35.into_pull_up_input(),
                reset_switch: pins.d41.into_pull_up_input(),
            },
            character_lcd: CharacterLcdPins {
                rs: pins.d16.into_output().downgrade(),
                enable: pins.d17.into_output().downgrade(),
                d4: pins.d23.into_output().downgrade(),
                d5: pins.d25.into_output().downgrade(),
                d6: pins.d27.into_output().downgrade(),
                d7: pins.d29.into_output().downgrade(),
            },
            buzzer: pins.d37.into_output(),
            led: pins.d13.into_output(),
            stepper: StepperPins {
                step: pins.a0.into_output(),
                dir: pins.a1.into_output(),
                enable: pins.d38.into_output(),
                chip_select: pins.d53.into_output(),
            },
        }
    }
}
