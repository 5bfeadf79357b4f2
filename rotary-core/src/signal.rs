//! Raw signal sampling. No filtering happens here: one read per input, every tick.

use core::convert::Infallible;

use embedded_hal::digital::v2::InputPin;
use ufmt::derive::uDebug;

pub type PinState = bool;
pub const LOW: PinState = false;
pub const HIGH: PinState = true;

/// Instantaneous levels of every input the tick looks at. All inputs are
/// pulled up, so idle is `HIGH` and pressed/active is `LOW`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
pub struct Sample {
    pub a: PinState,
    pub b: PinState,
    pub button: PinState,
    /// Boards without an auxiliary reset switch always report `HIGH`
    pub reset_switch: PinState,
}

impl Sample {
    /// Nothing pressed, both channels resting high
    pub const IDLE: Self = Self::new(HIGH, HIGH, HIGH);

    pub const fn new(a: PinState, b: PinState, button: PinState) -> Self {
        Self {
            a,
            b,
            button,
            reset_switch: HIGH,
        }
    }

    pub const fn with_reset_switch(self, reset_switch: PinState) -> Self {
        Self {
            reset_switch,
            ..self
        }
    }

    /// Either reset input is held down (tied to GND)
    pub const fn reset_requested(&self) -> bool {
        self.button == LOW || self.reset_switch == LOW
    }
}

/// Something that can be read once per tick
pub trait SignalSampler {
    fn sample(&mut self) -> Sample;
}

/// Pins on AVR can't fail to read, so `Infallible` is the only error we accept
fn level<P: InputPin<Error = Infallible>>(pin: &P) -> PinState {
    match pin.is_high() {
        Ok(level) => level,
        Err(never) => match never {},
    }
}

/// Encoder A, B and the encoder's push button
pub struct PinSampler<A, B, Button> {
    a: A,
    b: B,
    button: Button,
}

impl<A, B, Button> PinSampler<A, B, Button>
where
    A: InputPin<Error = Infallible>,
    B: InputPin<Error = Infallible>,
    Button: InputPin<Error = Infallible>,
{
    pub fn new(a: A, b: B, button: Button) -> Self {
        Self { a, b, button }
    }

    /// Attach an auxiliary reset switch (the Mega's E2_8 header)
    pub fn with_reset_switch<R>(self, reset_switch: R) -> WithResetSwitch<Self, R>
    where
        R: InputPin<Error = Infallible>,
    {
        WithResetSwitch {
            inner: self,
            reset_switch,
        }
    }
}

impl<A, B, Button> SignalSampler for PinSampler<A, B, Button>
where
    A: InputPin<Error = Infallible>,
    B: InputPin<Error = Infallible>,
    Button: InputPin<Error = Infallible>,
{
    fn sample(&mut self) -> Sample {
        Sample::new(level(&self.a), level(&self.b), level(&self.button))
    }
}

pub struct WithResetSwitch<S, R> {
    inner: S,
    reset_switch: R,
}

impl<S, R> SignalSampler for WithResetSwitch<S, R>
where
    S: SignalSampler,
    R: InputPin<Error = Infallible>,
{
    fn sample(&mut self) -> Sample {
        self.inner
            .sample()
            .with_reset_switch(level(&self.reset_switch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakeInput<'a>(&'a Cell<PinState>);

    impl InputPin for FakeInput<'_> {
        type Error = Infallible;
        fn is_high(&self) -> Result<bool, Self::Error> {
            Ok(self.0.get())
        }
        fn is_low(&self) -> Result<bool, Self::Error> {
            Ok(!self.0.get())
        }
    }

    #[test]
    fn samples_every_pin_as_is() {
        let (a, b, button) = (Cell::new(LOW), Cell::new(HIGH), Cell::new(HIGH));
        let mut sampler = PinSampler::new(FakeInput(&a), FakeInput(&b), FakeInput(&button));
        assert_eq!(sampler.sample(), Sample::new(LOW, HIGH, HIGH));

        a.set(HIGH);
        b.set(LOW);
        button.set(LOW);
        let sample = sampler.sample();
        assert_eq!(sample, Sample::new(HIGH, LOW, LOW));
        assert_eq!(sample.reset_switch, HIGH);
        assert!(sample.reset_requested());
    }

    #[test]
    fn reset_switch_is_folded_into_sample() {
        let (a, b, button, reset) = (
            Cell::new(HIGH),
            Cell::new(HIGH),
            Cell::new(HIGH),
            Cell::new(HIGH),
        );
        let mut sampler = PinSampler::new(FakeInput(&a), FakeInput(&b), FakeInput(&button))
            .with_reset_switch(FakeInput(&reset));
        assert!(!sampler.sample().reset_requested());

        reset.set(LOW);
        let sample = sampler.sample();
        assert_eq!(sample.button, HIGH);
        assert!(sample.reset_requested());
    }
}
