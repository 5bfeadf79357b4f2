//! Stepper that follows the encoder position, one unit at a time.
//!
//! Runs from the main loop, never from the tick. Each position unit is
//! `PULSES_PER_UNIT` step pulses; the direction pin is low going forward.

use embedded_hal::{blocking::delay::DelayUs, digital::v2::OutputPin};

use crate::decoder::Direction;

pub const PULSES_PER_UNIT: u16 = 100_u16;
pub const STEP_HIGH_US: u16 = 100_u16;
pub const STEP_LOW_US: u16 = 10_u16;

/// Signed shortest way around the ring from `from` to `to`. Exactly half a
/// revolution away goes forward.
pub fn ring_delta(from: u16, to: u16, edges_per_revolution: u16) -> i32 {
    let edges = edges_per_revolution.max(1) as i32;
    let forward = (to as i32 - from as i32).rem_euclid(edges);
    if forward * 2 <= edges {
        forward
    } else {
        forward - edges
    }
}

pub struct StepperFollower<Step, Dir, Delay> {
    step: Step,
    dir: Dir,
    delay: Delay,
    followed: u16,
    edges_per_revolution: u16,
}

impl<Step, Dir, Delay> StepperFollower<Step, Dir, Delay>
where
    Step: OutputPin,
    Dir: OutputPin,
    Delay: DelayUs<u16>,
{
    pub fn new(mut step: Step, mut dir: Dir, delay: Delay, edges_per_revolution: u16) -> Self {
        let _ = step.set_low();
        let _ = dir.set_low();
        Self {
            step,
            dir,
            delay,
            followed: 0_u16,
            edges_per_revolution: edges_per_revolution.max(1),
        }
    }

    /// The position the motor is currently at
    pub fn followed(&self) -> u16 {
        self.followed
    }

    /// Move one unit towards `target`. `None` once there.
    pub fn step_towards(&mut self, target: u16) -> Option<Direction> {
        let delta = ring_delta(self.followed, target, self.edges_per_revolution);
        let direction = match delta {
            0 => return None,
            d if d > 0 => Direction::Clockwise,
            _ => Direction::CounterClockwise,
        };

        let _ = match direction {
            Direction::Clockwise => self.dir.set_low(),
            Direction::CounterClockwise => self.dir.set_high(),
        };

        for _ in 0..PULSES_PER_UNIT {
            let _ = self.step.set_high();
            self.delay.delay_us(STEP_HIGH_US);
            let _ = self.step.set_low();
            self.delay.delay_us(STEP_LOW_US);
        }

        self.followed = match direction {
            Direction::Clockwise => (self.followed + 1) % self.edges_per_revolution,
            Direction::CounterClockwise => self
                .followed
                .checked_sub(1)
                .unwrap_or(self.edges_per_revolution - 1),
        };
        Some(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::{cell::Cell, convert::Infallible};

    #[derive(Default)]
    struct Recorder {
        rising_steps: Cell<u32>,
        dir_high: Cell<bool>,
        waited_us: Cell<u32>,
    }

    struct StepPin<'a>(&'a Recorder, bool);
    struct DirPin<'a>(&'a Recorder);
    struct FakeDelay<'a>(&'a Recorder);

    impl OutputPin for StepPin<'_> {
        type Error = Infallible;
        fn set_high(&mut self) -> Result<(), Self::Error> {
            if !self.1 {
                self.0.rising_steps.set(self.0.rising_steps.get() + 1);
            }
            self.1 = true;
            Ok(())
        }
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.1 = false;
            Ok(())
        }
    }

    impl OutputPin for DirPin<'_> {
        type Error = Infallible;
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.dir_high.set(true);
            Ok(())
        }
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.dir_high.set(false);
            Ok(())
        }
    }

    impl DelayUs<u16> for FakeDelay<'_> {
        fn delay_us(&mut self, us: u16) {
            self.0.waited_us.set(self.0.waited_us.get() + us as u32);
        }
    }

    fn follower(recorder: &Recorder) -> StepperFollower<StepPin<'_>, DirPin<'_>, FakeDelay<'_>> {
        StepperFollower::new(
            StepPin(recorder, false),
            DirPin(recorder),
            FakeDelay(recorder),
            40,
        )
    }

    #[test]
    fn shortest_way_round() {
        assert_eq!(ring_delta(0, 3, 40), 3);
        assert_eq!(ring_delta(3, 0, 40), -3);
        assert_eq!(ring_delta(39, 0, 40), 1);
        assert_eq!(ring_delta(0, 39, 40), -1);
        assert_eq!(ring_delta(0, 20, 40), 20);
        assert_eq!(ring_delta(5, 5, 40), 0);
    }

    #[test]
    fn one_unit_is_a_hundred_pulses() {
        let recorder = Recorder::default();
        let mut follower = follower(&recorder);

        assert_eq!(follower.step_towards(2), Some(Direction::Clockwise));
        assert_eq!(recorder.rising_steps.get(), 100);
        assert_eq!(recorder.waited_us.get(), 100 * 110);
        assert!(!recorder.dir_high.get());
        assert_eq!(follower.followed(), 1);

        assert_eq!(follower.step_towards(2), Some(Direction::Clockwise));
        assert_eq!(follower.step_towards(2), None);
        assert_eq!(recorder.rising_steps.get(), 200);
    }

    #[test]
    fn goes_backwards_across_zero() {
        let recorder = Recorder::default();
        let mut follower = follower(&recorder);

        assert_eq!(follower.step_towards(38), Some(Direction::CounterClockwise));
        assert!(recorder.dir_high.get());
        assert_eq!(follower.followed(), 39);
        assert_eq!(follower.step_towards(38), Some(Direction::CounterClockwise));
        assert_eq!(follower.step_towards(38), None);
        assert_eq!(follower.followed(), 38);
    }
}
