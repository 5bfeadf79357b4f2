//! Interrupts
//!
//! Timer 0 runs free (normal mode) and compare match A fires the encoder tick.
//! Every tick pushes OCR0A forward by one tick interval before doing anything
//! else, so the schedule is relative and never needs the counter cleared.
//! Timer 1 also runs free, only so the tick can time itself.

use arduino_hal::pac::{TC0, TC1};
use avr_device::interrupt::{self, Mutex};
use core::cell::RefCell;
use rotary_core::{SharedEncoder, SignalSampler};

use crate::{
    rotary_encoder::RotaryEncoder,
    shared::{BOARD, ENCODER_CONFIG, TICK_COMPARE_INCREMENT},
};

/// Written only by the tick; the main loop reads it through `snapshot()`
pub static ENCODER: SharedEncoder = SharedEncoder::new(ENCODER_CONFIG);

/// Everything the tick handler owns
struct TickHardware {
    tc0: TC0,
    tc1: TC1,
    rotary_encoder: RotaryEncoder,
}

static TICK_HARDWARE: Mutex<RefCell<Option<TickHardware>>> = Mutex::new(RefCell::new(None));

#[derive(Clone, Copy)]
enum CompareChannel {
    A,
    #[cfg(feature = "dual-interrupts")]
    B,
}

impl TickHardware {
    fn tick(&mut self, channel: CompareChannel) {
        match channel {
            CompareChannel::A => {
                let next = self.tc0.ocr0a.read().bits().wrapping_add(TICK_COMPARE_INCREMENT);
                self.tc0.ocr0a.write(|w| w.bits(next));
            }
            #[cfg(feature = "dual-interrupts")]
            CompareChannel::B => {
                let next = self.tc0.ocr0b.read().bits().wrapping_add(TICK_COMPARE_INCREMENT);
                self.tc0.ocr0b.write(|w| w.bits(next));
            }
        }

        let started = self.tc1.tcnt1.read().bits();
        ENCODER.tick(self.rotary_encoder.sample());
        let elapsed = self.tc1.tcnt1.read().bits().wrapping_sub(started);
        ENCODER.record_busy(BOARD.timestamp_timer.counts_to_micros(elapsed as u32));
    }
}

pub fn tick_init(tc0: TC0, tc1: TC1, rotary_encoder: RotaryEncoder) {
    // Normal mode: count 0 -> FF and wrap, compare matches just fire on the way
    tc0.tccr0a.reset();
    tc0.ocr0a.write(|w| w.bits(TICK_COMPARE_INCREMENT));
    #[cfg(feature = "dual-interrupts")]
    tc0.ocr0b
        .write(|w| w.bits(TICK_COMPARE_INCREMENT.wrapping_add(TICK_COMPARE_INCREMENT / 2)));
    tc0.tccr0b.write(|w| match BOARD.tick_timer.prescaler {
        8_u16 => w.cs0().prescale_8(),
        64_u16 => w.cs0().prescale_64(),
        256_u16 => w.cs0().prescale_256(),
        1024_u16 => w.cs0().prescale_1024(),
        _ => w.cs0().no_clock(),
    });

    tc1.tccr1a.reset();
    tc1.tccr1b.write(|w| match BOARD.timestamp_timer.prescaler {
        1_u16 => w.cs1().direct(),
        8_u16 => w.cs1().prescale_8(),
        64_u16 => w.cs1().prescale_64(),
        256_u16 => w.cs1().prescale_256(),
        1024_u16 => w.cs1().prescale_1024(),
        _ => w.cs1().no_clock(),
    });

    // Interrupts are still globally off here, so this only takes effect once
    // main enables them
    tc0.timsk0.write(|w| {
        let w = w.ocie0a().set_bit();
        #[cfg(feature = "dual-interrupts")]
        let w = w.ocie0b().set_bit();
        w
    });

    interrupt::free(|critical_section| {
        TICK_HARDWARE.borrow(critical_section).replace(Some(TickHardware {
            tc0,
            tc1,
            rotary_encoder,
        }));
    });
}

fn on_compare(channel: CompareChannel) {
    interrupt::free(|critical_section| {
        if let Some(hardware) = TICK_HARDWARE.borrow(critical_section).borrow_mut().as_mut() {
            hardware.tick(channel);
        }
    })
}

#[cfg_attr(feature = "board-uno", avr_device::interrupt(atmega328p))]
#[cfg_attr(feature = "board-mega2560", avr_device::interrupt(atmega2560))]
#[allow(non_snake_case)]
fn TIMER0_COMPA() {
    on_compare(CompareChannel::A);
}

#[cfg(feature = "dual-interrupts")]
#[cfg_attr(feature = "board-uno", avr_device::interrupt(atmega328p))]
#[cfg_attr(feature = "board-mega2560", avr_device::interrupt(atmega2560))]
#[allow(non_snake_case)]
fn TIMER0_COMPB() {
    on_compare(CompareChannel::B);
}
