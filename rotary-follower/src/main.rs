#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use arduino_hal::delay_ms;
use console::{println, set_console};
use display::{Display, StatusDisplay};
use pins::BoardPins;
use shared::{UsbSerial, BAUD_RATE, BOARD, REPORT_INTERVAL, UPDATE_DELTATIME};

use crate::{
    console::{debug, print},
    interrupts::ENCODER,
};

pub mod console;
mod display;
pub mod interrupts;
pub mod panic;
pub mod pins;
mod rotary_encoder;
pub mod shared;
#[cfg(feature = "board-mega2560")]
mod stepper;

#[arduino_hal::entry]
fn main() -> ! {
    let peripherals = arduino_hal::Peripherals::take().unwrap();
    let pins = BoardPins::split(arduino_hal::pins!(peripherals));
    let serial: UsbSerial = arduino_hal::Usart::new(
        peripherals.USART0,
        pins.serial.rx,
        pins.serial.tx,
        arduino_hal::hal::usart::BaudrateArduinoExt::into_baudrate(BAUD_RATE),
    );
    set_console(serial);

    println!("Hello from the rotary follower on the {}!", BOARD.name);
    println!(
        "Encoder A: D{} B: D{} button: D{}",
        BOARD.encoder.a,
        BOARD.encoder.b,
        BOARD.encoder.button
    );
    if let Some(reset_switch) = BOARD.encoder.reset_switch {
        println!("Reset switch: D{}", reset_switch);
    }
    println!(
        "LCD rs: D{} en: D{} d4-d7: D{} D{} D{} D{}",
        BOARD.lcd.rs,
        BOARD.lcd.enable,
        BOARD.lcd.d4,
        BOARD.lcd.d5,
        BOARD.lcd.d6,
        BOARD.lcd.d7
    );
    println!("Buzzer: D{}", BOARD.buzzer);
    if let Some(stepper) = BOARD.stepper {
        println!(
            "Stepper step: D{} dir: D{} enable: D{} cs: D{}",
            stepper.step,
            stepper.dir,
            stepper.enable,
            stepper.chip_select
        );
    }
    debug!(
        "[DEBUG] {} positions per revolution, sampling every {}us, debounce {}us",
        ENCODER.edges_per_revolution(),
        shared::SAMPLING_INTERVAL_US,
        shared::ENCODER_CONFIG.debounce_window_us(shared::TICK_SOURCES)
    );

    let mut buzzer_pin = pins.buzzer;
    buzzer_pin.set_low();

    #[cfg(feature = "board-mega2560")]
    let mut x_axis = {
        debug!("[DEBUG] Stepper initialization");
        stepper::XAxis::from_pins(pins.stepper, ENCODER.edges_per_revolution())
    };

    debug!("[DEBUG] Character LCD initialization");
    let mut status_display = StatusDisplay::from_pins(pins.character_lcd);

    // Intialize interrupts
    debug!("[DEBUG] Rotary encoder initialization");
    interrupts::tick_init(
        peripherals.TC0,
        peripherals.TC1,
        rotary_encoder::from_pins(pins.rotary_encoder),
    );
    unsafe { avr_device::interrupt::enable() };

    // Main loop
    let mut iterations = 0_u16;
    loop {
        #[cfg(feature = "board-mega2560")]
        x_axis.catch_up(&ENCODER);

        let snapshot = ENCODER.snapshot();
        status_display.display(&snapshot);

        iterations += 1;
        if iterations == REPORT_INTERVAL {
            iterations = 0;
            let telemetry = ENCODER.telemetry();
            print!("{:?} ", snapshot);
            println!(
                "interrupts: {} busy: {}us",
                telemetry.interrupts,
                telemetry.busy_us
            );
        }

        delay_ms(UPDATE_DELTATIME);
    }
}
