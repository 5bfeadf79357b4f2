//! Print where we died over serial and blink the on-board LED forever

use core::panic::PanicInfo;

use crate::{pins::BoardPins, shared::BAUD_RATE};

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    avr_device::interrupt::disable();

    // The console may have been borrowed when we panicked, so take the
    // hardware back directly. Nothing else runs from here on.
    // Safety: interrupts are off and main never gets control back
    let peripherals = unsafe { arduino_hal::Peripherals::steal() };
    let pins = BoardPins::split(arduino_hal::pins!(peripherals));
    let mut serial = arduino_hal::Usart::new(
        peripherals.USART0,
        pins.serial.rx,
        pins.serial.tx,
        arduino_hal::hal::usart::BaudrateArduinoExt::into_baudrate(BAUD_RATE),
    );

    let _ = ufmt::uwriteln!(&mut serial, "Firmware panic!\r");
    if let Some(location) = info.location() {
        let _ = ufmt::uwriteln!(
            &mut serial,
            "  At {}:{}:{}\r",
            location.file(),
            location.line(),
            location.column()
        );
    }

    let mut led = pins.led;
    loop {
        led.toggle();
        arduino_hal::delay_ms(100);
    }
}
