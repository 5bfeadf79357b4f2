//! Global serial console so anything can print without passing the USART around.
//! `debug!` and `trace!` cost nothing unless their cargo feature is on.
//! Never print from the tick interrupt!

use avr_device::interrupt::{self, Mutex};
use core::cell::RefCell;

use crate::shared::UsbSerial;

pub static CONSOLE: Mutex<RefCell<Option<UsbSerial>>> = Mutex::new(RefCell::new(None));

pub fn set_console(console: UsbSerial) {
    interrupt::free(|critical_section| {
        CONSOLE.borrow(critical_section).replace(Some(console));
    });
}

macro_rules! print {
    ($($t:tt)*) => {
        avr_device::interrupt::free(|critical_section| {
            if let Some(console) = $crate::console::CONSOLE
                .borrow(critical_section)
                .borrow_mut()
                .as_mut()
            {
                let _ = ufmt::uwrite!(console, $($t)*);
            }
        })
    };
}

macro_rules! println {
    ($($t:tt)*) => {
        avr_device::interrupt::free(|critical_section| {
            if let Some(console) = $crate::console::CONSOLE
                .borrow(critical_section)
                .borrow_mut()
                .as_mut()
            {
                let _ = ufmt::uwriteln!(console, $($t)*);
            }
        })
    };
}

macro_rules! debug {
    ($($t:tt)*) => {
        if cfg!(feature = "log-debug") {
            $crate::console::println!($($t)*);
        }
    };
}

macro_rules! trace {
    ($($t:tt)*) => {
        if cfg!(feature = "log-trace") {
            $crate::console::println!($($t)*);
        }
    };
}

pub(crate) use {debug, print, println, trace};
