use arduino_hal::{pac::USART0, Usart};
use rotary_core::{
    board::{self, BoardConfig},
    EncoderConfig,
};

use crate::pins::serial;

#[cfg(all(feature = "board-uno", feature = "board-mega2560"))]
compile_error!("Pick one board: `board-uno` or `board-mega2560`");

pub const BAUD_RATE: u32 = 57_600;
pub type UsbSerial = Usart<USART0, serial::Rx, serial::Tx>;

#[cfg(feature = "board-uno")]
pub const BOARD: BoardConfig = board::ARDUINO_UNO;
#[cfg(feature = "board-mega2560")]
pub const BOARD: BoardConfig = board::ARDUINO_MEGA2560;

pub const ENCODER_CONFIG: EncoderConfig = match EncoderConfig::DEFAULT.validate() {
    Ok(config) => config,
    Err(_) => panic!("invalid encoder configuration"),
};

/// Compare channels running the pipeline. Each one advances by a whole tick,
/// so with `dual-interrupts` the encoder is sampled twice per tick interval
/// and the debounce window halves.
pub const TICK_SOURCES: u8 = if cfg!(feature = "dual-interrupts") {
    2_u8
} else {
    1_u8
};

/// Time between two samples of the encoder
pub const SAMPLING_INTERVAL_US: u16 = ENCODER_CONFIG.sampling_interval_us(TICK_SOURCES);

/// Timer 0 counts between two ticks of one compare channel
pub const TICK_COMPARE_INCREMENT: u8 =
    match BOARD.tick_timer.compare_increment(ENCODER_CONFIG.tick_interval_us) {
        Ok(counts) => counts,
        Err(_) => panic!("tick interval doesn't fit timer 0"),
    };

const _: () = assert!(
    matches!(BOARD.tick_timer.prescaler, 8 | 64 | 256 | 1024),
    "timer 0 can't run at that prescaler"
);
const _: () = assert!(
    matches!(BOARD.timestamp_timer.prescaler, 1 | 8 | 64 | 256 | 1024),
    "timer 1 can't run at that prescaler"
);

/// Main loop period in milliseconds
pub const UPDATE_DELTATIME: u32 = 10_u32;
/// Main loop iterations between telemetry reports
pub const REPORT_INTERVAL: u16 = 100_u16;
