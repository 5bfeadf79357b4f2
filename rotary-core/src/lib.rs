//! Board-agnostic core of the rotary follower firmware
//!
//! Everything in here runs on the host as well as on the AVR:
//!
//! - Sampling the raw encoder and button levels (`signal`)
//! - Debouncing a channel into confirmed edges (`debounce`)
//! - Decoding direction into a bounded position (`decoder`)
//! - The per-tick pipeline and its reset handling (`encoder`)
//! - Sharing that state between the tick interrupt and the main loop (`shared`)
//! - Board pin/timer tables and encoder tuning (`board`, `config`)
//! - The position consumers: stepper follower and status lines (`follower`, `status`)

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod config;
pub mod debounce;
pub mod decoder;
pub mod encoder;
pub mod follower;
pub mod shared;
pub mod signal;
pub mod status;

pub use config::{ConfigError, CountedEdges, EncoderConfig};
pub use decoder::Direction;
pub use encoder::{EncoderState, Snapshot, Telemetry};
pub use shared::SharedEncoder;
pub use signal::{PinState, Sample, SignalSampler};
