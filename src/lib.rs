//! BantayBot board configuration
//!
//! Typed pin maps, timing constants and soil-sensor Modbus frames for the
//! BantayBot scarecrow boards (ESP32 DevKit main board, AI-Thinker ESP32-CAM),
//! plus the checks that keep those tables honest.
//!
//! The library is hardware-independent and builds on the host; the ESP32
//! images live in `src/bin` behind the `firmware` feature.

#![cfg_attr(not(test), no_std)]

pub mod actuators;
pub mod boards;
pub mod device;
pub mod modbus;
pub mod pins;
pub mod soil;
pub mod validate;

pub use boards::{ALL_BOARDS, BoardProfile};
pub use pins::{Gpio, PinAssignment, PinRole};
pub use validate::{BoardReport, validate_board};
