//! Main board, refactored Firebase build (ESP32 DevKit v1).
//!
//! Moves the head stepper to 13/15/14, drops the PIR and adds a DHT22 backup
//! sensor and a horn relay. Timing is driven by cloud sync instead of motion.

use super::BoardProfile;
use crate::device::MAIN_DEVICE_ID;
use crate::pins::{Gpio, PinAssignment, PinRole};

pub const DFPLAYER_RX: Gpio = Gpio::pin(27);
pub const DFPLAYER_TX: Gpio = Gpio::pin(26);

pub const RS485_RE: Gpio = Gpio::pin(4);
pub const RS485_RX: Gpio = Gpio::pin(17); // Serial2 RX
pub const RS485_TX: Gpio = Gpio::pin(16); // Serial2 TX

// Head rotation
pub const STEPPER_STEP_PIN: Gpio = Gpio::pin(13);
pub const STEPPER_DIR_PIN: Gpio = Gpio::pin(15);
pub const STEPPER_ENABLE_PIN: Gpio = Gpio::pin(14);

pub const SERVO_SDA: Gpio = Gpio::pin(21);
pub const SERVO_SCL: Gpio = Gpio::pin(22);
pub const SERVO_ARM1: u8 = 0;
pub const SERVO_ARM2: u8 = 1;

pub const DHT_PIN: Gpio = Gpio::pin(2); // DHT22, backup sensor
pub const SPEAKER_PIN: Gpio = Gpio::pin(12); // horn relay

pub const STEPS_PER_REVOLUTION: u32 = 200 * 16; // 1/16 microstepping

pub const SERVO_MIN: u16 = 120;
pub const SERVO_MAX: u16 = 600;
pub const SERVO_FREQ: u32 = 50;

pub const TOTAL_TRACKS: u8 = 7;
pub const DEFAULT_VOLUME: u8 = 20;

pub const FIREBASE_UPDATE_INTERVAL_MS: u64 = 2_000;
pub const COMMAND_CHECK_INTERVAL_MS: u64 = 500;
pub const SENSOR_READ_INTERVAL_MS: u64 = 2_000;

pub const AVAILABLE_PINS: &[Gpio] = &[
    Gpio::pin(0),
    Gpio::pin(5),
    Gpio::pin(18),
    Gpio::pin(19),
    Gpio::pin(23),
    Gpio::pin(25),
    Gpio::pin(32),
    Gpio::pin(33),
    Gpio::pin(34),
    Gpio::pin(35),
    Gpio::pin(36),
    Gpio::pin(39),
];

pub const PIN_MAP: &[PinAssignment] = &[
    PinAssignment::new("DFPLAYER_RX", PinRole::DfPlayerRx, DFPLAYER_RX),
    PinAssignment::new("DFPLAYER_TX", PinRole::DfPlayerTx, DFPLAYER_TX),
    PinAssignment::new("RS485_RE", PinRole::Rs485DirectionControl, RS485_RE),
    PinAssignment::new("RS485_RX", PinRole::Rs485Rx, RS485_RX),
    PinAssignment::new("RS485_TX", PinRole::Rs485Tx, RS485_TX),
    PinAssignment::new("STEPPER_STEP_PIN", PinRole::StepperStep, STEPPER_STEP_PIN),
    PinAssignment::new("STEPPER_DIR_PIN", PinRole::StepperDir, STEPPER_DIR_PIN),
    PinAssignment::new("STEPPER_ENABLE_PIN", PinRole::StepperEnable, STEPPER_ENABLE_PIN),
    PinAssignment::new("SERVO_SDA", PinRole::ServoSda, SERVO_SDA),
    PinAssignment::new("SERVO_SCL", PinRole::ServoScl, SERVO_SCL),
    PinAssignment::new("DHT_PIN", PinRole::Dht, DHT_PIN),
    PinAssignment::new("SPEAKER_PIN", PinRole::SpeakerRelay, SPEAKER_PIN),
];

pub const PROFILE: BoardProfile = BoardProfile {
    name: "main-refactor",
    device_id: MAIN_DEVICE_ID,
    pins: PIN_MAP,
    free_pins: AVAILABLE_PINS,
};
