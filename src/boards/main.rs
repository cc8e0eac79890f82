//! Main board, original Arduino build (ESP32 DevKit v1).
//!
//! PIR-triggered head stepper on 25/33/32, WebSocket control on port 81.

use super::BoardProfile;
use crate::device::MAIN_DEVICE_ID;
use crate::pins::{Gpio, PinAssignment, PinRole};

// DFPlayer Mini (MP3 audio)
pub const DFPLAYER_RX: Gpio = Gpio::pin(27); // to TX of DFPlayer
pub const DFPLAYER_TX: Gpio = Gpio::pin(26); // to RX of DFPlayer
pub const TOTAL_TRACKS: u8 = 7;
pub const SKIP_TRACK: u8 = 3;
pub const DEFAULT_VOLUME: u8 = 20; // 0-30

// RS485 soil sensor (4-in-1) through a MAX485
pub const RS485_RE: Gpio = Gpio::pin(4); // DE/RE direction control
pub const RS485_RX: Gpio = Gpio::pin(17); // MAX485 RO
pub const RS485_TX: Gpio = Gpio::pin(16); // MAX485 DI
pub const RS485_BAUD: u32 = 4800;

// Stepper motor (TMC2225)
pub const STEPPER_STEP_PIN: Gpio = Gpio::pin(25);
pub const STEPPER_DIR_PIN: Gpio = Gpio::pin(33);
pub const STEPPER_EN_PIN: Gpio = Gpio::pin(32);
pub const STEPS_PER_REVOLUTION: u32 = 200; // NEMA 17, full step
pub const STEPPER_SPEED: u32 = 1000; // steps/s
pub const STEPPER_ACCEL: u32 = 500; // steps/s²

// PCA9685 servos (I2C)
pub const SERVO_SDA: Gpio = Gpio::pin(21);
pub const SERVO_SCL: Gpio = Gpio::pin(22);
pub const SERVO_FREQ: u32 = 50;
pub const SERVO_MIN: u16 = 120; // pulse length count
pub const SERVO_MAX: u16 = 600;
pub const SERVO_ARM1: u8 = 0; // left arm channel
pub const SERVO_ARM2: u8 = 1; // right arm channel

// PIR motion sensor
pub const PIR_PIN: Gpio = Gpio::pin(14);
pub const MOTION_TIMEOUT_MS: u64 = 120_000;
pub const MOTION_COOLDOWN_MS: u64 = 30_000;
pub const SERVO_OSCILLATION_CYCLES: u8 = 6;

pub const SENSOR_UPDATE_INTERVAL_MS: u64 = 2_000;
pub const SERVO_UPDATE_INTERVAL_MS: u64 = 30;

// The camera board serves on 80.
pub const WEBSOCKET_PORT: u16 = 81;

pub const PIN_MAP: &[PinAssignment] = &[
    PinAssignment::new("DFPLAYER_RX", PinRole::DfPlayerRx, DFPLAYER_RX),
    PinAssignment::new("DFPLAYER_TX", PinRole::DfPlayerTx, DFPLAYER_TX),
    PinAssignment::new("RS485_RE", PinRole::Rs485DirectionControl, RS485_RE),
    PinAssignment::new("RS485_RX", PinRole::Rs485Rx, RS485_RX),
    PinAssignment::new("RS485_TX", PinRole::Rs485Tx, RS485_TX),
    PinAssignment::new("STEPPER_STEP_PIN", PinRole::StepperStep, STEPPER_STEP_PIN),
    PinAssignment::new("STEPPER_DIR_PIN", PinRole::StepperDir, STEPPER_DIR_PIN),
    PinAssignment::new("STEPPER_EN_PIN", PinRole::StepperEnable, STEPPER_EN_PIN),
    PinAssignment::new("SERVO_SDA", PinRole::ServoSda, SERVO_SDA),
    PinAssignment::new("SERVO_SCL", PinRole::ServoScl, SERVO_SCL),
    PinAssignment::new("PIR_PIN", PinRole::Pir, PIR_PIN),
];

pub const PROFILE: BoardProfile = BoardProfile {
    name: "main",
    device_id: MAIN_DEVICE_ID,
    pins: PIN_MAP,
    free_pins: &[],
};
