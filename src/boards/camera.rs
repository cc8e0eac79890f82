//! AI-Thinker ESP32-CAM module

use super::BoardProfile;
use crate::device::CAMERA_DEVICE_ID;
use crate::pins::{Gpio, PinAssignment, PinRole};

pub const PWDN_GPIO_NUM: Gpio = Gpio::pin(32);
/// Reset is not wired on the AI-Thinker module.
pub const RESET_GPIO_NUM: Option<Gpio> = None;
pub const XCLK_GPIO_NUM: Gpio = Gpio::pin(0);
pub const SIOD_GPIO_NUM: Gpio = Gpio::pin(26);
pub const SIOC_GPIO_NUM: Gpio = Gpio::pin(27);

pub const Y9_GPIO_NUM: Gpio = Gpio::pin(35);
pub const Y8_GPIO_NUM: Gpio = Gpio::pin(34);
pub const Y7_GPIO_NUM: Gpio = Gpio::pin(39);
pub const Y6_GPIO_NUM: Gpio = Gpio::pin(36);
pub const Y5_GPIO_NUM: Gpio = Gpio::pin(21);
pub const Y4_GPIO_NUM: Gpio = Gpio::pin(19);
pub const Y3_GPIO_NUM: Gpio = Gpio::pin(18);
pub const Y2_GPIO_NUM: Gpio = Gpio::pin(5);
pub const VSYNC_GPIO_NUM: Gpio = Gpio::pin(25);
pub const HREF_GPIO_NUM: Gpio = Gpio::pin(23);
pub const PCLK_GPIO_NUM: Gpio = Gpio::pin(22);

pub const LED_GPIO_NUM: Gpio = Gpio::pin(4);

/// Y2..=Y9, least significant bit first.
pub const DATA_PINS: [Gpio; 8] = [
    Y2_GPIO_NUM,
    Y3_GPIO_NUM,
    Y4_GPIO_NUM,
    Y5_GPIO_NUM,
    Y6_GPIO_NUM,
    Y7_GPIO_NUM,
    Y8_GPIO_NUM,
    Y9_GPIO_NUM,
];

// GPIO 1 and 3 stay on the debug serial port.
pub const AVAILABLE_PINS: &[Gpio] = &[
    Gpio::pin(2),
    Gpio::pin(12),
    Gpio::pin(13),
    Gpio::pin(14),
    Gpio::pin(15),
    Gpio::pin(16),
];

pub const PIN_MAP: &[PinAssignment] = &[
    PinAssignment::new("PWDN_GPIO_NUM", PinRole::CameraPowerDown, PWDN_GPIO_NUM),
    PinAssignment::unconnected("RESET_GPIO_NUM", PinRole::CameraReset),
    PinAssignment::new("XCLK_GPIO_NUM", PinRole::CameraXclk, XCLK_GPIO_NUM),
    PinAssignment::new("SIOD_GPIO_NUM", PinRole::CameraSccbData, SIOD_GPIO_NUM),
    PinAssignment::new("SIOC_GPIO_NUM", PinRole::CameraSccbClock, SIOC_GPIO_NUM),
    PinAssignment::new("Y9_GPIO_NUM", PinRole::CameraData(9), Y9_GPIO_NUM),
    PinAssignment::new("Y8_GPIO_NUM", PinRole::CameraData(8), Y8_GPIO_NUM),
    PinAssignment::new("Y7_GPIO_NUM", PinRole::CameraData(7), Y7_GPIO_NUM),
    PinAssignment::new("Y6_GPIO_NUM", PinRole::CameraData(6), Y6_GPIO_NUM),
    PinAssignment::new("Y5_GPIO_NUM", PinRole::CameraData(5), Y5_GPIO_NUM),
    PinAssignment::new("Y4_GPIO_NUM", PinRole::CameraData(4), Y4_GPIO_NUM),
    PinAssignment::new("Y3_GPIO_NUM", PinRole::CameraData(3), Y3_GPIO_NUM),
    PinAssignment::new("Y2_GPIO_NUM", PinRole::CameraData(2), Y2_GPIO_NUM),
    PinAssignment::new("VSYNC_GPIO_NUM", PinRole::CameraVsync, VSYNC_GPIO_NUM),
    PinAssignment::new("HREF_GPIO_NUM", PinRole::CameraHref, HREF_GPIO_NUM),
    PinAssignment::new("PCLK_GPIO_NUM", PinRole::CameraPclk, PCLK_GPIO_NUM),
    PinAssignment::new("LED_GPIO_NUM", PinRole::FlashLed, LED_GPIO_NUM),
];

pub const PROFILE: BoardProfile = BoardProfile {
    name: "camera",
    device_id: CAMERA_DEVICE_ID,
    pins: PIN_MAP,
    free_pins: AVAILABLE_PINS,
};
