//! GPIO assignments and the ESP32 pin rules they are checked against

use core::fmt;

use crate::boards::devkit::{self, Reservation};

/// A GPIO number that exists on the ESP32 (DevKit v1 and ESP32-CAM share the die).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gpio(u8);

impl Gpio {
    /// Returns `None` for numbers the ESP32 has no pad for.
    pub const fn new(n: u8) -> Option<Self> {
        match n {
            0..=19 | 21..=23 | 25..=27 | 32..=39 => Some(Self(n)),
            _ => None,
        }
    }

    /// Const constructor for the board tables; an invalid number fails the build.
    pub(crate) const fn pin(n: u8) -> Self {
        match Self::new(n) {
            Some(gpio) => gpio,
            None => panic!("no such ESP32 GPIO"),
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Wired to the on-module SPI flash.
    pub const fn is_flash(self) -> bool {
        matches!(self.0, 6..=11)
    }

    /// Sampled at reset to select boot mode / flash voltage.
    pub const fn is_strapping(self) -> bool {
        matches!(self.0, 0 | 2 | 5 | 12 | 15)
    }

    /// No output driver and no internal pull resistors.
    pub const fn is_input_only(self) -> bool {
        matches!(self.0, 34..=39)
    }
}

impl fmt::Display for Gpio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
    Bidirectional,
}

impl Direction {
    pub const fn drives(self) -> bool {
        !matches!(self, Direction::Input)
    }
}

/// The job a pin does on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    // DFPlayer Mini (ESP32 side of the link)
    DfPlayerRx,
    DfPlayerTx,
    // MAX485 transceiver
    Rs485DirectionControl,
    Rs485Rx,
    Rs485Tx,
    // TMC2225 stepper driver
    StepperStep,
    StepperDir,
    StepperEnable,
    // PCA9685 I2C bus
    ServoSda,
    ServoScl,
    Pir,
    Dht,
    SpeakerRelay,
    // AI-Thinker camera bus
    CameraPowerDown,
    CameraReset,
    CameraXclk,
    CameraSccbData,
    CameraSccbClock,
    /// Parallel data line Y2..=Y9.
    CameraData(u8),
    CameraVsync,
    CameraHref,
    CameraPclk,
    FlashLed,
}

impl PinRole {
    pub const fn direction(self) -> Direction {
        use PinRole::*;

        match self {
            DfPlayerRx | Rs485Rx | Pir | CameraData(_) | CameraVsync | CameraHref | CameraPclk => {
                Direction::Input
            }
            ServoSda | ServoScl | Dht | CameraSccbData => Direction::Bidirectional,
            DfPlayerTx | Rs485DirectionControl | Rs485Tx | StepperStep | StepperDir
            | StepperEnable | SpeakerRelay | CameraPowerDown | CameraReset | CameraXclk
            | CameraSccbClock | FlashLed => Direction::Output,
        }
    }

    /// Board-independent signal name; the header macro lives on [`PinAssignment`].
    pub const fn name(self) -> &'static str {
        use PinRole::*;

        match self {
            DfPlayerRx => "dfplayer rx",
            DfPlayerTx => "dfplayer tx",
            Rs485DirectionControl => "rs485 de/re",
            Rs485Rx => "rs485 rx",
            Rs485Tx => "rs485 tx",
            StepperStep => "stepper step",
            StepperDir => "stepper dir",
            StepperEnable => "stepper enable",
            ServoSda => "pca9685 sda",
            ServoScl => "pca9685 scl",
            Pir => "pir",
            Dht => "dht22",
            SpeakerRelay => "speaker relay",
            CameraPowerDown => "camera pwdn",
            CameraReset => "camera reset",
            CameraXclk => "camera xclk",
            CameraSccbData => "camera sccb sda",
            CameraSccbClock => "camera sccb scl",
            CameraData(2) => "camera y2",
            CameraData(3) => "camera y3",
            CameraData(4) => "camera y4",
            CameraData(5) => "camera y5",
            CameraData(6) => "camera y6",
            CameraData(7) => "camera y7",
            CameraData(8) => "camera y8",
            CameraData(9) => "camera y9",
            CameraData(_) => "camera data",
            CameraVsync => "camera vsync",
            CameraHref => "camera href",
            CameraPclk => "camera pclk",
            FlashLed => "flash led",
        }
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a board's pin table. `pin` is `None` when the signal is not wired
/// (the headers write this as `-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAssignment {
    /// Macro name as spelled in this board's header.
    pub name: &'static str,
    pub role: PinRole,
    pub pin: Option<Gpio>,
}

impl PinAssignment {
    pub const fn new(name: &'static str, role: PinRole, pin: Gpio) -> Self {
        Self {
            name,
            role,
            pin: Some(pin),
        }
    }

    pub const fn unconnected(name: &'static str, role: PinRole) -> Self {
        Self {
            name,
            role,
            pin: None,
        }
    }
}

pub type PinMap = &'static [PinAssignment];

/// Two roles bound to the same pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConflict {
    pub gpio: Gpio,
    pub first: PinRole,
    pub second: PinRole,
}

impl fmt::Display for PinConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} used by both {} and {}", self.gpio, self.first, self.second)
    }
}

/// Every pair of assignments that share a GPIO, in table order.
pub fn conflicts(map: &[PinAssignment]) -> impl Iterator<Item = PinConflict> + '_ {
    map.iter().enumerate().flat_map(move |(i, a)| {
        map[i + 1..].iter().filter_map(move |b| match (a.pin, b.pin) {
            (Some(x), Some(y)) if x == y => Some(PinConflict {
                gpio: x,
                first: a.role,
                second: b.role,
            }),
            _ => None,
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// Something wrong with a single assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinIssue {
    FlashPin { role: PinRole, gpio: Gpio },
    OutputOnInputOnly { role: PinRole, gpio: Gpio },
    StrappingPin { role: PinRole, gpio: Gpio },
    /// GPIO 1/3, the UART0 console.
    ConsolePin { role: PinRole, gpio: Gpio },
}

impl PinIssue {
    pub const fn severity(&self) -> Severity {
        match self {
            PinIssue::FlashPin { .. } | PinIssue::OutputOnInputOnly { .. } => Severity::Error,
            PinIssue::StrappingPin { .. } | PinIssue::ConsolePin { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for PinIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinIssue::FlashPin { role, gpio } => {
                write!(f, "{role} on {gpio} collides with the SPI flash")
            }
            PinIssue::OutputOnInputOnly { role, gpio } => {
                write!(f, "{role} drives {gpio}, which is input-only")
            }
            PinIssue::StrappingPin { role, gpio } => {
                write!(f, "{role} on strapping pin {gpio} can upset boot")
            }
            PinIssue::ConsolePin { role, gpio } => {
                write!(f, "{role} on {gpio} shares the serial console")
            }
        }
    }
}

/// Checks one assignment against the ESP32 pad rules. The pad classes don't
/// overlap, so at most one issue applies.
pub fn check_pin(assignment: &PinAssignment) -> Option<PinIssue> {
    let gpio = assignment.pin?;
    let role = assignment.role;

    if gpio.is_flash() {
        Some(PinIssue::FlashPin { role, gpio })
    } else if gpio.is_input_only() && role.direction().drives() {
        Some(PinIssue::OutputOnInputOnly { role, gpio })
    } else if gpio.is_strapping() {
        Some(PinIssue::StrappingPin { role, gpio })
    } else if devkit::reservation(gpio) == Some(Reservation::Console) {
        Some(PinIssue::ConsolePin { role, gpio })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_new_rejects_missing_pads() {
        assert!(Gpio::new(20).is_none());
        assert!(Gpio::new(24).is_none());
        assert!(Gpio::new(30).is_none());
        assert!(Gpio::new(40).is_none());
        assert_eq!(Gpio::new(39).map(Gpio::number), Some(39));
        assert_eq!(Gpio::new(0).map(Gpio::number), Some(0));
    }

    #[test]
    fn test_pad_classes() {
        assert!(Gpio::pin(6).is_flash());
        assert!(!Gpio::pin(13).is_flash());
        assert!(Gpio::pin(12).is_strapping());
        assert!(Gpio::pin(35).is_input_only());
        assert!(!Gpio::pin(33).is_input_only());
    }

    #[test]
    fn test_conflicts_reports_each_pair() {
        let map = [
            PinAssignment::new("DHT_PIN", PinRole::Dht, Gpio::pin(2)),
            PinAssignment::new("STEPPER_STEP_PIN", PinRole::StepperStep, Gpio::pin(2)),
            PinAssignment::new("PIR_PIN", PinRole::Pir, Gpio::pin(14)),
            PinAssignment::unconnected("RESET_GPIO_NUM", PinRole::CameraReset),
            PinAssignment::unconnected("PWDN_GPIO_NUM", PinRole::CameraPowerDown),
        ];
        let found: Vec<_> = conflicts(&map).collect();
        assert_eq!(
            found,
            vec![PinConflict {
                gpio: Gpio::pin(2),
                first: PinRole::Dht,
                second: PinRole::StepperStep,
            }]
        );
    }

    #[test]
    fn test_check_pin_output_on_input_only() {
        let issue = check_pin(&PinAssignment::new("SPEAKER_PIN", PinRole::SpeakerRelay, Gpio::pin(34)));
        assert_eq!(issue.map(|i| i.severity()), Some(Severity::Error));

        // Inputs on input-only pads are fine.
        let y9 = PinAssignment::new("Y9_GPIO_NUM", PinRole::CameraData(9), Gpio::pin(35));
        assert_eq!(check_pin(&y9), None);
    }

    #[test]
    fn test_check_pin_strapping_and_flash() {
        let issue = check_pin(&PinAssignment::new("DHT_PIN", PinRole::Dht, Gpio::pin(2)));
        assert_eq!(
            issue,
            Some(PinIssue::StrappingPin {
                role: PinRole::Dht,
                gpio: Gpio::pin(2),
            })
        );

        let issue = check_pin(&PinAssignment::new("PIR_PIN", PinRole::Pir, Gpio::pin(7)));
        assert!(matches!(issue, Some(PinIssue::FlashPin { .. })));
        assert_eq!(issue.map(|i| i.severity()), Some(Severity::Error));
    }

    #[test]
    fn test_check_pin_console() {
        let issue = check_pin(&PinAssignment::new("PIR_PIN", PinRole::Pir, Gpio::pin(3)));
        assert_eq!(
            issue,
            Some(PinIssue::ConsolePin {
                role: PinRole::Pir,
                gpio: Gpio::pin(3),
            })
        );
        assert_eq!(issue.map(|i| i.severity()), Some(Severity::Warning));

        let unwired = PinAssignment::unconnected("RESET_GPIO_NUM", PinRole::CameraReset);
        assert_eq!(check_pin(&unwired), None);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(PinRole::CameraData(9).name(), "camera y9");
        assert_eq!(PinRole::Rs485DirectionControl.to_string(), "rs485 de/re");
        assert_eq!(PinRole::Pir.direction(), Direction::Input);
    }
}
