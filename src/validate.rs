//! Whole-board consistency checks.
//!
//! Run on the host in tests and on the device at boot; every finding is also
//! sent to the `log` facade.

use core::fmt;

use heapless::Vec;
use log::{error, info, warn};

use crate::boards::{ALL_BOARDS, BoardProfile};
use crate::device::{CAMERA_DEVICE_ID, MAIN_DEVICE_ID};
use crate::pins::{self, Gpio, PinConflict, PinIssue, PinRole, Severity};

pub const MAX_FINDINGS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding {
    Conflict(PinConflict),
    Pin(PinIssue),
    /// The header lists the pin as spare but a role uses it.
    SparePinInUse { gpio: Gpio, role: PinRole },
}

impl Finding {
    pub const fn severity(&self) -> Severity {
        match self {
            Finding::Conflict(_) | Finding::SparePinInUse { .. } => Severity::Error,
            Finding::Pin(issue) => issue.severity(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Conflict(conflict) => fmt::Display::fmt(conflict, f),
            Finding::Pin(issue) => fmt::Display::fmt(issue, f),
            Finding::SparePinInUse { gpio, role } => {
                write!(f, "{gpio} is listed as spare but used by {role}")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BoardReport {
    pub board: &'static str,
    pub findings: Vec<Finding, MAX_FINDINGS>,
    /// Findings dropped because the report was full.
    pub overflow: usize,
}

impl BoardReport {
    fn new(board: &'static str) -> Self {
        Self {
            board,
            findings: Vec::new(),
            overflow: 0,
        }
    }

    fn push(&mut self, finding: Finding) {
        match finding.severity() {
            Severity::Error => error!("[{}] {}", self.board, finding),
            Severity::Warning => warn!("[{}] {}", self.board, finding),
        }
        if self.findings.push(finding).is_err() {
            self.overflow += 1;
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.severity() == Severity::Warning)
    }

    /// No errors. Warnings are allowed.
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none() && self.overflow == 0
    }
}

pub fn validate_board(profile: &BoardProfile) -> BoardReport {
    let mut report = BoardReport::new(profile.name);

    for conflict in pins::conflicts(profile.pins) {
        report.push(Finding::Conflict(conflict));
    }

    for assignment in profile.pins {
        if let Some(issue) = pins::check_pin(assignment) {
            report.push(Finding::Pin(issue));
        }
    }

    for (role, gpio) in profile.wired() {
        if profile.free_pins.contains(&gpio) {
            report.push(Finding::SparePinInUse { gpio, role });
        }
    }

    info!(
        "[{}] {} pins checked, {} finding(s)",
        profile.name,
        profile.pins.len(),
        report.findings.len() + report.overflow
    );
    report
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateDeviceId(pub &'static str);

impl fmt::Display for DuplicateDeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device id {} is shared by main and camera boards", self.0)
    }
}

pub fn validate_device_ids() -> Result<(), DuplicateDeviceId> {
    if MAIN_DEVICE_ID == CAMERA_DEVICE_ID {
        error!("main and camera boards share device id {}", MAIN_DEVICE_ID);
        return Err(DuplicateDeviceId(MAIN_DEVICE_ID));
    }
    Ok(())
}

/// Validates every board; true when none has errors.
pub fn validate_all() -> bool {
    let mut ok = validate_device_ids().is_ok();
    for board in ALL_BOARDS {
        ok &= validate_board(board).is_ok();
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::{camera, main, refactor};
    use crate::pins::PinAssignment;

    #[test]
    fn test_shipped_boards_have_unique_pins() {
        for board in ALL_BOARDS {
            assert_eq!(pins::conflicts(board.pins).count(), 0, "{}", board.name);
        }
    }

    #[test]
    fn test_shipped_boards_validate() {
        assert!(validate_all());
    }

    #[test]
    fn test_main_board_is_clean() {
        let report = validate_board(&main::PROFILE);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_refactor_strapping_warnings() {
        let report = validate_board(&refactor::PROFILE);
        assert!(report.is_ok());

        let mut roles: std::vec::Vec<_> = report
            .warnings()
            .filter_map(|finding| match finding {
                Finding::Pin(PinIssue::StrappingPin { role, .. }) => Some(role.name()),
                _ => None,
            })
            .collect();
        roles.sort();
        assert_eq!(roles, ["dht22", "speaker relay", "stepper dir"]);
    }

    #[test]
    fn test_camera_warns_on_xclk_and_y2() {
        let report = validate_board(&camera::PROFILE);
        assert!(report.is_ok());
        assert_eq!(report.warnings().count(), 2);
    }

    #[test]
    fn test_detects_collision_and_spare_pin_use() {
        static PINS: &[PinAssignment] = &[
            PinAssignment::new("DHT_PIN", PinRole::Dht, Gpio::pin(2)),
            PinAssignment::new("STEPPER_STEP_PIN", PinRole::StepperStep, Gpio::pin(2)),
            PinAssignment::new("PIR_PIN", PinRole::Pir, Gpio::pin(18)),
        ];
        static SPARE: &[Gpio] = &[Gpio::pin(18)];
        let profile = BoardProfile {
            name: "arms",
            device_id: MAIN_DEVICE_ID,
            pins: PINS,
            free_pins: SPARE,
        };

        let report = validate_board(&profile);
        assert!(!report.is_ok());
        assert!(report.findings.contains(&Finding::Conflict(PinConflict {
            gpio: Gpio::pin(2),
            first: PinRole::Dht,
            second: PinRole::StepperStep,
        })));
        assert!(report.findings.contains(&Finding::SparePinInUse {
            gpio: Gpio::pin(18),
            role: PinRole::Pir,
        }));
    }

    #[test]
    fn test_console_pins_are_flagged() {
        static PINS: &[PinAssignment] = &[
            PinAssignment::new("PIR_PIN", PinRole::Pir, Gpio::pin(1)),
            PinAssignment::new("SPEAKER_PIN", PinRole::SpeakerRelay, Gpio::pin(3)),
        ];
        let profile = BoardProfile {
            name: "console",
            device_id: MAIN_DEVICE_ID,
            pins: PINS,
            free_pins: &[],
        };

        let report = validate_board(&profile);
        assert!(report.is_ok());
        let console: std::vec::Vec<_> = report
            .warnings()
            .filter_map(|finding| match finding {
                Finding::Pin(PinIssue::ConsolePin { gpio, .. }) => Some(gpio.number()),
                _ => None,
            })
            .collect();
        assert_eq!(console, [1, 3]);
    }

    #[test]
    fn test_device_ids() {
        assert_eq!(validate_device_ids(), Ok(()));
    }
}
