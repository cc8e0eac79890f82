//! Pin maps and settings for every BantayBot board revision

pub mod camera;
pub mod devkit;
pub mod main;
pub mod refactor;

use crate::pins::{Gpio, PinAssignment, PinMap, PinRole};

/// Everything the checks need to know about one board header.
#[derive(Debug, Clone, Copy)]
pub struct BoardProfile {
    pub name: &'static str,
    pub device_id: &'static str,
    pub pins: PinMap,
    /// Pins the header advertises as spare. Empty when the header lists none.
    pub free_pins: &'static [Gpio],
}

impl BoardProfile {
    pub fn pin_for(&self, role: PinRole) -> Option<Gpio> {
        self.pins
            .iter()
            .find(|assignment| assignment.role == role)
            .and_then(|assignment| assignment.pin)
    }

    /// Connected assignments only.
    pub fn wired(&self) -> impl Iterator<Item = (PinRole, Gpio)> + '_ {
        self.pins
            .iter()
            .filter_map(|PinAssignment { role, pin, .. }| pin.map(|gpio| (*role, gpio)))
    }
}

pub static ALL_BOARDS: [&BoardProfile; 3] = [&main::PROFILE, &refactor::PROFILE, &camera::PROFILE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_for() {
        assert_eq!(main::PROFILE.pin_for(PinRole::Pir), Some(main::PIR_PIN));
        assert_eq!(refactor::PROFILE.pin_for(PinRole::Pir), None);
        assert_eq!(camera::PROFILE.pin_for(PinRole::CameraReset), None);
    }

    #[test]
    fn test_wired_skips_unconnected() {
        let camera = &camera::PROFILE;
        assert_eq!(camera.wired().count(), camera.pins.len() - 1);
    }

    #[test]
    fn test_macro_names_follow_each_header() {
        let enable = |profile: &BoardProfile| {
            profile
                .pins
                .iter()
                .find(|assignment| assignment.role == PinRole::StepperEnable)
                .map(|assignment| assignment.name)
        };
        assert_eq!(enable(&main::PROFILE), Some("STEPPER_EN_PIN"));
        assert_eq!(enable(&refactor::PROFILE), Some("STEPPER_ENABLE_PIN"));
    }

    #[test]
    fn test_board_names_are_distinct() {
        for (i, a) in ALL_BOARDS.iter().enumerate() {
            for b in &ALL_BOARDS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
