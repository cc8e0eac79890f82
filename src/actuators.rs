//! Unit conversions for the scarecrow's actuators: PCA9685 arm servos, the head
//! stepper and the DFPlayer track/volume range.

use crate::boards::main::{SERVO_MAX, SERVO_MIN, SKIP_TRACK, TOTAL_TRACKS};

pub const SERVO_ANGLE_MIN: u16 = 0;
pub const SERVO_ANGLE_MAX: u16 = 180;
pub const SERVO_ANGLE_DEFAULT: u16 = 90;

pub const HEAD_ANGLE_MIN: i32 = -180;
pub const HEAD_ANGLE_MAX: i32 = 180;
pub const HEAD_DEFAULT_STEP: i32 = 45;

pub const VOLUME_MIN: u8 = 0;
pub const VOLUME_MAX: u8 = 30;

/// PCA9685 on-count for an arm angle. Angles past 180° are clamped.
pub fn servo_pulse(angle: u16) -> u16 {
    let angle = angle.min(SERVO_ANGLE_MAX) as u32;
    let span = (SERVO_MAX - SERVO_MIN) as u32;
    SERVO_MIN + (angle * span / SERVO_ANGLE_MAX as u32) as u16
}

/// Signed step count that turns the head to `angle` degrees from center.
pub fn stepper_steps(angle: i32, steps_per_revolution: u32) -> i32 {
    let angle = angle.clamp(HEAD_ANGLE_MIN, HEAD_ANGLE_MAX) as i64;
    (angle * steps_per_revolution as i64 / 360) as i32
}

/// DFPlayer volume, always within 0..=30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u8);

impl Volume {
    pub const DEFAULT: Volume = Volume(crate::boards::main::DEFAULT_VOLUME);

    pub const fn new(level: u8) -> Self {
        if level > VOLUME_MAX {
            Volume(VOLUME_MAX)
        } else {
            Volume(level)
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Tracks are numbered from 1. The skipped track is never selected.
pub const fn is_playable(track: u8) -> bool {
    track >= 1 && track <= TOTAL_TRACKS && track != SKIP_TRACK
}

pub fn next_track(current: u8) -> u8 {
    let mut track = current;
    loop {
        track = if track >= TOTAL_TRACKS { 1 } else { track + 1 };
        if is_playable(track) {
            return track;
        }
    }
}

pub fn previous_track(current: u8) -> u8 {
    let mut track = current;
    loop {
        track = if track <= 1 || track > TOTAL_TRACKS {
            TOTAL_TRACKS
        } else {
            track - 1
        };
        if is_playable(track) {
            return track;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::{main, refactor};

    #[test]
    fn test_servo_pulse_endpoints() {
        assert_eq!(servo_pulse(0), SERVO_MIN);
        assert_eq!(servo_pulse(180), SERVO_MAX);
        assert_eq!(servo_pulse(90), 360);
        assert_eq!(servo_pulse(270), SERVO_MAX);
    }

    #[test]
    fn test_stepper_steps() {
        assert_eq!(stepper_steps(90, main::STEPS_PER_REVOLUTION), 50);
        assert_eq!(stepper_steps(-45, main::STEPS_PER_REVOLUTION), -25);
        assert_eq!(stepper_steps(HEAD_DEFAULT_STEP, refactor::STEPS_PER_REVOLUTION), 400);
        assert_eq!(stepper_steps(720, refactor::STEPS_PER_REVOLUTION), 1600);
    }

    #[test]
    fn test_volume_clamps() {
        assert_eq!(Volume::new(31).level(), VOLUME_MAX);
        assert_eq!(Volume::new(VOLUME_MIN).level(), 0);
        assert_eq!(Volume::default().level(), 20);
    }

    #[test]
    fn test_track_cycle_skips_track_three() {
        assert_eq!(next_track(2), 4);
        assert_eq!(next_track(7), 1);
        assert_eq!(previous_track(4), 2);
        assert_eq!(previous_track(1), 7);
        assert!(!is_playable(SKIP_TRACK));
        assert!(!is_playable(0));
    }

    #[test]
    fn test_track_cycle_visits_every_playable_track() {
        let mut track = 1;
        let mut seen = Vec::new();
        for _ in 0..TOTAL_TRACKS - 1 {
            seen.push(track);
            track = next_track(track);
        }
        assert_eq!(track, 1);
        assert_eq!(seen, vec![1, 2, 4, 5, 6, 7]);
    }
}
