//! Device identity, network settings and the command vocabulary shared with the
//! companion app.
//!
//! Secrets are read from the build environment (`BANTAYBOT_WIFI_SSID`,
//! `BANTAYBOT_WIFI_PASSWORD`, `BANTAYBOT_AP_PASSWORD`, `BANTAYBOT_FIREBASE_API_KEY`)
//! and fall back to placeholders, so nothing sensitive lives in the tree.

use core::fmt;

// Must match the companion app.
pub const MAIN_DEVICE_ID: &str = "main_001";
pub const CAMERA_DEVICE_ID: &str = "camera_001";

pub const MAIN_MDNS: &str = "bantaybot-main.local";
pub const CAMERA_MDNS: &str = "bantaybot-camera.local";

pub const MAIN_AP_SSID: &str = "BantayBot-Main-Setup";
pub const CAMERA_AP_SSID: &str = "BantayBot-Camera-Setup";

pub const CAMERA_HTTP_PORT: u16 = 80;
pub const MAIN_WEBSOCKET_PORT: u16 = crate::boards::main::WEBSOCKET_PORT;

const fn env_or(value: Option<&'static str>, fallback: &'static str) -> &'static str {
    match value {
        Some(v) => v,
        None => fallback,
    }
}

pub const WIFI_SSID: &str = env_or(option_env!("BANTAYBOT_WIFI_SSID"), "YOUR_WIFI_SSID");
pub const WIFI_PASSWORD: &str =
    env_or(option_env!("BANTAYBOT_WIFI_PASSWORD"), "YOUR_WIFI_PASSWORD");
pub const AP_PASSWORD: &str = env_or(option_env!("BANTAYBOT_AP_PASSWORD"), "bantaybot123");

pub const FIREBASE_PROJECT_ID: &str = "cloudbantaybot";
pub const FIREBASE_AUTH_DOMAIN: &str = "cloudbantaybot.firebaseapp.com";
pub const FIREBASE_API_KEY: &str = env_or(option_env!("BANTAYBOT_FIREBASE_API_KEY"), "");

pub mod collections {
    pub const DEVICES: &str = "devices";
    pub const SENSOR_DATA: &str = "sensor_data";
    pub const COMMANDS: &str = "commands";
    pub const DETECTION_HISTORY: &str = "detection_history";
    pub const HARVEST_DATA: &str = "harvest_data";
    pub const RAINFALL_LOG: &str = "rainfall_log";
    pub const SETTINGS: &str = "settings";
}

pub const COMMAND_POLL_INTERVAL_MS: u64 = 500;
pub const CONNECTION_TEST_INTERVAL_MS: u64 = 30_000;

/// True when the build was given real WiFi credentials.
pub fn wifi_configured() -> bool {
    WIFI_SSID != "YOUR_WIFI_SSID" && !WIFI_SSID.is_empty()
}

macro_rules! commands {
    ($($variant:ident => $name:literal,)*) => {
        /// Commands the app writes to the `commands` collection.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Command {
            $($variant,)*
        }

        impl Command {
            pub const ALL: &'static [Command] = &[$(Command::$variant,)*];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Command::$variant => $name,)*
                }
            }

            pub fn parse(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Command::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

commands! {
    PlayAudio => "play_audio",
    StopAudio => "stop_audio",
    NextTrack => "next_track",
    PrevTrack => "prev_track",
    SetVolume => "set_volume",
    SetTrack => "set_track",
    RotateHead => "rotate_head",
    RotateLeft => "rotate_left",
    RotateRight => "rotate_right",
    RotateCenter => "rotate_center",
    MoveServo => "move_servo",
    OscillateArms => "oscillate_arms",
    StopOscillate => "stop_oscillate",
    ArmsRest => "arms_rest",
    ArmsAlert => "arms_alert",
    ArmsWave => "arms_wave",
    SetBrightness => "set_brightness",
    SetContrast => "set_contrast",
    SetResolution => "set_resolution",
    ToggleGrayscale => "toggle_grayscale",
    EnableDetection => "enable_detection",
    DisableDetection => "disable_detection",
    SetSensitivity => "set_sensitivity",
    Restart => "restart",
    TriggerAlarm => "trigger_alarm",
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Main,
    Camera,
    Either,
}

impl Command {
    /// Which board acts on the command.
    pub const fn target(self) -> Target {
        use Command::*;

        match self {
            SetBrightness | SetContrast | SetResolution | ToggleGrayscale | EnableDetection
            | DisableDetection | SetSensitivity => Target::Camera,
            Restart => Target::Either,
            _ => Target::Main,
        }
    }

    pub const fn device_id(self) -> Option<&'static str> {
        match self.target() {
            Target::Main => Some(MAIN_DEVICE_ID),
            Target::Camera => Some(CAMERA_DEVICE_ID),
            Target::Either => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_ids_differ() {
        assert_ne!(MAIN_DEVICE_ID, CAMERA_DEVICE_ID);
        assert_ne!(MAIN_MDNS, CAMERA_MDNS);
        assert_ne!(MAIN_AP_SSID, CAMERA_AP_SSID);
        assert_ne!(MAIN_WEBSOCKET_PORT, CAMERA_HTTP_PORT);
    }

    #[test]
    fn test_command_names_parse_back() {
        for command in Command::ALL {
            assert_eq!(Command::parse(command.as_str()), Some(*command));
        }
        assert_eq!(Command::ALL.len(), 25);
        assert_eq!(Command::parse("dance"), None);
    }

    #[test]
    fn test_command_targets() {
        assert_eq!(Command::RotateHead.device_id(), Some(MAIN_DEVICE_ID));
        assert_eq!(Command::SetResolution.device_id(), Some(CAMERA_DEVICE_ID));
        assert_eq!(Command::Restart.device_id(), None);
    }
}
