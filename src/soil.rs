//! Soil sensor readings and how the companion app grades them
//!
//! The sensor reports humidity, temperature and pH in tenths and conductivity
//! in µS/cm. Thresholds follow the app's soil card: a value on the upper
//! boundary still counts as in range.

use core::fmt::{self, Write};

use crate::modbus::SoilRegister;

pub const HUMIDITY_LOW: f32 = 40.0;
pub const HUMIDITY_OPTIMAL: f32 = 70.0;
pub const TEMP_LOW: f32 = 20.0;
pub const TEMP_OPTIMAL: f32 = 30.0;
pub const CONDUCTIVITY_LOW: u16 = 200;
pub const CONDUCTIVITY_OPTIMAL: u16 = 2000;
pub const PH_LOW: f32 = 5.5;
pub const PH_OPTIMAL: f32 = 7.5;

// DHT22 backup sensor on the refactored main board
pub const AIR_TEMP_LOW: f32 = 10.0;
pub const AIR_TEMP_HIGH: f32 = 35.0;
pub const AIR_HUMIDITY_LOW: f32 = 30.0;
pub const AIR_HUMIDITY_HIGH: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilReading {
    /// %
    pub humidity: f32,
    /// °C
    pub temperature: f32,
    /// µS/cm
    pub conductivity: u16,
    pub ph: f32,
}

impl SoilReading {
    /// Builds a reading from the four raw register values, in register order.
    pub fn from_raw(humidity: u16, temperature: u16, conductivity: u16, ph: u16) -> Self {
        Self {
            humidity: humidity as f32 / 10.0,
            // Two's complement below freezing.
            temperature: temperature as i16 as f32 / 10.0,
            conductivity,
            ph: ph as f32 / 10.0,
        }
    }

    pub fn humidity_status(&self) -> Moisture {
        if self.humidity < HUMIDITY_LOW {
            Moisture::Dry
        } else if self.humidity <= HUMIDITY_OPTIMAL {
            Moisture::Optimal
        } else {
            Moisture::Wet
        }
    }

    pub fn temperature_status(&self) -> Warmth {
        if self.temperature < TEMP_LOW {
            Warmth::Cold
        } else if self.temperature <= TEMP_OPTIMAL {
            Warmth::Good
        } else {
            Warmth::Hot
        }
    }

    pub fn conductivity_status(&self) -> Nutrients {
        if self.conductivity < CONDUCTIVITY_LOW {
            Nutrients::Low
        } else if self.conductivity <= CONDUCTIVITY_OPTIMAL {
            Nutrients::Optimal
        } else {
            Nutrients::High
        }
    }

    pub fn ph_status(&self) -> Acidity {
        if self.ph < PH_LOW {
            Acidity::Acidic
        } else if self.ph <= PH_OPTIMAL {
            Acidity::Balanced
        } else {
            Acidity::Alkaline
        }
    }
}

/// Collects the four register values as they arrive, in any order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadingBuilder {
    raw: [Option<u16>; 4],
}

impl ReadingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, register: SoilRegister, raw: u16) -> &mut Self {
        self.raw[register.address() as usize] = Some(raw);
        self
    }

    /// `None` until every register has been set.
    pub fn build(&self) -> Option<SoilReading> {
        match self.raw {
            [Some(h), Some(t), Some(c), Some(p)] => Some(SoilReading::from_raw(h, t, c, p)),
            _ => None,
        }
    }
}

macro_rules! status {
    ($(#[$meta:meta])* $name:ident in_range $ok:ident { $($variant:ident => $en:literal, $tl:literal;)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $en,)*
                }
            }

            /// Tagalog label, the app's default language.
            pub const fn label_tl(self) -> &'static str {
                match self {
                    $($name::$variant => $tl,)*
                }
            }

            pub const fn in_range(self) -> bool {
                matches!(self, $name::$ok)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

status!(Moisture in_range Optimal {
    Dry => "Dry", "Tuyo";
    Optimal => "Optimal", "Sakto";
    Wet => "Wet", "Basa";
});

status!(Warmth in_range Good {
    Cold => "Cold", "Malamig";
    Good => "Good", "Mabuti";
    Hot => "Hot", "Mainit";
});

status!(Nutrients in_range Optimal {
    Low => "Low nutrients", "Kulang sustansya";
    Optimal => "Optimal", "Sakto";
    High => "High nutrients", "Sobra sustansya";
});

status!(Acidity in_range Balanced {
    Acidic => "Too acidic", "Masyado asido";
    Balanced => "Balanced", "Balanse";
    Alkaline => "Too alkaline", "Masyado alkaline";
});

/// DHT22 air readings outside the app's alert band.
pub fn air_alert(temperature: f32, humidity: f32) -> bool {
    !(AIR_TEMP_LOW..=AIR_TEMP_HIGH).contains(&temperature)
        || !(AIR_HUMIDITY_LOW..=AIR_HUMIDITY_HIGH).contains(&humidity)
}

/// Rolling window over the last few soil readings.
pub struct SoilLog {
    readings: [Option<SoilReading>; 5],
    index: usize,
}

impl SoilLog {
    pub fn new() -> Self {
        Self {
            readings: [None; 5],
            index: 0,
        }
    }

    pub fn record(&mut self, reading: SoilReading) {
        self.readings[self.index] = Some(reading);
        self.index = (self.index + 1) % self.readings.len();
    }

    pub fn average(&self) -> Option<SoilReading> {
        let mut count = 0u32;
        let (mut humidity, mut temperature, mut conductivity, mut ph) = (0.0, 0.0, 0u32, 0.0);

        for reading in self.readings.iter().flatten() {
            humidity += reading.humidity;
            temperature += reading.temperature;
            conductivity += reading.conductivity as u32;
            ph += reading.ph;
            count += 1;
        }

        if count == 0 {
            return None;
        }
        let n = count as f32;
        Some(SoilReading {
            humidity: humidity / n,
            temperature: temperature / n,
            conductivity: (conductivity / count) as u16,
            ph: ph / n,
        })
    }
}

impl Default for SoilLog {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line summary for the serial console.
pub fn format_reading(reading: &SoilReading) -> heapless::String<96> {
    let mut buffer = heapless::String::new();
    let _ = write!(
        buffer,
        "{:.1}% {} | {:.1}C {} | {}uS/cm {} | pH {:.1} {}",
        reading.humidity,
        reading.humidity_status(),
        reading.temperature,
        reading.temperature_status(),
        reading.conductivity,
        reading.conductivity_status(),
        reading.ph,
        reading.ph_status(),
    );
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(humidity: f32, temperature: f32, conductivity: u16, ph: f32) -> SoilReading {
        SoilReading {
            humidity,
            temperature,
            conductivity,
            ph,
        }
    }

    #[test]
    fn test_from_raw_scaling() {
        let r = SoilReading::from_raw(658, 253, 1200, 68);
        assert!((r.humidity - 65.8).abs() < 0.01);
        assert!((r.temperature - 25.3).abs() < 0.01);
        assert_eq!(r.conductivity, 1200);
        assert!((r.ph - 6.8).abs() < 0.01);
    }

    #[test]
    fn test_from_raw_negative_temperature() {
        let r = SoilReading::from_raw(0, (-35i16) as u16, 0, 70);
        assert!((r.temperature + 3.5).abs() < 0.01);
    }

    #[test]
    fn test_humidity_boundaries() {
        assert_eq!(reading(39.9, 25.0, 500, 7.0).humidity_status(), Moisture::Dry);
        assert_eq!(reading(40.0, 25.0, 500, 7.0).humidity_status(), Moisture::Optimal);
        assert_eq!(reading(70.0, 25.0, 500, 7.0).humidity_status(), Moisture::Optimal);
        assert_eq!(reading(70.1, 25.0, 500, 7.0).humidity_status(), Moisture::Wet);
    }

    #[test]
    fn test_temperature_boundaries() {
        assert_eq!(reading(50.0, 19.9, 500, 7.0).temperature_status(), Warmth::Cold);
        assert_eq!(reading(50.0, 30.0, 500, 7.0).temperature_status(), Warmth::Good);
        assert_eq!(reading(50.0, 30.5, 500, 7.0).temperature_status(), Warmth::Hot);
    }

    #[test]
    fn test_conductivity_boundaries() {
        assert_eq!(reading(50.0, 25.0, 199, 7.0).conductivity_status(), Nutrients::Low);
        assert_eq!(reading(50.0, 25.0, 200, 7.0).conductivity_status(), Nutrients::Optimal);
        assert_eq!(reading(50.0, 25.0, 2000, 7.0).conductivity_status(), Nutrients::Optimal);
        assert_eq!(reading(50.0, 25.0, 2001, 7.0).conductivity_status(), Nutrients::High);
    }

    #[test]
    fn test_ph_boundaries() {
        assert_eq!(reading(50.0, 25.0, 500, 5.4).ph_status(), Acidity::Acidic);
        assert_eq!(reading(50.0, 25.0, 500, 5.5).ph_status(), Acidity::Balanced);
        assert_eq!(reading(50.0, 25.0, 500, 7.5).ph_status(), Acidity::Balanced);
        assert_eq!(reading(50.0, 25.0, 500, 7.6).ph_status(), Acidity::Alkaline);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Moisture::Dry.label_tl(), "Tuyo");
        assert_eq!(Nutrients::High.to_string(), "High nutrients");
        assert!(Warmth::Good.in_range());
        assert!(Acidity::Balanced.in_range());
        assert!(!Moisture::Wet.in_range());
    }

    #[test]
    fn test_builder_waits_for_all_registers() {
        let mut builder = ReadingBuilder::new();
        builder
            .set(SoilRegister::Ph, 65)
            .set(SoilRegister::Humidity, 500)
            .set(SoilRegister::Temperature, 240);
        assert!(builder.build().is_none());

        builder.set(SoilRegister::Conductivity, 800);
        let r = builder.build().unwrap();
        assert_eq!(r.conductivity, 800);
        assert!((r.ph - 6.5).abs() < 0.01);
    }

    #[test]
    fn test_air_alert() {
        assert!(!air_alert(25.0, 50.0));
        assert!(air_alert(36.0, 50.0));
        assert!(air_alert(25.0, 85.0));
        assert!(air_alert(5.0, 50.0));
    }

    #[test]
    fn test_log_average_rolls_over() {
        let mut log = SoilLog::new();
        assert!(log.average().is_none());

        for i in 0..5 {
            log.record(reading(50.0, 20.0, 100 * (i + 1), 7.0));
        }
        // Evicts the 100 µS/cm sample.
        log.record(reading(50.0, 20.0, 600, 7.0));

        let avg = log.average().unwrap();
        assert_eq!(avg.conductivity, 400);
        assert!((avg.humidity - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_format_reading() {
        let line = format_reading(&reading(65.8, 25.3, 1200, 6.8));
        assert!(line.contains("65.8% Optimal"));
        assert!(line.contains("pH 6.8 Balanced"));
    }
}
