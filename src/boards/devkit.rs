//! ESP32 DevKit v1 pins that need care regardless of what is attached

use crate::pins::Gpio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// Must be pulled high at reset.
    BootHigh,
    /// Must be low at reset.
    BootLow,
    /// USB-serial bridge.
    Console,
    /// Wired to the SPI flash; never usable.
    Flash,
}

#[derive(Debug, Clone, Copy)]
pub struct ReservedPin {
    pub gpio: Gpio,
    pub reservation: Reservation,
}

const fn reserved(n: u8, reservation: Reservation) -> ReservedPin {
    ReservedPin {
        gpio: Gpio::pin(n),
        reservation,
    }
}

pub const RESERVED: &[ReservedPin] = &[
    reserved(0, Reservation::BootHigh),
    reserved(1, Reservation::Console),
    reserved(2, Reservation::BootLow),
    reserved(3, Reservation::Console),
    reserved(5, Reservation::BootHigh),
    reserved(6, Reservation::Flash),
    reserved(7, Reservation::Flash),
    reserved(8, Reservation::Flash),
    reserved(9, Reservation::Flash),
    reserved(10, Reservation::Flash),
    reserved(11, Reservation::Flash),
    reserved(12, Reservation::BootLow),
    reserved(15, Reservation::BootHigh),
];

/// General purpose pins on the DevKit header.
pub const GENERAL_PURPOSE: &[Gpio] = &[
    Gpio::pin(13),
    Gpio::pin(14),
    Gpio::pin(16),
    Gpio::pin(17),
    Gpio::pin(18),
    Gpio::pin(19),
    Gpio::pin(21),
    Gpio::pin(22),
    Gpio::pin(23),
    Gpio::pin(25),
    Gpio::pin(26),
    Gpio::pin(27),
    Gpio::pin(32),
    Gpio::pin(33),
    Gpio::pin(34),
    Gpio::pin(35),
    Gpio::pin(36),
    Gpio::pin(39),
];

pub fn reservation(gpio: Gpio) -> Option<Reservation> {
    RESERVED
        .iter()
        .find(|r| r.gpio == gpio)
        .map(|r| r.reservation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_and_general_purpose_are_disjoint() {
        for gpio in GENERAL_PURPOSE {
            assert_eq!(reservation(*gpio), None, "{gpio} is both reserved and free");
        }
    }

    #[test]
    fn test_reservations_agree_with_pad_classes() {
        for r in RESERVED {
            match r.reservation {
                Reservation::Flash => assert!(r.gpio.is_flash()),
                Reservation::BootHigh | Reservation::BootLow => assert!(r.gpio.is_strapping()),
                Reservation::Console => {}
            }
        }
    }
}
