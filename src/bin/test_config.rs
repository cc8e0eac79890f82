#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_backtrace as _;
use esp_hal::{
    gpio::{Level, Output, OutputConfig},
    timer::timg::TimerGroup,
};

use bantaybot::{
    actuators,
    boards::{ALL_BOARDS, main as board},
    modbus::{self, ReadRequest, SoilRegister},
    pins,
    soil::{Moisture, SoilReading},
    validate::{validate_board, validate_device_ids},
};

esp_bootloader_esp_idf::esp_app_desc!();

// Test result tracking
struct TestResults {
    passed: u32,
    failed: u32,
    total: u32,
}

impl TestResults {
    fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
            total: 0,
        }
    }

    fn assert(&mut self, condition: bool, test_name: &str) {
        self.total += 1;
        if condition {
            self.passed += 1;
            esp_println::println!("  ✓ {}", test_name);
        } else {
            self.failed += 1;
            esp_println::println!("  ✗ {} FAILED", test_name);
        }
    }

    fn assert_eq<T: PartialEq + core::fmt::Debug>(&mut self, left: T, right: T, test_name: &str) {
        self.total += 1;
        if left == right {
            self.passed += 1;
            esp_println::println!("  ✓ {}", test_name);
        } else {
            self.failed += 1;
            esp_println::println!("  ✗ {} FAILED: {:?} != {:?}", test_name, left, right);
        }
    }

    fn print_summary(&self) {
        esp_println::println!("\n==========================================");
        esp_println::println!("Test Summary:");
        esp_println::println!("  Total:  {}", self.total);
        esp_println::println!("  Passed: {}", self.passed);
        esp_println::println!("  Failed: {}", self.failed);
        if self.failed == 0 {
            esp_println::println!("\n✓ ALL TESTS PASSED!");
        } else {
            esp_println::println!("\n✗ SOME TESTS FAILED");
        }
        esp_println::println!("==========================================");
    }
}

fn test_pin_maps(results: &mut TestResults) {
    esp_println::println!("\n[TEST] Pin Map Tests");

    for profile in ALL_BOARDS {
        results.assert_eq(
            pins::conflicts(profile.pins).count(),
            0,
            profile.name,
        );
        results.assert(validate_board(profile).is_ok(), "board validates");
    }
    results.assert(validate_device_ids().is_ok(), "device ids are distinct");
}

fn test_modbus_frames(results: &mut TestResults) {
    esp_println::println!("\n[TEST] Modbus Frame Tests");

    results.assert_eq(
        modbus::crc16(&[0x01, 0x03, 0x00, 0x00, 0x00, 0x01]),
        0x0A84,
        "humidity request CRC",
    );
    for register in SoilRegister::ALL {
        results.assert(modbus::verify_frame(register.command()), register.name());
        results.assert_eq(
            ReadRequest::from(register).encode(),
            *register.command(),
            "encoder matches fixed frame",
        );
    }
}

fn test_conversions(results: &mut TestResults) {
    esp_println::println!("\n[TEST] Conversion Tests");

    results.assert_eq(actuators::servo_pulse(0), board::SERVO_MIN, "servo 0 deg");
    results.assert_eq(actuators::servo_pulse(180), board::SERVO_MAX, "servo 180 deg");
    results.assert_eq(actuators::next_track(2), 4, "track 3 skipped");

    let reading = SoilReading::from_raw(658, 253, 1200, 68);
    results.assert_eq(reading.humidity_status(), Moisture::Optimal, "soil humidity status");
}

async fn test_rs485_direction_pin(results: &mut TestResults, de: esp_hal::peripherals::GPIO4<'static>) {
    esp_println::println!("\n[TEST] RS485 Direction Pin");

    let mut de = Output::new(de, Level::Low, OutputConfig::default());
    results.assert(de.is_set_low(), "DE/RE starts in receive");

    de.set_high();
    Timer::after(Duration::from_millis(1)).await;
    results.assert(de.is_set_high(), "DE/RE switches to transmit");

    de.set_low();
    results.assert(de.is_set_low(), "DE/RE back to receive");
}

#[esp_rtos::main]
async fn main(_spawner: Spawner) {
    esp_println::logger::init_logger_from_env();
    let peripherals = esp_hal::init(esp_hal::Config::default());

    esp_println::println!("\n==========================================");
    esp_println::println!("=== BantayBot Config Test Runner ===");
    esp_println::println!("==========================================");

    let mut results = TestResults::new();

    // Run tests that don't need hardware
    test_pin_maps(&mut results);
    test_modbus_frames(&mut results);
    test_conversions(&mut results);

    // RS485_RE
    let gpio4 = peripherals.GPIO4;

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    test_rs485_direction_pin(&mut results, gpio4).await;

    results.print_summary();

    esp_println::println!("\nTest run complete. Looping...");
    loop {
        if results.failed == 0 {
            Timer::after(Duration::from_millis(200)).await;
        } else {
            Timer::after(Duration::from_millis(1000)).await;
        }
    }
}
