#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_backtrace as _;
use esp_hal::{
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    timer::timg::TimerGroup,
};

use bantaybot::{
    boards::main as board,
    device, modbus,
    validate::{validate_board, validate_device_ids},
};

const HEART_BEAT_INTERVAL_MS: u64 = 5_000;

esp_bootloader_esp_idf::esp_app_desc!();

#[embassy_executor::task]
async fn run_heartbeat(pir: Input<'static>) {
    loop {
        esp_println::println!(
            "[HEARTBEAT] {} alive, PIR {}",
            device::MAIN_DEVICE_ID,
            if pir.is_high() { "HIGH" } else { "low" }
        );
        Timer::after(Duration::from_millis(HEART_BEAT_INTERVAL_MS)).await;
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) {
    esp_println::logger::init_logger_from_env();
    let peripherals = esp_hal::init(esp_hal::Config::default());

    esp_println::println!("=== BantayBot main board ===");

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Refuse to drive any pin if the table is inconsistent.
    let report = validate_board(&board::PROFILE);
    if let Err(e) = validate_device_ids() {
        esp_println::println!("[ERROR] {}", e);
    }
    if !report.is_ok() {
        esp_println::println!("[ERROR] pin map has {} error(s), halting", report.errors().count());
        loop {
            Timer::after(Duration::from_secs(1)).await;
        }
    }

    for assignment in board::PIN_MAP {
        if let Some(gpio) = assignment.pin {
            esp_println::println!("  {:<18} {}", assignment.name, gpio);
        }
    }

    // Safe idle state. Peripheral fields must match the board constants:
    // RS485_RE = GPIO4, STEPPER_EN_PIN = GPIO32, PIR_PIN = GPIO14.
    let _rs485_receive = Output::new(peripherals.GPIO4, Level::Low, OutputConfig::default());
    // TMC2225 enable is active low.
    let _stepper_disabled = Output::new(peripherals.GPIO32, Level::High, OutputConfig::default());
    let pir = Input::new(peripherals.GPIO14, InputConfig::default().with_pull(Pull::Down));

    if !device::wifi_configured() {
        log::warn!("WiFi credentials not set; rebuild with BANTAYBOT_WIFI_SSID");
    }

    for register in modbus::SoilRegister::ALL {
        let frame = register.command();
        if !modbus::verify_frame(frame) {
            esp_println::println!("[ERROR] {} request has a bad CRC", register.name());
        }
    }

    if let Err(e) = spawner.spawn(run_heartbeat(pir)) {
        esp_println::println!("[ERROR] Failed to spawn task: {:?}", e);
    }

    loop {
        Timer::after(Duration::from_millis(board::SENSOR_UPDATE_INTERVAL_MS)).await;
    }
}
