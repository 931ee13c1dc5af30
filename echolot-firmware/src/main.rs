//! Echolot - Ultrasonic Rangefinder Firmware
//!
//! Main firmware binary for the STM32F042K6 reference board. Times the echo
//! of an HC-SR04 style sensor with TIM3 input capture and shows the distance
//! on an HD44780 LCD.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Flex, Pull};
use embassy_stm32::interrupt;
use embassy_stm32::timer::input_capture::CapturePin;
use embassy_stm32::timer::low_level::Timer;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use echolot_drivers::{Hd44780, Icu};
use echolot_hal_stm32f0::{FlexPin, TimerCapture};

use crate::capture::ECHO_ICU;

mod capture;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Echolot firmware starting...");

    // Default clock tree: 8 MHz HSI, no PLL
    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // Echo capture on TIM3_CH1 (PA6)
    let echo_pin = CapturePin::new_ch1(p.PA6, Pull::None);
    let unit = TimerCapture::new(Timer::new(p.TIM3), echo_pin);
    ECHO_ICU.install(Icu::new(unit));

    let trigger = FlexPin::output(Flex::new(p.PB5));

    let lcd = Hd44780::with_geometry(
        FlexPin::output(Flex::new(p.PB0)),
        FlexPin::output(Flex::new(p.PB1)),
        [
            FlexPin::output(Flex::new(p.PB2)),
            FlexPin::output(Flex::new(p.PB3)),
            FlexPin::output(Flex::new(p.PB4)),
            FlexPin::output(Flex::new(p.PB6)),
        ],
        Delay,
        config::LCD_ROWS,
        config::LCD_COLS,
    );

    let ranger_config = config::ranger_config();
    info!(
        "Ranger: {} Hz, {}, timeout {} us",
        ranger_config.cpu_hz, ranger_config.prescaler, ranger_config.echo_timeout_us
    );

    unwrap!(spawner.spawn(tasks::ranging_task(trigger, lcd, ranger_config)));
}

#[interrupt]
fn TIM3() {
    ECHO_ICU.on_interrupt();
}
