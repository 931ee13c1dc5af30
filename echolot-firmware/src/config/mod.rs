//! Board configuration
//!
//! Reference board: STM32F042K6 running from the 8 MHz HSI.
//!
//! | Signal        | Pin  | Peripheral |
//! |---------------|------|------------|
//! | Echo          | PA6  | TIM3_CH1   |
//! | Trigger       | PB5  | GPIO out   |
//! | LCD RS        | PB0  | GPIO out   |
//! | LCD EN        | PB1  | GPIO out   |
//! | LCD D4-D7     | PB2, PB3, PB4, PB6 | GPIO out |

use echolot_core::config::RangerConfig;
use echolot_hal::capture::Prescaler;

/// Timer kernel clock (HSI, no PLL)
pub const TIMER_CLOCK_HZ: u32 = 8_000_000;

/// LCD panel rows
pub const LCD_ROWS: u8 = 2;

/// LCD panel columns
pub const LCD_COLS: u8 = 16;

/// Ranging configuration for this board
pub fn ranger_config() -> RangerConfig {
    RangerConfig {
        cpu_hz: TIMER_CLOCK_HZ,
        prescaler: Prescaler::Div8,
        echo_timeout_us: Some(50_000),
        cycle_ms: 60,
        ..Default::default()
    }
}
