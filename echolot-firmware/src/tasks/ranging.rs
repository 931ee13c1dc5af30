//! Ranging task
//!
//! Measures once per cycle and shows the result on the LCD:
//! - Re-arms the ranger before every measurement
//! - Shows `---` when no echo came back
//! - Keeps measuring after display errors

use defmt::*;
use embassy_time::{Delay, Duration, Ticker};

use echolot_core::config::RangerConfig;
use echolot_core::readout::DistanceReadout;
use echolot_drivers::{Hd44780, Ultrasonic};
use echolot_hal_stm32f0::{EmbassyClock, FlexPin};

use crate::capture::{ECHO_ICU, ECHO_SESSION};

/// LCD on the board's GPIO bus
pub type Lcd = Hd44780<FlexPin<'static>, Delay>;

#[embassy_executor::task]
pub async fn ranging_task(trigger: FlexPin<'static>, mut lcd: Lcd, config: RangerConfig) {
    info!("Ranging task started");

    if let Err(e) = lcd.init() {
        error!("LCD init failed: {}", e);
    }

    let mut ranger = match Ultrasonic::new(
        &ECHO_SESSION,
        &ECHO_ICU,
        trigger,
        Delay,
        EmbassyClock,
        config,
    ) {
        Ok(ranger) => ranger,
        Err(e) => {
            error!("Invalid ranger config: {}", e);
            return;
        }
    };

    let mut readout = DistanceReadout::new();
    let mut ticker = Ticker::every(Duration::from_millis(config.cycle_ms as u64));

    loop {
        // Blocks for at most the echo deadline
        let reading = ranger.measure();
        match reading {
            Ok(cm) => debug!("Distance: {} cm", cm),
            Err(e) => warn!("Measurement failed: {}", e),
        }

        if let Err(e) = readout.render(&mut lcd, reading) {
            warn!("Display update failed: {}", e);
            readout.invalidate();
        }

        ticker.next().await;
    }
}
