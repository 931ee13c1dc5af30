//! GPIO for STM32F0
//!
//! Wraps embassy's `Flex` pin so the direction can be switched at runtime,
//! as the trigger line of the ranger expects.

use echolot_hal::gpio::{ConfigurablePin, InputPin, OutputPin, PinDirection};
use embassy_stm32::gpio::{Flex, Pull, Speed};

/// Runtime-configurable GPIO pin
pub struct FlexPin<'d> {
    pin: Flex<'d>,
    direction: PinDirection,
}

impl<'d> FlexPin<'d> {
    /// Wrap a pin, starting as a floating input
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_as_input(Pull::None);
        Self {
            pin,
            direction: PinDirection::Input,
        }
    }

    /// Wrap a pin as a push-pull output driven low
    pub fn output(pin: Flex<'d>) -> Self {
        let mut pin = Self::new(pin);
        pin.set_low();
        pin.set_direction(PinDirection::Output);
        pin
    }
}

impl OutputPin for FlexPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl InputPin for FlexPin<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl ConfigurablePin for FlexPin<'_> {
    fn set_direction(&mut self, direction: PinDirection) {
        match direction {
            PinDirection::Input => self.pin.set_as_input(Pull::None),
            PinDirection::Output => self.pin.set_as_output(Speed::Low),
        }
        self.direction = direction;
    }

    fn direction(&self) -> PinDirection {
        self.direction
    }
}
