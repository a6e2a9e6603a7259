//! Raspberry Pi GPIO adapter over the `rppal` crate.
//!
//! The only module in the system that touches real hardware. Claimed pins
//! are held in maps keyed by BCM number; `release` drops the handle, which
//! resets the line to an input (rppal's reset-on-drop). A write or read on
//! a pin that was never claimed — or was already released — is a typed
//! error, which is what enforces the no-write-after-release invariant.

use std::collections::HashMap;

use rppal::gpio::{Gpio, InputPin, OutputPin};

use crate::app::ports::{GpioError, GpioPort, Level};

pub struct RppalGpio {
    chip: Gpio,
    outputs: HashMap<u8, OutputPin>,
    inputs: HashMap<u8, InputPin>,
}

impl RppalGpio {
    /// Open the GPIO character device.
    pub fn new() -> Result<Self, GpioError> {
        let chip = Gpio::new().map_err(|_| GpioError::Chip)?;
        Ok(Self {
            chip,
            outputs: HashMap::new(),
            inputs: HashMap::new(),
        })
    }
}

impl GpioPort for RppalGpio {
    fn claim_output(&mut self, pin: u8) -> Result<(), GpioError> {
        let handle = self
            .chip
            .get(pin)
            .map_err(|_| GpioError::PinUnavailable(pin))?
            .into_output_low();
        self.outputs.insert(pin, handle);
        Ok(())
    }

    fn claim_input(&mut self, pin: u8) -> Result<(), GpioError> {
        let handle = self
            .chip
            .get(pin)
            .map_err(|_| GpioError::PinUnavailable(pin))?
            .into_input();
        self.inputs.insert(pin, handle);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        let handle = self
            .outputs
            .get_mut(&pin)
            .ok_or(GpioError::NotAnOutput(pin))?;
        match level {
            Level::High => handle.set_high(),
            Level::Low => handle.set_low(),
        }
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<Level, GpioError> {
        let handle = self.inputs.get(&pin).ok_or(GpioError::NotAnInput(pin))?;
        if handle.is_high() {
            Ok(Level::High)
        } else {
            Ok(Level::Low)
        }
    }

    fn release(&mut self, pin: u8) {
        // Dropping the handle resets the line to an input.
        self.outputs.remove(&pin);
        self.inputs.remove(&pin);
    }
}
