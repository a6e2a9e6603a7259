//! Dual-channel relay driver.
//!
//! Both coil inputs are driven together — the two channels switch the same
//! load side-by-side. Active HIGH.

use crate::app::ports::{GpioError, GpioPort, Level};
use crate::control::RelayState;

pub struct RelayDriver {
    pin_a: u8,
    pin_b: u8,
    state: RelayState,
}

impl RelayDriver {
    pub fn new(pin_a: u8, pin_b: u8) -> Self {
        Self {
            pin_a,
            pin_b,
            state: RelayState::Disengaged,
        }
    }

    /// Energise both coils.
    pub fn engage(&mut self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        gpio.write(self.pin_a, Level::High)?;
        gpio.write(self.pin_b, Level::High)?;
        self.state = RelayState::Engaged;
        Ok(())
    }

    /// De-energise both coils — the safe resting state.
    pub fn disengage(&mut self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        gpio.write(self.pin_a, Level::Low)?;
        gpio.write(self.pin_b, Level::Low)?;
        self.state = RelayState::Disengaged;
        Ok(())
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn pins(&self) -> [u8; 2] {
        [self.pin_a, self.pin_b]
    }
}
