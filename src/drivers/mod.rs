//! Actuator drivers.
//!
//! Dumb actuators: no decision logic here. Every pin access goes through
//! [`GpioPort`](crate::app::ports::GpioPort), so the drivers are exercised
//! by host-side tests against mock hardware.

pub mod relay;
pub mod servo;

use log::warn;

use crate::app::ports::{ClockPort, GpioPort};
use crate::control::{ActuatorCommand, ActuatorState};
use crate::error::ActuatorError;
use relay::RelayDriver;
use servo::ServoDriver;

/// The one actuator of this run, selected at startup.
pub enum Actuator {
    Relay(RelayDriver),
    Servo(ServoDriver),
}

impl Actuator {
    /// Apply a controller command. Returns the new actuator state when the
    /// actuator actually moved, `None` for `Hold`.
    pub fn apply(
        &mut self,
        command: ActuatorCommand,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
    ) -> Result<Option<ActuatorState>, ActuatorError> {
        match (self, command) {
            (_, ActuatorCommand::Hold) => Ok(None),
            (Self::Relay(relay), ActuatorCommand::Engage) => {
                relay.engage(gpio)?;
                Ok(Some(ActuatorState::Relay(relay.state())))
            }
            (Self::Relay(relay), ActuatorCommand::Disengage) => {
                relay.disengage(gpio)?;
                Ok(Some(ActuatorState::Relay(relay.state())))
            }
            (
                Self::Servo(servo),
                ActuatorCommand::SweepServo {
                    dip_us,
                    hold_ms,
                    rest_us,
                },
            ) => {
                servo.move_to(gpio, clock, dip_us)?;
                servo.hold(gpio, clock, hold_ms)?;
                servo.move_to(gpio, clock, rest_us)?;
                Ok(Some(ActuatorState::Servo {
                    position_us: servo.position_us(),
                }))
            }
            (_, command) => {
                // Controller and driver are constructed as a pair; a
                // mismatched command indicates a wiring bug, not a runtime
                // condition worth crashing over.
                warn!("command {command:?} does not match the installed actuator");
                Ok(None)
            }
        }
    }

    /// Drive the actuator to its safe resting state: relay off, servo
    /// centered.
    pub fn safe_rest(
        &mut self,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
    ) -> Result<ActuatorState, ActuatorError> {
        match self {
            Self::Relay(relay) => {
                relay.disengage(gpio)?;
                Ok(ActuatorState::Relay(relay.state()))
            }
            Self::Servo(servo) => {
                let center = servo.center_us();
                servo.move_to(gpio, clock, center)?;
                Ok(ActuatorState::Servo {
                    position_us: servo.position_us(),
                })
            }
        }
    }
}
