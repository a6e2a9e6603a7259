//! Actuator decision logic.
//!
//! The controllers are pure state machines: they consume measurement
//! results and emit [`ActuatorCommand`]s. They never touch GPIO — the
//! control loop applies commands through the drivers. Measurement errors
//! never advance counters and never change actuator state: transient echo
//! misses are expected in this sensing modality.

pub mod hysteresis;
pub mod servo_logic;

use core::fmt;

use crate::config::SystemConfig;
use crate::error::MeasurementError;
use crate::sensors::ultrasonic::DistanceSample;
use hysteresis::RelayController;
use servo_logic::ServoController;

// ---------------------------------------------------------------------------
// Actuator state
// ---------------------------------------------------------------------------

/// Relay coil state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Engaged,
    Disengaged,
}

/// Current actuator position/state, as reported in diagnostics events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorState {
    Relay(RelayState),
    Servo { position_us: u32 },
}

impl fmt::Display for ActuatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relay(RelayState::Engaged) => write!(f, "relay engaged"),
            Self::Relay(RelayState::Disengaged) => write!(f, "relay disengaged"),
            Self::Servo { position_us } => write!(f, "servo at {position_us}µs"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator command
// ---------------------------------------------------------------------------

/// One decision per sample. `Hold` means no pin write this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    /// Keep the actuator where it is.
    Hold,
    /// Switch the relay on.
    Engage,
    /// Switch the relay off.
    Disengage,
    /// Dip the servo to `dip_us`, dwell `hold_ms`, then rise to `rest_us`.
    /// The dwell is a caller-visible delay request — the controller does
    /// not own timing.
    SweepServo {
        dip_us: u32,
        hold_ms: u64,
        rest_us: u32,
    },
}

// ---------------------------------------------------------------------------
// Mode dispatch
// ---------------------------------------------------------------------------

/// Hysteresis state machine over distance samples. The operating mode is
/// fixed at construction; [`update`](Self::update) is the only mutation
/// path for actuator state.
pub enum ActuatorController {
    Relay(RelayController),
    Servo(ServoController),
}

impl ActuatorController {
    /// Relay (binary) mode from configuration.
    pub fn relay(config: &SystemConfig) -> Self {
        Self::Relay(RelayController::new(config))
    }

    /// Servo (sweep) mode from configuration.
    pub fn servo(config: &SystemConfig) -> Self {
        Self::Servo(ServoController::new(config))
    }

    /// Consume one measurement result and decide the actuator command.
    pub fn update(
        &mut self,
        sample: &Result<DistanceSample, MeasurementError>,
    ) -> ActuatorCommand {
        match self {
            Self::Relay(c) => c.update(sample),
            Self::Servo(c) => c.update(sample),
        }
    }

    /// Current actuator state, for diagnostics.
    pub fn state(&self) -> ActuatorState {
        match self {
            Self::Relay(c) => ActuatorState::Relay(c.state()),
            Self::Servo(c) => ActuatorState::Servo {
                position_us: c.position_us(),
            },
        }
    }
}
