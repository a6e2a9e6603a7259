//! Unified error types for the proxigate controller.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! control loop's error handling uniform. All variants are `Copy` so they can
//! be cheaply passed through the loop and the shutdown path without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A distance measurement failed.
    Sensor(MeasurementError),
    /// An actuator command failed.
    Actuator(ActuatorError),
    /// Startup resource acquisition failed.
    Setup(SetupError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Setup(e) => write!(f, "setup: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Measurement errors
// ---------------------------------------------------------------------------

/// Outcome classification for a failed echo measurement.
///
/// Timeouts are environmental (no echo returned in time) and recoverable;
/// `HardwareFault` means the GPIO layer itself failed and the device is no
/// longer controllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementError {
    /// The echo pin never rose within the timeout window.
    EchoStartTimeout,
    /// The echo pin rose but never fell within the timeout window.
    EchoEndTimeout,
    /// An underlying GPIO read/write failed.
    HardwareFault,
}

impl MeasurementError {
    /// True if the loop must stop sampling and shut down.
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::HardwareFault)
    }
}

impl fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EchoStartTimeout => write!(f, "timeout waiting for echo start"),
            Self::EchoEndTimeout => write!(f, "timeout waiting for echo end"),
            Self::HardwareFault => write!(f, "GPIO hardware fault"),
        }
    }
}

impl From<MeasurementError> for Error {
    fn from(e: MeasurementError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed while applying a command.
    GpioWriteFailed,
    /// The actuator's pins were already released.
    PinReleased,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::PinReleased => write!(f, "pin already released"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

impl From<crate::app::ports::GpioError> for ActuatorError {
    fn from(e: crate::app::ports::GpioError) -> Self {
        use crate::app::ports::GpioError;
        match e {
            GpioError::NotAnOutput(_) | GpioError::NotAnInput(_) => Self::PinReleased,
            GpioError::Chip | GpioError::PinUnavailable(_) => Self::GpioWriteFailed,
        }
    }
}

// ---------------------------------------------------------------------------
// Setup errors
// ---------------------------------------------------------------------------

/// Fatal at startup: the actuator can only be commanded through
/// successfully-claimed pins, so there is nothing to fall back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// A GPIO line could not be claimed.
    PinClaimFailed(u8),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinClaimFailed(pin) => write!(f, "failed to claim GPIO {pin}"),
        }
    }
}

impl From<SetupError> for Error {
    fn from(e: SetupError) -> Self {
        Self::Setup(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
