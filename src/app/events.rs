//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — log to the console, write the distance
//! file, record in tests.
//!
//! Exactly one event is emitted per measurement attempt, and exactly one per
//! actuator state change.

use crate::control::ActuatorState;
use crate::error::MeasurementError;
use crate::sensors::ultrasonic::DistanceSample;
use crate::shutdown::ShutdownReason;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The control loop has started sampling.
    Started,

    /// A measurement succeeded.
    Measured(DistanceSample),

    /// A measurement failed (timeout or hardware fault).
    MeasurementFailed(MeasurementError),

    /// The actuator moved to a new state.
    ActuatorChanged(ActuatorState),

    /// Teardown finished: actuator at rest, all pins released.
    ShutdownComplete { reason: ShutdownReason },
}
