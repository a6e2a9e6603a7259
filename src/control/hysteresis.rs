//! Relay-mode hysteresis: debounced threshold switching.
//!
//! Two opposing counters accumulate evidence of the target being beyond or
//! within the threshold distance. Only sustained same-direction evidence
//! flips the relay; a single noisy, out-of-range, or failed reading changes
//! nothing.
//!
//! Invariant: at most one of the two counters is non-zero at any time —
//! observing one direction zeroes the other.
//!
//! The counters are not reset after a flip; they saturate. Once past the
//! debounce count, continued presence on the same side keeps re-confirming
//! the state, and the command stream collapses those re-confirms to `Hold`.

use log::debug;

use super::{ActuatorCommand, RelayState};
use crate::config::SystemConfig;
use crate::error::MeasurementError;
use crate::sensors::ultrasonic::DistanceSample;

/// Debounced binary controller for the relay actuator.
pub struct RelayController {
    min_valid_cm: f64,
    max_valid_cm: f64,
    threshold_cm: f64,
    debounce_count: u32,
    toward_far: u32,
    toward_near: u32,
    state: RelayState,
}

impl RelayController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            min_valid_cm: config.min_valid_cm,
            max_valid_cm: config.max_valid_cm,
            threshold_cm: config.threshold_cm,
            debounce_count: config.debounce_count,
            toward_far: 0,
            toward_near: 0,
            state: RelayState::Disengaged,
        }
    }

    /// Feed one measurement result; decide whether the relay flips.
    ///
    /// Implausible readings and measurement errors are no-ops: they do not
    /// count as opposing evidence, and the counters keep their progress.
    pub fn update(
        &mut self,
        sample: &Result<DistanceSample, MeasurementError>,
    ) -> ActuatorCommand {
        let Ok(sample) = sample else {
            return ActuatorCommand::Hold;
        };
        let distance = sample.value_cm;
        if distance < self.min_valid_cm || distance > self.max_valid_cm {
            debug!("ignoring implausible reading: {distance:.1}cm");
            return ActuatorCommand::Hold;
        }

        if distance > self.threshold_cm {
            self.toward_far = self.toward_far.saturating_add(1);
            self.toward_near = 0;
            if self.toward_far > self.debounce_count && self.state == RelayState::Disengaged {
                self.state = RelayState::Engaged;
                return ActuatorCommand::Engage;
            }
        } else {
            self.toward_near = self.toward_near.saturating_add(1);
            self.toward_far = 0;
            if self.toward_near > self.debounce_count && self.state == RelayState::Engaged {
                self.state = RelayState::Disengaged;
                return ActuatorCommand::Disengage;
            }
        }

        ActuatorCommand::Hold
    }

    /// Current relay state as decided by the hysteresis.
    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Debounce counters `(toward_near, toward_far)`.
    pub fn counters(&self) -> (u32, u32) {
        (self.toward_near, self.toward_far)
    }
}
