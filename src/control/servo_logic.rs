//! Servo-mode control: close-range detection triggers a sweep.
//!
//! A valid sample inside the trigger distance commands a dip to the minimum
//! pulse, a dwell, then a rise back to the maximum pulse (the rest
//! position). The dwell is handed to the caller as part of the command —
//! the controller decides, the loop times.

use super::ActuatorCommand;
use crate::config::SystemConfig;
use crate::error::MeasurementError;
use crate::sensors::ultrasonic::DistanceSample;

/// Sweep controller for the servo actuator.
///
/// Tracks the commanded position (bounded to `[min_us, max_us]`) and the
/// sign of the last move; the driver slews between positions in `step_us`
/// increments.
pub struct ServoController {
    min_us: u32,
    max_us: u32,
    trigger_cm: f64,
    hold_ms: u64,
    position_us: u32,
    direction: i32,
}

impl ServoController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            min_us: config.servo_min_us,
            max_us: config.servo_max_us,
            trigger_cm: config.servo_trigger_cm,
            hold_ms: config.servo_hold_ms,
            // Rest at center until the first detection.
            position_us: config.servo_center_us(),
            direction: 1,
        }
    }

    /// Feed one measurement result; decide whether to sweep.
    ///
    /// Measurement errors never trigger a sweep and never move the tracked
    /// position.
    pub fn update(
        &mut self,
        sample: &Result<DistanceSample, MeasurementError>,
    ) -> ActuatorCommand {
        let Ok(sample) = sample else {
            return ActuatorCommand::Hold;
        };
        if sample.value_cm >= self.trigger_cm {
            return ActuatorCommand::Hold;
        }

        // Sweep ends at the maximum pulse; record the direction of the
        // final move.
        self.direction = if self.max_us >= self.position_us { 1 } else { -1 };
        self.position_us = self.max_us;
        ActuatorCommand::SweepServo {
            dip_us: self.min_us,
            hold_ms: self.hold_ms,
            rest_us: self.max_us,
        }
    }

    /// Last commanded pulse width.
    pub fn position_us(&self) -> u32 {
        self.position_us
    }

    /// Sign of the last commanded move.
    pub fn direction(&self) -> i32 {
        self.direction
    }
}
