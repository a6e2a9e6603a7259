//! SG90-class servo driver, soft-PWM over a plain GPIO line.
//!
//! Standard hobby-servo signal: one HIGH pulse of 1–2ms per 20ms frame.
//! Frames are bit-banged through [`GpioPort`] with [`spin_us`] timing so
//! every pin write stays behind the port boundary. The servo only holds
//! torque while frames keep arriving, so dwells are rendered as frames at a
//! constant pulse width rather than dead sleeps.
//!
//! Position changes slew in `step_us` increments rather than jumping, which
//! keeps the horn from slamming between extremes.

use crate::app::ports::{ClockPort, GpioError, GpioPort, Level, spin_us};
use crate::config::SystemConfig;

/// Soft-PWM frame period: 50 Hz.
pub const FRAME_US: u64 = 20_000;

/// Frames emitted per slew step (~40ms per step).
const FRAMES_PER_STEP: u32 = 2;

pub struct ServoDriver {
    pin: u8,
    min_us: u32,
    max_us: u32,
    step_us: u32,
    position_us: u32,
}

impl ServoDriver {
    pub fn new(pin: u8, config: &SystemConfig) -> Self {
        Self {
            pin,
            min_us: config.servo_min_us,
            max_us: config.servo_max_us,
            step_us: config.servo_step_us,
            position_us: config.servo_center_us(),
        }
    }

    /// Slew to `target_us` (clamped to the pulse bounds) in `step_us`
    /// increments, emitting frames at each intermediate position.
    pub fn move_to(
        &mut self,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
        target_us: u32,
    ) -> Result<(), GpioError> {
        let target = target_us.clamp(self.min_us, self.max_us);
        while self.position_us != target {
            let remaining = target.abs_diff(self.position_us);
            let step = self.step_us.min(remaining);
            if target > self.position_us {
                self.position_us += step;
            } else {
                self.position_us -= step;
            }
            self.emit_frames(gpio, clock, FRAMES_PER_STEP)?;
        }
        Ok(())
    }

    /// Keep pulsing at the current position for `hold_ms`.
    pub fn hold(
        &self,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
        hold_ms: u64,
    ) -> Result<(), GpioError> {
        let frames = ((hold_ms * 1_000).div_ceil(FRAME_US)).max(1) as u32;
        self.emit_frames(gpio, clock, frames)
    }

    fn emit_frames(
        &self,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
        count: u32,
    ) -> Result<(), GpioError> {
        let pulse = u64::from(self.position_us);
        for _ in 0..count {
            gpio.write(self.pin, Level::High)?;
            spin_us(clock, pulse);
            gpio.write(self.pin, Level::Low)?;
            spin_us(clock, FRAME_US - pulse);
        }
        Ok(())
    }

    /// Current pulse width.
    pub fn position_us(&self) -> u32 {
        self.position_us
    }

    /// Neutral pulse — the safe resting position.
    pub fn center_us(&self) -> u32 {
        (self.min_us + self.max_us) / 2
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }
}
