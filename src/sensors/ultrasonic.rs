//! HC-SR04 ultrasonic rangefinder driver.
//!
//! Trigger-then-listen: a 10µs pulse on the trigger pin makes the module
//! emit an ultrasonic burst; the echo pin then goes HIGH for the round-trip
//! travel time of the sound. Distance follows from the speed of sound.
//!
//! Edge waits are bounded polling loops with an explicit deadline check
//! every iteration — a sensor that never answers costs at most one timeout
//! window, never an unbounded spin. Sub-millisecond precision requires
//! busy-waiting; the loop owns the sampling cadence and accepts the block.

use crate::app::ports::{ClockPort, GpioPort, Level, spin_us};
use crate::config::SystemConfig;
use crate::error::MeasurementError;

/// Speed of sound: 34300 cm/s = 0.034 cm/µs.
pub const SOUND_SPEED_CM_PER_US: f64 = 0.034;

/// One successful measurement. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSample {
    /// Measured distance in centimeters.
    pub value_cm: f64,
    /// Monotonic timestamp of the echo's falling edge.
    pub timestamp_us: u64,
}

/// Pulse-timed distance sensor over a trigger/echo pin pair.
///
/// Stateless across invocations — the caller owns the sampling cadence.
pub struct UltrasonicSensor {
    trig: u8,
    echo: u8,
    settle_us: u64,
    pulse_us: u64,
    timeout_us: u64,
}

impl UltrasonicSensor {
    pub fn new(trig: u8, echo: u8, config: &SystemConfig) -> Self {
        Self {
            trig,
            echo,
            settle_us: config.trigger_settle_us,
            pulse_us: config.trigger_pulse_us,
            timeout_us: config.echo_timeout_us,
        }
    }

    /// Run one full trigger/echo cycle and convert the echo duration to
    /// centimeters.
    ///
    /// Timeouts are environmental and recoverable; any GPIO failure maps to
    /// [`MeasurementError::HardwareFault`], which the loop treats as fatal.
    pub fn measure(
        &self,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
    ) -> Result<DistanceSample, MeasurementError> {
        self.trigger_pulse(gpio, clock)?;

        let start_us = self.wait_for_edge(
            gpio,
            clock,
            Level::High,
            MeasurementError::EchoStartTimeout,
        )?;
        let end_us = self.wait_for_edge(
            gpio,
            clock,
            Level::Low,
            MeasurementError::EchoEndTimeout,
        )?;

        let duration_us = end_us.saturating_sub(start_us);
        Ok(DistanceSample {
            // Divide by two: the duration covers the round trip.
            value_cm: duration_us as f64 * SOUND_SPEED_CM_PER_US / 2.0,
            timestamp_us: end_us,
        })
    }

    /// Emit the trigger sequence: LOW settle, 10µs HIGH pulse, LOW.
    fn trigger_pulse(
        &self,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
    ) -> Result<(), MeasurementError> {
        gpio.write(self.trig, Level::Low)
            .map_err(|_| MeasurementError::HardwareFault)?;
        spin_us(clock, self.settle_us);
        gpio.write(self.trig, Level::High)
            .map_err(|_| MeasurementError::HardwareFault)?;
        spin_us(clock, self.pulse_us);
        gpio.write(self.trig, Level::Low)
            .map_err(|_| MeasurementError::HardwareFault)
    }

    /// Poll the echo pin until it reads `target`, returning the timestamp of
    /// the observing poll. Each edge wait gets a fresh timeout window.
    fn wait_for_edge(
        &self,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
        target: Level,
        on_timeout: MeasurementError,
    ) -> Result<u64, MeasurementError> {
        let origin = clock.now_us();
        loop {
            let now = clock.now_us();
            let level = gpio
                .read(self.echo)
                .map_err(|_| MeasurementError::HardwareFault)?;
            if level == target {
                return Ok(now);
            }
            if now.saturating_sub(origin) > self.timeout_us {
                return Err(on_timeout);
            }
        }
    }
}
