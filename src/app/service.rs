//! Control loop service — the hexagonal core.
//!
//! [`ControlLoop`] owns the sensor, the hysteresis controller, and the
//! actuator driver, and orchestrates one full
//! measure → decide → actuate cycle per tick. All I/O flows through port
//! traits injected at call sites, making the entire loop testable with mock
//! adapters.
//!
//! ```text
//!  GpioPort/ClockPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                         │          ControlLoop          │
//!         GpioPort ◀──────│  sensor · hysteresis · driver │
//!                         └──────────────────────────────┘
//! ```

use core::fmt;
use std::time::Duration;

use heapless::HistoryBuffer;
use log::{error, info};

use super::events::AppEvent;
use super::ports::{ClockPort, EventSink, GpioPort};
use crate::config::SystemConfig;
use crate::control::ActuatorController;
use crate::drivers::Actuator;
use crate::sensors::ultrasonic::UltrasonicSensor;
use crate::shutdown::{ShutdownFlag, ShutdownReason};

/// Recent successful readings kept for the shutdown summary.
const HISTORY_DEPTH: usize = 16;

// ───────────────────────────────────────────────────────────────
// Loop lifecycle
// ───────────────────────────────────────────────────────────────

/// Lifecycle of the control loop. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    ShuttingDown(ShutdownReason),
    Stopped,
}

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

/// Orchestrates periodic sampling and actuation.
pub struct ControlLoop {
    sensor: UltrasonicSensor,
    controller: ActuatorController,
    actuator: Actuator,
    interval: Duration,
    state: LoopState,
    history: HistoryBuffer<f64, HISTORY_DEPTH>,
    samples_ok: u64,
    tick_count: u64,
}

impl ControlLoop {
    pub fn new(
        config: &SystemConfig,
        sensor: UltrasonicSensor,
        controller: ActuatorController,
        actuator: Actuator,
    ) -> Self {
        Self {
            sensor,
            controller,
            actuator,
            interval: Duration::from_millis(config.sample_interval_ms),
            state: LoopState::Running,
            history: HistoryBuffer::new(),
            samples_ok: 0,
            tick_count: 0,
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: measure → decide → actuate.
    ///
    /// Exactly one diagnostic event is emitted per measurement attempt, and
    /// one more per actuator state change. A sensor hardware fault or a
    /// failed actuator write moves the loop to `ShuttingDown` — neither is
    /// retried, because both mean the device is no longer controllable.
    pub fn tick(
        &mut self,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        let result = self.sensor.measure(gpio, clock);
        match &result {
            Ok(sample) => {
                self.samples_ok += 1;
                self.history.write(sample.value_cm);
                sink.emit(&AppEvent::Measured(*sample));
            }
            Err(e) => {
                sink.emit(&AppEvent::MeasurementFailed(*e));
                if e.is_fatal() {
                    error!("sensor hardware fault — entering shutdown");
                    self.state = LoopState::ShuttingDown(ShutdownReason::HardwareFault);
                    return;
                }
            }
        }

        let command = self.controller.update(&result);
        match self.actuator.apply(command, gpio, clock) {
            Ok(Some(state)) => sink.emit(&AppEvent::ActuatorChanged(state)),
            Ok(None) => {}
            Err(e) => {
                error!("actuator write failed ({e}) — entering shutdown");
                self.state = LoopState::ShuttingDown(ShutdownReason::ActuatorFault);
            }
        }
    }

    // ── Run loop ──────────────────────────────────────────────

    /// Repeat ticks at the configured period until a shutdown request or a
    /// fatal fault. Returns why the loop stopped; the caller owns teardown.
    ///
    /// The shutdown flag is observed once per iteration, before the next
    /// measurement — an in-flight measurement completes (or times out)
    /// first, which bounds shutdown latency by the echo timeout.
    pub fn run(
        &mut self,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
        shutdown: &ShutdownFlag,
    ) -> ShutdownReason {
        sink.emit(&AppEvent::Started);
        info!(
            "control loop running ({}ms period)",
            self.interval.as_millis()
        );

        loop {
            if shutdown.is_requested() && self.state == LoopState::Running {
                self.state = LoopState::ShuttingDown(ShutdownReason::Signal);
            }
            if let LoopState::ShuttingDown(reason) = self.state {
                self.state = LoopState::Stopped;
                return reason;
            }

            self.tick(gpio, clock, sink);

            if !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Total cycles executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The actuator driver, for the teardown path.
    pub fn actuator_mut(&mut self) -> &mut Actuator {
        &mut self.actuator
    }

    /// Summarise the run for the final log line.
    pub fn summary(&self) -> RunSummary {
        let mut min_cm: Option<f64> = None;
        let mut max_cm: Option<f64> = None;
        for &v in self.history.oldest_ordered() {
            min_cm = Some(min_cm.map_or(v, |m| m.min(v)));
            max_cm = Some(max_cm.map_or(v, |m| m.max(v)));
        }
        RunSummary {
            samples_ok: self.samples_ok,
            ticks: self.tick_count,
            last_cm: self.history.recent().copied(),
            min_cm,
            max_cm,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Run summary
// ───────────────────────────────────────────────────────────────

/// End-of-run statistics (recent window only for min/max).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub samples_ok: u64,
    pub ticks: u64,
    pub last_cm: Option<f64>,
    pub min_cm: Option<f64>,
    pub max_cm: Option<f64>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples over {} ticks",
            self.samples_ok, self.ticks
        )?;
        if let (Some(last), Some(min), Some(max)) = (self.last_cm, self.min_cm, self.max_cm) {
            write!(
                f,
                ", recent last/min/max {last:.1}/{min:.1}/{max:.1} cm"
            )?;
        }
        Ok(())
    }
}
