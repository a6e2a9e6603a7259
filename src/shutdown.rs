//! Cooperative shutdown: signal → flag → teardown.
//!
//! The asynchronous side of termination is reduced to a single atomic flag.
//! A signal callback (or the fault path) sets it; the control loop observes
//! it once per iteration and stops issuing writes before teardown begins,
//! so the loop and the teardown sequence never touch a pin concurrently.
//!
//! Teardown itself is single-shot: a second invocation is a no-op, which
//! makes a repeated termination request harmless — the actuator is written
//! once and every pin is released exactly once.

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{error, info};

use crate::app::events::AppEvent;
use crate::app::ports::{ClockPort, EventSink, GpioPort, PinBinding};
use crate::config::SystemConfig;
use crate::drivers::Actuator;

// ---------------------------------------------------------------------------
// Shutdown reason
// ---------------------------------------------------------------------------

/// Why the loop stopped. Carried into the final diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// A termination signal was received.
    Signal,
    /// The sensor reported a GPIO hardware fault.
    HardwareFault,
    /// An actuator write failed.
    ActuatorFault,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal => write!(f, "termination signal"),
            Self::HardwareFault => write!(f, "sensor hardware fault"),
            Self::ActuatorFault => write!(f, "actuator fault"),
        }
    }
}

// ---------------------------------------------------------------------------
// Shutdown flag
// ---------------------------------------------------------------------------

/// Single-shot termination request, shared between the signal callback and
/// the control loop. The callback only stores — all teardown work happens
/// on the main thread.
#[derive(Clone)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Request termination. Safe to call from a signal callback; calling
    /// again is harmless.
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for ShutdownFlag {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Teardown
// ---------------------------------------------------------------------------

/// Drives the actuator to its safe resting state and releases every claimed
/// pin exactly once.
pub struct ShutdownHandler {
    settle_ms: u64,
    fired: AtomicBool,
}

impl ShutdownHandler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            settle_ms: config.shutdown_settle_ms,
            fired: AtomicBool::new(false),
        }
    }

    /// Run the teardown sequence. Idempotent: only the first call acts.
    ///
    /// A failing safe-state write is reported but does not stop the pin
    /// release — an unreachable actuator must not leak GPIO lines.
    pub fn teardown(
        &self,
        gpio: &mut impl GpioPort,
        clock: &impl ClockPort,
        actuator: &mut Actuator,
        bindings: &[PinBinding],
        sink: &mut impl EventSink,
        reason: ShutdownReason,
    ) {
        if self.fired.swap(true, Ordering::SeqCst) {
            return;
        }

        info!("shutdown ({reason}): driving actuator to safe rest");
        match actuator.safe_rest(gpio, clock) {
            Ok(state) => sink.emit(&AppEvent::ActuatorChanged(state)),
            Err(e) => error!("safe-state write failed during teardown: {e}"),
        }

        // Let the physical actuator finish moving before power state becomes
        // undefined.
        if self.settle_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(self.settle_ms));
        }

        for binding in bindings {
            gpio.release(binding.pin);
        }
        info!("released {} GPIO lines", bindings.len());

        sink.emit(&AppEvent::ShutdownComplete { reason });
    }

    /// Whether teardown has already run.
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}
