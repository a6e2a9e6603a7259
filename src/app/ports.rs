//! Port traits — the hexagonal boundary between control logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (the GPIO character device, the monotonic clock, event
//! sinks) implement these traits. The [`ControlLoop`](super::service::ControlLoop)
//! consumes them via generics, so the control logic never touches hardware
//! directly and every test runs against mocks.

use core::fmt;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain ↔ pins)
// ───────────────────────────────────────────────────────────────

/// Logic level of a GPIO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Direction a pin was claimed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    Input,
    Output,
}

/// A pin claimed at startup. Released exactly once, either at normal
/// shutdown or by the shutdown handler; no pin is written to after release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinBinding {
    pub pin: u8,
    pub direction: PinDirection,
}

/// Pin-level access to the GPIO chip.
///
/// The domain never assumes success: every operation except `release`
/// returns a typed error. Implementations must refuse writes and reads on
/// pins that were never claimed or were already released.
pub trait GpioPort {
    /// Claim a pin as an output, driven LOW initially.
    fn claim_output(&mut self, pin: u8) -> Result<(), GpioError>;

    /// Claim a pin as an input.
    fn claim_input(&mut self, pin: u8) -> Result<(), GpioError>;

    /// Drive a claimed output pin to `level`.
    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError>;

    /// Sample a claimed input pin.
    fn read(&mut self, pin: u8) -> Result<Level, GpioError>;

    /// Release a claimed pin. Releasing an unclaimed pin is a no-op.
    fn release(&mut self, pin: u8);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain ↔ monotonic time)
// ───────────────────────────────────────────────────────────────

/// Monotonic microsecond timestamp source, non-wrapping within the process
/// lifetime. The echo-edge timing and all busy-wait deadlines derive from
/// this single source.
pub trait ClockPort {
    fn now_us(&self) -> u64;
}

/// Busy-wait until `duration_us` has elapsed on `clock`.
///
/// Deliberately a bounded spin, not a sleep: the trigger pulse and soft-PWM
/// frames need sub-millisecond precision that a preemptible sleep cannot
/// guarantee.
pub fn spin_us(clock: &impl ClockPort, duration_us: u64) {
    let start = clock.now_us();
    while clock.now_us().saturating_sub(start) < duration_us {}
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (log line, JSON file,
/// test recorder). Sink failures must never abort the control loop.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`GpioPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// The GPIO character device could not be opened.
    Chip,
    /// The pin could not be claimed (in use or out of range).
    PinUnavailable(u8),
    /// Write issued to a pin that is not a claimed output.
    NotAnOutput(u8),
    /// Read issued to a pin that is not a claimed input.
    NotAnInput(u8),
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chip => write!(f, "GPIO chip unavailable"),
            Self::PinUnavailable(pin) => write!(f, "GPIO {pin} unavailable"),
            Self::NotAnOutput(pin) => write!(f, "GPIO {pin} is not a claimed output"),
            Self::NotAnInput(pin) => write!(f, "GPIO {pin} is not a claimed input"),
        }
    }
}

impl std::error::Error for GpioError {}
