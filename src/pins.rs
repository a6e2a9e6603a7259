//! GPIO pin assignments for the proxigate board harness.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.
//!
//! All numbers are BCM (Broadcom) GPIO numbers, not physical header pins.

// ---------------------------------------------------------------------------
// HC-SR04 ultrasonic rangefinder
// ---------------------------------------------------------------------------

/// Digital output: 10µs trigger pulse starts a measurement.
pub const TRIG_GPIO: u8 = 23;
/// Digital input: echo line is HIGH for the round-trip duration.
pub const ECHO_GPIO: u8 = 24;

// ---------------------------------------------------------------------------
// Relay module (dual channel, driven together)
// ---------------------------------------------------------------------------

/// Relay channel 1 coil input (active HIGH).
pub const RELAY_A_GPIO: u8 = 27;
/// Relay channel 2 coil input (active HIGH).
pub const RELAY_B_GPIO: u8 = 22;

// ---------------------------------------------------------------------------
// Servo (SG90 class, 50 Hz soft-PWM)
// ---------------------------------------------------------------------------

/// Servo signal line.
pub const SERVO_GPIO: u8 = 17;
