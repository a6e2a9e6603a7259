//! Sensor subsystem.
//!
//! One sensor per run: the HC-SR04 ultrasonic rangefinder. Its driver talks
//! to hardware exclusively through the [`GpioPort`](crate::app::ports::GpioPort)
//! and [`ClockPort`](crate::app::ports::ClockPort) traits, so the full pulse
//! protocol is exercised by host-side tests against mocks.

pub mod ultrasonic;
