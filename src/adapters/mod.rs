//! Driven adapters — implementations of the port traits.
//!
//! Everything that touches the outside world (the GPIO chip, the monotonic
//! clock, the log, the distance file) lives here, behind the traits in
//! [`crate::app::ports`].

pub mod clock;
pub mod file_sink;
pub mod log_sink;

#[cfg(feature = "rpi")]
pub mod hardware;
