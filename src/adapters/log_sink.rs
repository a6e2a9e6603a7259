//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! `log` facade (stderr via env_logger in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | sampling");
            }
            AppEvent::Measured(sample) => {
                info!("DIST  | {:.2} cm", sample.value_cm);
            }
            AppEvent::MeasurementFailed(e) => {
                warn!("MEAS  | {e}");
            }
            AppEvent::ActuatorChanged(state) => {
                info!("ACT   | {state}");
            }
            AppEvent::ShutdownComplete { reason } => {
                info!("STOP  | {reason}");
            }
        }
    }
}
