//! Last-reading file sink.
//!
//! External consumers (a dashboard script, a cron job) poll a small JSON
//! file for the most recent distance:
//!
//! ```text
//! {"distance":"62.41"}
//! ```
//!
//! The file is rewritten on every successful measurement. Write failures
//! are logged and swallowed — diagnostics must never abort the control
//! loop.

use std::path::PathBuf;

use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::sensors::ultrasonic::DistanceSample;

/// Writes the latest reading to a JSON file; disabled when no path is
/// configured.
pub struct DistanceFileSink {
    path: Option<PathBuf>,
    write_failures: u64,
}

impl DistanceFileSink {
    pub fn new(path: Option<String>) -> Self {
        Self {
            path: path.map(PathBuf::from),
            write_failures: 0,
        }
    }

    /// Number of swallowed write failures, for tests and the final log.
    pub fn write_failures(&self) -> u64 {
        self.write_failures
    }

    fn write_reading(&self, sample: &DistanceSample) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::json!({ "distance": format!("{:.2}", sample.value_cm) });
        std::fs::write(path, format!("{json}\n"))
    }
}

impl EventSink for DistanceFileSink {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::Measured(sample) = event {
            if let Err(e) = self.write_reading(sample) {
                self.write_failures += 1;
                warn!("distance file write failed: {e}");
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Composite
// ───────────────────────────────────────────────────────────────

/// Fans every event out to two sinks (log line + distance file in
/// production).
pub struct CompositeSink<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: EventSink, B: EventSink> CompositeSink<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: EventSink, B: EventSink> EventSink for CompositeSink<A, B> {
    fn emit(&mut self, event: &AppEvent) {
        self.first.emit(event);
        self.second.emit(event);
    }
}
