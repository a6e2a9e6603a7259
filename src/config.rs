//! System configuration parameters
//!
//! All tunable parameters for the proxigate controller. Defaults match the
//! deployed board harness; a JSON file at [`CONFIG_PATH`] can override them
//! at startup. Timing constants are injected into the sensor and controllers
//! at construction so tests can shorten them.

use serde::{Deserialize, Serialize};

/// Default location of the optional configuration override file.
pub const CONFIG_PATH: &str = "/etc/proxigate.json";

/// Which actuator variant this run drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuatorKind {
    /// Dual-channel relay, switched with hysteresis around a threshold.
    Relay,
    /// SG90-class servo, swept on close-range detection.
    Servo,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Actuator variant for this run.
    pub actuator: ActuatorKind,

    // --- Sensor timing (µs) ---
    /// Settle time with the trigger held LOW before the pulse.
    pub trigger_settle_us: u64,
    /// Trigger pulse width.
    pub trigger_pulse_us: u64,
    /// Deadline for each echo edge wait.
    pub echo_timeout_us: u64,

    // --- Sampling ---
    /// Pause between measure→decide→actuate cycles (milliseconds).
    pub sample_interval_ms: u64,

    // --- Relay hysteresis ---
    /// Lower bound of the plausible sensor range (cm).
    pub min_valid_cm: f64,
    /// Upper bound of the plausible sensor range (cm).
    pub max_valid_cm: f64,
    /// Distance at which the relay flips (cm).
    pub threshold_cm: f64,
    /// Consecutive same-direction samples required before flipping.
    pub debounce_count: u32,

    // --- Servo ---
    /// Shortest servo pulse (µs) — the dip position of a sweep.
    pub servo_min_us: u32,
    /// Longest servo pulse (µs) — the rest position after a sweep.
    pub servo_max_us: u32,
    /// Slew increment between positions (µs per step).
    pub servo_step_us: u32,
    /// Distance below which a sweep is triggered (cm).
    pub servo_trigger_cm: f64,
    /// Dwell at the dip position before rising (milliseconds).
    pub servo_hold_ms: u64,

    // --- Shutdown ---
    /// Wait for the physical actuator to settle before releasing pins (ms).
    pub shutdown_settle_ms: u64,

    // --- Diagnostics ---
    /// Path of the last-reading JSON file; `None` disables the file sink.
    pub distance_file: Option<String>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            actuator: ActuatorKind::Relay,

            // Sensor timing
            trigger_settle_us: 2,
            trigger_pulse_us: 10,
            echo_timeout_us: 100_000,

            // Sampling
            sample_interval_ms: 500,

            // Relay hysteresis
            min_valid_cm: 2.0,
            max_valid_cm: 350.0,
            threshold_cm: 70.0,
            debounce_count: 5,

            // Servo
            servo_min_us: 1300,
            servo_max_us: 1700,
            servo_step_us: 100,
            servo_trigger_cm: 30.0,
            servo_hold_ms: 300,

            // Shutdown
            shutdown_settle_ms: 500,

            // Diagnostics
            distance_file: Some("distance".to_owned()),
        }
    }
}

impl SystemConfig {
    /// Neutral servo pulse — the safe resting position.
    pub fn servo_center_us(&self) -> u32 {
        (self.servo_min_us + self.servo_max_us) / 2
    }

    /// Load configuration from a JSON file, falling back to defaults if the
    /// file is absent or unreadable. A malformed file is reported but never
    /// fatal — the board must still come up.
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(cfg) => {
                    log::info!("Config loaded from {path}");
                    cfg
                }
                Err(e) => {
                    log::warn!("Config file {path} is malformed ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file at {path}, using defaults");
                Self::default()
            }
        }
    }
}
