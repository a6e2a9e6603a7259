//! Mock hardware adapters for integration tests.
//!
//! The clock and the GPIO share one simulated microsecond counter; every
//! `now_us()` call advances it by 1µs, so the sensor's polling loops make
//! progress and echo edges land on exact instants.
//!
//! The GPIO mock scripts one echo behaviour per measurement: it watches for
//! the trigger pulse's falling edge and arms the next script from the
//! queue. Every write and release is recorded so tests can assert on the
//! full pin history.

use std::cell::Cell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use proxigate::app::events::AppEvent;
use proxigate::app::ports::{ClockPort, EventSink, GpioError, GpioPort, Level};

// ── Clock ─────────────────────────────────────────────────────

pub struct MockClock {
    t: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new() -> (Self, Rc<Cell<u64>>) {
        let t = Rc::new(Cell::new(0));
        (Self { t: Rc::clone(&t) }, t)
    }
}

impl ClockPort for MockClock {
    fn now_us(&self) -> u64 {
        let t = self.t.get() + 1;
        self.t.set(t);
        t
    }
}

// ── Echo scripting ────────────────────────────────────────────

/// Behaviour of the echo line for one measurement.
#[derive(Debug, Clone, Copy)]
pub enum EchoScript {
    /// Echo pulse of the given duration (µs). Distance follows exactly.
    RoundTrip(u64),
    /// Echo never rises — the sensor hits its start timeout.
    Silent,
    /// Echo reads fail — a hardware fault.
    ReadFault,
}

/// Delay between the trigger's falling edge and the echo's rising edge.
const ECHO_LATENCY_US: u64 = 25;

// ── GPIO ──────────────────────────────────────────────────────

pub struct MockGpio {
    t: Rc<Cell<u64>>,
    trig: u8,
    echo: u8,
    scripts: VecDeque<EchoScript>,
    pulse: Option<(u64, u64)>,
    fault_active: bool,
    last_trig: Level,
    /// Measurements started (trigger pulses completed).
    pub measure_starts: u64,
    /// Every write in order, including trigger writes.
    pub writes: Vec<(u8, Level)>,
    /// Every release in order, duplicates included.
    pub released: Vec<u8>,
    /// Writes to these pins fail (simulated dead actuator).
    pub fail_pins: HashSet<u8>,
}

impl MockGpio {
    pub fn new(t: &Rc<Cell<u64>>, trig: u8, echo: u8) -> Self {
        Self {
            t: Rc::clone(t),
            trig,
            echo,
            scripts: VecDeque::new(),
            pulse: None,
            fault_active: false,
            last_trig: Level::Low,
            measure_starts: 0,
            writes: Vec::new(),
            released: Vec::new(),
            fail_pins: HashSet::new(),
        }
    }

    pub fn script(&mut self, script: EchoScript) {
        self.scripts.push_back(script);
    }

    /// Writes issued to `pin`, in order.
    pub fn writes_to(&self, pin: u8) -> Vec<Level> {
        self.writes
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, l)| *l)
            .collect()
    }

    /// How many times `pin` was released.
    pub fn release_count(&self, pin: u8) -> usize {
        self.released.iter().filter(|&&p| p == pin).count()
    }
}

impl GpioPort for MockGpio {
    fn claim_output(&mut self, _pin: u8) -> Result<(), GpioError> {
        Ok(())
    }

    fn claim_input(&mut self, _pin: u8) -> Result<(), GpioError> {
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        if self.fail_pins.contains(&pin) {
            return Err(GpioError::NotAnOutput(pin));
        }
        self.writes.push((pin, level));

        if pin == self.trig {
            // The trigger pulse's falling edge starts a measurement: arm
            // the next scripted echo.
            if self.last_trig == Level::High && level == Level::Low {
                self.measure_starts += 1;
                match self.scripts.pop_front().unwrap_or(EchoScript::Silent) {
                    EchoScript::RoundTrip(duration_us) => {
                        let rise_at = self.t.get() + ECHO_LATENCY_US;
                        self.pulse = Some((rise_at, rise_at + duration_us));
                        self.fault_active = false;
                    }
                    EchoScript::Silent => {
                        self.pulse = None;
                        self.fault_active = false;
                    }
                    EchoScript::ReadFault => {
                        self.pulse = None;
                        self.fault_active = true;
                    }
                }
            }
            self.last_trig = level;
        }
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<Level, GpioError> {
        if self.fault_active {
            return Err(GpioError::NotAnInput(pin));
        }
        let now = self.t.get();
        match self.pulse {
            Some((rise_at, fall_at)) if now >= rise_at && now < fall_at => Ok(Level::High),
            _ => Ok(Level::Low),
        }
    }

    fn release(&mut self, pin: u8) {
        self.released.push(pin);
    }
}

// ── Event recorder ────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|&e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
