//! Proxigate — main entry point.
//!
//! Wiring order matters: pins are claimed before anything else because a
//! claim failure is fatal (exit code 1); the signal hook is installed before
//! the loop starts so no termination window is unguarded; teardown runs on
//! the main thread after the loop observes the request flag.

use anyhow::{Context, Result};
use log::info;

use proxigate::adapters::clock::MonotonicClock;
use proxigate::adapters::file_sink::{CompositeSink, DistanceFileSink};
use proxigate::adapters::hardware::RppalGpio;
use proxigate::adapters::log_sink::LogEventSink;
use proxigate::app::ports::{GpioPort, PinBinding, PinDirection};
use proxigate::app::service::ControlLoop;
use proxigate::config::{ActuatorKind, CONFIG_PATH, SystemConfig};
use proxigate::control::ActuatorController;
use proxigate::drivers::Actuator;
use proxigate::drivers::relay::RelayDriver;
use proxigate::drivers::servo::ServoDriver;
use proxigate::error::{Error, SetupError};
use proxigate::pins;
use proxigate::sensors::ultrasonic::UltrasonicSensor;
use proxigate::shutdown::{ShutdownFlag, ShutdownHandler};

fn claim(
    gpio: &mut RppalGpio,
    bindings: &mut Vec<PinBinding>,
    pin: u8,
    direction: PinDirection,
) -> Result<()> {
    match direction {
        PinDirection::Output => gpio.claim_output(pin),
        PinDirection::Input => gpio.claim_input(pin),
    }
    .map_err(|_| Error::Setup(SetupError::PinClaimFailed(pin)))
    .with_context(|| format!("claiming GPIO {pin}"))?;
    bindings.push(PinBinding { pin, direction });
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("proxigate v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::load_or_default(CONFIG_PATH);

    // ── Claim pins ────────────────────────────────────────────
    let mut gpio = RppalGpio::new().context("opening GPIO chip")?;
    let mut bindings = Vec::new();
    claim(&mut gpio, &mut bindings, pins::TRIG_GPIO, PinDirection::Output)?;
    claim(&mut gpio, &mut bindings, pins::ECHO_GPIO, PinDirection::Input)?;

    let (controller, actuator) = match config.actuator {
        ActuatorKind::Relay => {
            claim(&mut gpio, &mut bindings, pins::RELAY_A_GPIO, PinDirection::Output)?;
            claim(&mut gpio, &mut bindings, pins::RELAY_B_GPIO, PinDirection::Output)?;
            (
                ActuatorController::relay(&config),
                Actuator::Relay(RelayDriver::new(pins::RELAY_A_GPIO, pins::RELAY_B_GPIO)),
            )
        }
        ActuatorKind::Servo => {
            claim(&mut gpio, &mut bindings, pins::SERVO_GPIO, PinDirection::Output)?;
            (
                ActuatorController::servo(&config),
                Actuator::Servo(ServoDriver::new(pins::SERVO_GPIO, &config)),
            )
        }
    };

    // ── Assemble the core ─────────────────────────────────────
    let sensor = UltrasonicSensor::new(pins::TRIG_GPIO, pins::ECHO_GPIO, &config);
    let clock = MonotonicClock::new();
    let mut sink = CompositeSink::new(
        LogEventSink::new(),
        DistanceFileSink::new(config.distance_file.clone()),
    );

    // ── Signal hook ───────────────────────────────────────────
    let shutdown = ShutdownFlag::new();
    {
        let flag = shutdown.clone();
        ctrlc::set_handler(move || flag.request()).context("installing signal handler")?;
    }

    // ── Run ───────────────────────────────────────────────────
    let mut control = ControlLoop::new(&config, sensor, controller, actuator);
    let reason = control.run(&mut gpio, &clock, &mut sink, &shutdown);

    let handler = ShutdownHandler::new(&config);
    handler.teardown(
        &mut gpio,
        &clock,
        control.actuator_mut(),
        &bindings,
        &mut sink,
        reason,
    );

    info!("{}", control.summary());
    Ok(())
}
