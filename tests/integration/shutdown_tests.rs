//! Teardown sequence tests: safe resting state, settle, release-once.

use crate::mock_hw::{MockClock, MockGpio, RecordingSink};

use proxigate::app::events::AppEvent;
use proxigate::app::ports::{Level, PinBinding, PinDirection};
use proxigate::config::{ActuatorKind, SystemConfig};
use proxigate::control::{ActuatorState, RelayState};
use proxigate::drivers::Actuator;
use proxigate::drivers::relay::RelayDriver;
use proxigate::drivers::servo::ServoDriver;
use proxigate::pins;
use proxigate::shutdown::{ShutdownHandler, ShutdownReason};

fn test_config() -> SystemConfig {
    SystemConfig {
        shutdown_settle_ms: 0,
        ..SystemConfig::default()
    }
}

fn relay_bindings() -> Vec<PinBinding> {
    vec![
        PinBinding {
            pin: pins::TRIG_GPIO,
            direction: PinDirection::Output,
        },
        PinBinding {
            pin: pins::ECHO_GPIO,
            direction: PinDirection::Input,
        },
        PinBinding {
            pin: pins::RELAY_A_GPIO,
            direction: PinDirection::Output,
        },
        PinBinding {
            pin: pins::RELAY_B_GPIO,
            direction: PinDirection::Output,
        },
    ]
}

#[test]
fn teardown_rests_the_relay_and_releases_every_pin_once() {
    let config = test_config();
    let (clock, t) = MockClock::new();
    let mut gpio = MockGpio::new(&t, pins::TRIG_GPIO, pins::ECHO_GPIO);
    let mut actuator = Actuator::Relay(RelayDriver::new(pins::RELAY_A_GPIO, pins::RELAY_B_GPIO));
    let bindings = relay_bindings();
    let mut sink = RecordingSink::new();

    let handler = ShutdownHandler::new(&config);
    handler.teardown(
        &mut gpio,
        &clock,
        &mut actuator,
        &bindings,
        &mut sink,
        ShutdownReason::Signal,
    );

    // Safe resting state: both relay channels LOW.
    assert_eq!(gpio.writes_to(pins::RELAY_A_GPIO), vec![Level::Low]);
    assert_eq!(gpio.writes_to(pins::RELAY_B_GPIO), vec![Level::Low]);
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::ActuatorChanged(ActuatorState::Relay(RelayState::Disengaged))
        )),
        1
    );

    for binding in &bindings {
        assert_eq!(gpio.release_count(binding.pin), 1);
    }
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::ShutdownComplete {
                reason: ShutdownReason::Signal
            }
        )),
        1
    );
}

#[test]
fn second_teardown_is_a_no_op() {
    let config = test_config();
    let (clock, t) = MockClock::new();
    let mut gpio = MockGpio::new(&t, pins::TRIG_GPIO, pins::ECHO_GPIO);
    let mut actuator = Actuator::Relay(RelayDriver::new(pins::RELAY_A_GPIO, pins::RELAY_B_GPIO));
    let bindings = relay_bindings();
    let mut sink = RecordingSink::new();

    let handler = ShutdownHandler::new(&config);
    for _ in 0..2 {
        handler.teardown(
            &mut gpio,
            &clock,
            &mut actuator,
            &bindings,
            &mut sink,
            ShutdownReason::Signal,
        );
    }

    // Each pin released exactly once, one safe-state write, one completion
    // event — the second call must not touch anything.
    for binding in &bindings {
        assert_eq!(gpio.release_count(binding.pin), 1);
    }
    assert_eq!(gpio.writes_to(pins::RELAY_A_GPIO), vec![Level::Low]);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ShutdownComplete { .. })),
        1
    );
    assert!(handler.fired());
}

#[test]
fn unreachable_actuator_still_releases_pins() {
    let config = test_config();
    let (clock, t) = MockClock::new();
    let mut gpio = MockGpio::new(&t, pins::TRIG_GPIO, pins::ECHO_GPIO);
    gpio.fail_pins.insert(pins::RELAY_A_GPIO);
    gpio.fail_pins.insert(pins::RELAY_B_GPIO);
    let mut actuator = Actuator::Relay(RelayDriver::new(pins::RELAY_A_GPIO, pins::RELAY_B_GPIO));
    let bindings = relay_bindings();
    let mut sink = RecordingSink::new();

    let handler = ShutdownHandler::new(&config);
    handler.teardown(
        &mut gpio,
        &clock,
        &mut actuator,
        &bindings,
        &mut sink,
        ShutdownReason::HardwareFault,
    );

    // The fault is reported (no state-change event), but every pin is still
    // released and teardown completes.
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ActuatorChanged(_))), 0);
    for binding in &bindings {
        assert_eq!(gpio.release_count(binding.pin), 1);
    }
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ShutdownComplete { .. })),
        1
    );
}

#[test]
fn teardown_centers_the_servo() {
    let config = SystemConfig {
        actuator: ActuatorKind::Servo,
        ..test_config()
    };
    let (clock, t) = MockClock::new();
    let mut gpio = MockGpio::new(&t, pins::TRIG_GPIO, pins::ECHO_GPIO);
    let mut servo = ServoDriver::new(pins::SERVO_GPIO, &config);
    // Park the servo at the rest extreme first so centering has to move.
    servo
        .move_to(&mut gpio, &clock, config.servo_max_us)
        .unwrap();
    let mut actuator = Actuator::Servo(servo);
    let bindings = vec![
        PinBinding {
            pin: pins::TRIG_GPIO,
            direction: PinDirection::Output,
        },
        PinBinding {
            pin: pins::ECHO_GPIO,
            direction: PinDirection::Input,
        },
        PinBinding {
            pin: pins::SERVO_GPIO,
            direction: PinDirection::Output,
        },
    ];
    let mut sink = RecordingSink::new();

    let handler = ShutdownHandler::new(&config);
    handler.teardown(
        &mut gpio,
        &clock,
        &mut actuator,
        &bindings,
        &mut sink,
        ShutdownReason::Signal,
    );

    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::ActuatorChanged(ActuatorState::Servo { position_us: 1500 })
        )),
        1
    );
    for binding in &bindings {
        assert_eq!(gpio.release_count(binding.pin), 1);
    }
}
