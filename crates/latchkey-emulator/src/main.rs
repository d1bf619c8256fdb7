//! Scripted demo session against the mock hardware.
//!
//! Wires a [`LockController`] to the mock GPIO bank, servo, buzzer and
//! clock, then plays a short session: a wrong code, the factory code,
//! and a re-lock, rendering the virtual panel after each step.
//!
//! ```text
//! RUST_LOG=debug cargo run --bin latchkey-demo
//! ```

use latchkey_control::{LockConfig, LockController};
use latchkey_core::PinId;
use latchkey_emulator::{PanelSnapshot, SessionLog, VirtualPanel};
use latchkey_hardware::{
    mock::{
        MockClock, MockClockHandle, MockGpio, MockGpioHandle, MockServo, MockSounder,
        MockSounderHandle,
    },
    types::Level,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

struct Demo {
    controller: LockController<MockGpio, MockGpio, MockServo, MockSounder, MockClock>,
    gpio: MockGpioHandle,
    sounder: MockSounderHandle,
    clock: MockClockHandle,
    panel: VirtualPanel,
    log: SessionLog,
}

impl Demo {
    fn press(&mut self, pin: PinId) -> latchkey_control::Result<()> {
        let mut events = Vec::new();

        self.gpio.set_level(pin, Level::Low);
        events.extend(self.controller.poll()?);
        self.clock.advance(60);
        events.extend(self.controller.poll()?);

        self.gpio.set_level(pin, Level::High);
        events.extend(self.controller.poll()?);
        self.clock.advance(60);
        events.extend(self.controller.poll()?);

        for event in events {
            self.log.record(event);
        }
        Ok(())
    }

    fn enter_and_confirm(&mut self, digits: &[u8]) -> latchkey_control::Result<()> {
        let pins = *self.controller.pins();
        for &digit in digits {
            let pin = match digit {
                1 => pins.digit1,
                2 => pins.digit2,
                3 => pins.digit3,
                other => panic!("no button for digit {other}"),
            };
            self.press(pin)?;
        }
        self.press(pins.confirm)
    }

    fn show_panel(&self, caption: &str) {
        let pins = self.controller.pins();
        let snapshot = PanelSnapshot {
            state: self.controller.state(),
            green_lit: self.gpio.output_level(pins.green_indicator) == Some(Level::High),
            red_lit: self.gpio.output_level(pins.red_indicator) == Some(Level::High),
            entered: self.controller.entered_count(),
            code_length: self.controller.code_length(),
            tone_hz: self.sounder.last_tone().map(|t| t.frequency_hz),
        };
        println!("\n== {caption} ==");
        println!("{}", self.panel.render(&snapshot));
    }
}

fn main() -> latchkey_control::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let (gpio, gpio_handle) = MockGpio::new();
    let (servo, _servo_handle) = MockServo::new();
    let (sounder, sounder_handle) = MockSounder::new();
    let (clock, clock_handle) = MockClock::new();

    let mut controller = LockController::new(
        LockConfig::default(),
        gpio.clone(),
        gpio,
        servo,
        sounder,
        clock,
    )?;
    controller.init()?;

    let mut demo = Demo {
        controller,
        gpio: gpio_handle,
        sounder: sounder_handle,
        clock: clock_handle,
        panel: VirtualPanel::new(),
        log: SessionLog::new(),
    };

    demo.show_panel("power on");

    tracing::info!("trying a wrong code");
    demo.enter_and_confirm(&[3, 2, 1])?;
    demo.show_panel("after wrong code");

    tracing::info!("trying the factory code");
    demo.enter_and_confirm(&[1, 2, 3])?;
    demo.show_panel("after correct code");

    tracing::info!("locking back up");
    let pins = *demo.controller.pins();
    demo.press(pins.confirm)?;

    // Let the feedback pulse run out before the final frame.
    demo.clock.advance(1100);
    demo.controller.poll()?;
    demo.show_panel("locked again");

    println!("\nsession log:");
    for entry in demo.log.entries() {
        println!("  {entry}");
    }

    Ok(())
}
