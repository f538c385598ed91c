//! Mock peripherals for integration tests.
//!
//! [`RecordingPin`] keeps every level written to the relay GPIO so tests
//! can assert on the full switching history; [`Panel`] plays the three
//! interrupts against a [`Controller`] the way the hardware would.

use std::convert::Infallible;

use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};
use fermenter::adapters::{HardwareAdapter, MemStorage};
use fermenter::app::{ParamStore, Thermostat};
use fermenter::drivers::ButtonDebouncer;
use fermenter::events::{Button, MenuEvent};
use fermenter::sensors::TemperatureDecoder;
use fermenter::Controller;

// ── Relay pins ────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingPin {
    pub levels: Vec<bool>,
}

#[allow(dead_code)]
impl RecordingPin {
    pub fn is_high(&self) -> bool {
        self.levels.last().copied().unwrap_or(false)
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.push(true);
        Ok(())
    }
}

#[derive(Debug)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Relay output whose every write fails.
#[derive(Debug, Default)]
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = PinFault;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        Err(PinFault)
    }
}

// ── Controller fixtures ───────────────────────────────────────

pub type Hw<P = RecordingPin> = HardwareAdapter<MemStorage, P>;

/// Port value with every button released (pull-ups read high).
pub const IDLE_PORT: u8 = 0xFF;

pub fn hardware_with<P: OutputPin>(storage: MemStorage, pin: P) -> Hw<P> {
    HardwareAdapter::new(ParamStore::load(storage), Thermostat::new(pin))
}

pub fn controller_with<P: OutputPin>(storage: MemStorage, pin: P) -> Controller<Hw<P>> {
    Controller::new(
        hardware_with(storage, pin),
        ButtonDebouncer::with_port(IDLE_PORT),
        TemperatureDecoder::new(),
    )
}

pub fn controller() -> Controller<Hw> {
    controller_with(MemStorage::new(), RecordingPin::default())
}

/// Front panel driving the interrupt entry points.
pub struct Panel<P: OutputPin = RecordingPin> {
    pub ctl: Controller<Hw<P>>,
    port: u8,
}

#[allow(dead_code)]
impl Panel<RecordingPin> {
    pub fn new() -> Self {
        Self::with(controller())
    }
}

#[allow(dead_code)]
impl<P: OutputPin> Panel<P> {
    pub fn with(ctl: Controller<Hw<P>>) -> Self {
        Self {
            ctl,
            port: IDLE_PORT,
        }
    }

    /// Pull the button's line low and run the edge interrupt.
    pub fn press(&mut self, b: Button) -> Option<MenuEvent> {
        self.port &= !b.mask();
        self.ctl.on_button_edge(self.port)
    }

    /// Release the button's line and run the edge interrupt.
    pub fn release(&mut self, b: Button) -> Option<MenuEvent> {
        self.port |= b.mask();
        self.ctl.on_button_edge(self.port)
    }

    /// Set several lines at once and run a single edge interrupt.
    pub fn set_port(&mut self, port: u8) -> Option<MenuEvent> {
        self.port = port;
        self.ctl.on_button_edge(port)
    }

    pub fn ticks(&self, n: u32) {
        for _ in 0..n {
            self.ctl.tick();
        }
    }

    /// Short press of button 1 from Root.
    pub fn enter_set_timer(&mut self) {
        self.press(Button::One);
        self.release(Button::One);
    }

    /// Long press of button 1 from Root.
    pub fn enter_select_param(&mut self) {
        self.press(Button::One);
        self.ticks(97);
        self.release(Button::One);
    }

    pub fn storage(&self) -> MemStorage {
        self.ctl.with_io(|hw| hw.params().storage().clone())
    }
}
