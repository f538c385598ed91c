//! Controller: the three interrupt entry points and the read side.
//!
//! [`Controller`] owns the debouncer, the menu, the uptime counter and the
//! collaborators in one interrupt-safe cell, and the temperature decoder
//! in another.  Every entry point and accessor enters a critical section
//! for the duration of its work, so the main loop never observes a torn
//! multi-byte value and edge/tick events reach the menu in arrival order.
//!
//! ```text
//!  edge ISR ──on_button_edge──▶ ┌──────────────────────────┐
//!  tick ISR ──tick────────────▶ │ core: Debouncer · Menu   │ ──▶ MenuPorts
//!                               │       uptime · io        │
//!  ADC ISR  ──on_sample_ready─▶ │ decoder                  │
//!                               └──────────────────────────┘
//!                                  ▲ current_* / with_io (main loop)
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::app::params::ParamId;
use crate::app::ports::MenuPorts;
use crate::config::MenuTiming;
use crate::drivers::button::{ButtonDebouncer, ButtonSnapshot};
use crate::events::{Button, MenuEvent};
use crate::fsm::{Menu, MenuContext, MenuDisplay, MenuState};
use crate::sensors::temperature::{TemperatureDecoder, TemperatureReading};

/// State shared by the edge and tick interrupts.
struct Core<IO> {
    buttons: ButtonDebouncer,
    menu: Menu,
    uptime_ticks: u32,
    io: IO,
}

impl<IO: MenuPorts> Core<IO> {
    fn deliver(&mut self, event: MenuEvent) {
        let mut ctx = MenuContext::new(&mut self.io, self.buttons.snapshot(), self.uptime_ticks);
        self.menu.feed(event, &mut ctx);
    }
}

type Cell<T> = Mutex<CriticalSectionRawMutex, RefCell<T>>;

pub struct Controller<IO> {
    core: Cell<Core<IO>>,
    decoder: Cell<TemperatureDecoder>,
}

impl<IO: MenuPorts> Controller<IO> {
    /// Menu in Root with the default 32 Hz timing, uptime zero.
    pub const fn new(io: IO, buttons: ButtonDebouncer, decoder: TemperatureDecoder) -> Self {
        Self::with_menu(io, buttons, decoder, Menu::new())
    }

    pub const fn with_timing(
        io: IO,
        buttons: ButtonDebouncer,
        decoder: TemperatureDecoder,
        timing: MenuTiming,
    ) -> Self {
        Self::with_menu(io, buttons, decoder, Menu::with_timing(timing))
    }

    const fn with_menu(
        io: IO,
        buttons: ButtonDebouncer,
        decoder: TemperatureDecoder,
        menu: Menu,
    ) -> Self {
        Self {
            core: Mutex::new(RefCell::new(Core {
                buttons,
                menu,
                uptime_ticks: 0,
                io,
            })),
            decoder: Mutex::new(RefCell::new(decoder)),
        }
    }

    // ── Interrupt entry points ────────────────────────────────

    /// Button-edge ISR body.  Samples the port and delivers at most one
    /// event; a second simultaneous change stays pending for the next
    /// call (see [`dispatch_pending_edge`](Self::dispatch_pending_edge)).
    pub fn on_button_edge(&self, raw_port: u8) -> Option<MenuEvent> {
        self.with_core(|shared| {
            let event = shared.buttons.on_edge(raw_port)?;
            shared.deliver(event);
            Some(event)
        })
    }

    /// Deliver one still-pending button change without sampling the port.
    pub fn dispatch_pending_edge(&self) -> Option<MenuEvent> {
        self.with_core(|shared| {
            let event = shared.buttons.next_event()?;
            shared.deliver(event);
            Some(event)
        })
    }

    /// Periodic-timer ISR body.  Must run at the rate the menu timing was
    /// built for.  Also drives [`RelayPort::on_second`](crate::app::ports::RelayPort::on_second)
    /// once per second of uptime.
    pub fn tick(&self) {
        self.with_core(|shared| {
            shared.uptime_ticks = shared.uptime_ticks.wrapping_add(1);
            let mut ctx =
                MenuContext::new(&mut shared.io, shared.buttons.snapshot(), shared.uptime_ticks);
            shared.menu.tick(&mut ctx);

            let per_sec = u32::from(shared.menu.timing().one_sec.max(1));
            if shared.uptime_ticks % per_sec == 0 {
                shared.io.on_second();
            }
        });
    }

    /// ADC-complete ISR body.
    pub fn on_sample_ready(&self, raw: u16) {
        self.decoder.lock(|d| d.borrow_mut().accumulate(raw));
    }

    // ── Read side ─────────────────────────────────────────────

    pub fn current_menu_display(&self) -> MenuDisplay {
        self.with_core(|shared| shared.menu.display())
    }

    pub fn current_menu_state(&self) -> MenuState {
        self.with_core(|shared| shared.menu.state())
    }

    pub fn menu_timer(&self) -> u16 {
        self.with_core(|shared| shared.menu.timer())
    }

    /// Calibrated temperature in tenths of a degree, including the
    /// `TemperatureCorrection` parameter.  Computed on every call.
    pub fn current_temperature(&self) -> i16 {
        let correction = self.correction();
        self.decoder.lock(|d| d.borrow().decode_temperature(correction))
    }

    pub fn temperature_reading(&self) -> TemperatureReading {
        let correction = self.correction();
        self.decoder.lock(|d| d.borrow().reading(correction))
    }

    pub fn averaged_adc(&self) -> u16 {
        self.decoder.lock(|d| d.borrow().averaged_value())
    }

    pub fn is_button_pressed(&self, button: Button) -> bool {
        self.with_core(|shared| shared.buttons.is_pressed(button))
    }

    pub fn button_snapshot(&self) -> ButtonSnapshot {
        self.with_core(|shared| shared.buttons.snapshot())
    }

    pub fn uptime_ticks(&self) -> u32 {
        self.with_core(|shared| shared.uptime_ticks)
    }

    pub fn uptime_seconds(&self) -> u32 {
        self.with_core(|shared| {
            shared.uptime_ticks / u32::from(shared.menu.timing().one_sec.max(1))
        })
    }

    /// Run `f` on the collaborators inside the critical section.  `f` must
    /// not call back into this controller.
    pub fn with_io<R>(&self, f: impl FnOnce(&mut IO) -> R) -> R {
        self.with_core(|shared| f(&mut shared.io))
    }

    // ── Internal ──────────────────────────────────────────────

    fn correction(&self) -> i16 {
        self.with_core(|shared| shared.io.param_value(ParamId::TemperatureCorrection))
    }

    fn with_core<R>(&self, f: impl FnOnce(&mut Core<IO>) -> R) -> R {
        self.core.lock(|cell| f(&mut cell.borrow_mut()))
    }
}
