//! Port bit assignments for the controller board.
//!
//! Single source of truth: the button driver masks raw port samples with
//! these constants rather than hard-coding bit positions.

// ---------------------------------------------------------------------------
// Push-buttons (port C, inputs with pull-up, switch to ground)
// ---------------------------------------------------------------------------

/// Button 1 ("SET"): menu entry / confirm.  PC.3
pub const BUTTON1_BIT: u8 = 0x08;
/// Button 2 ("+"): increment / thermostat toggle.  PC.4
pub const BUTTON2_BIT: u8 = 0x10;
/// Button 3 ("-"): decrement / fermentation timer toggle.  PC.5
pub const BUTTON3_BIT: u8 = 0x20;

/// All button bits on the port.  Other bits of a raw sample are ignored.
pub const BUTTONS_MASK: u8 = BUTTON1_BIT | BUTTON2_BIT | BUTTON3_BIT;

// ---------------------------------------------------------------------------
// Analog input
// ---------------------------------------------------------------------------

/// Largest value a 10-bit conversion can produce.
pub const ADC_MAX: u16 = 0x3FF;
