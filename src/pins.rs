//! GPIO / peripheral pin assignments for the dryer controller board.
//!
//! Single source of truth for wiring.  `hw_init` is the only consumer;
//! drivers receive already-configured pins.

// ---------------------------------------------------------------------------
// Load-cell amplifier (HX711, bit-banged)
// ---------------------------------------------------------------------------

/// Digital input: amplifier DOUT.  LOW = conversion ready.
pub const LOAD_CELL_DATA_GPIO: i32 = 4;
/// Digital output: amplifier PD_SCK.  Idles LOW.
pub const LOAD_CELL_CLOCK_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// I²C bus (SHT31 climate sensor), internal pull-ups enabled
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Actuators (active HIGH, LOW on reset)
// ---------------------------------------------------------------------------

/// Digital output: circulation fan MOSFET gate.
pub const FAN_ENABLE_GPIO: i32 = 6;
/// Digital output: heater solid-state relay input.
pub const HEATER_ENABLE_GPIO: i32 = 7;
