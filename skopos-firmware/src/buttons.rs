//! GPIO button input
//!
//! Four momentary buttons, active low with internal pull-ups. Electrical
//! bounce shorter than the engine's 200 ms debounce window never produces
//! a second accepted press, so a plain level read is enough here.

use embassy_rp::gpio::Input;

use skopos_core::state::Button;
use skopos_core::traits::ButtonPins;

/// The four front-panel buttons
pub struct Buttons {
    pins: [Input<'static>; 4],
}

impl Buttons {
    /// Wrap the four inputs, in K1..K4 order
    pub fn new(k1: Input<'static>, k2: Input<'static>, k3: Input<'static>, k4: Input<'static>) -> Self {
        Self {
            pins: [k1, k2, k3, k4],
        }
    }
}

impl ButtonPins for Buttons {
    fn is_pressed(&mut self, button: Button) -> bool {
        // Active low
        self.pins[button.index()].is_low()
    }
}
