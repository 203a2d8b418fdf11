//! Raw button input trait

use crate::state::events::Button;

/// Raw "currently pressed" reads for the four buttons
///
/// Electrical debouncing is the hardware's business; the logical
/// debounce window lives in [`crate::input::InputRouter`].
pub trait ButtonPins {
    /// Whether the given button is currently held down
    fn is_pressed(&mut self, button: Button) -> bool;

    /// Read all four buttons in [`Button::ALL`] order
    fn read_all(&mut self) -> [bool; 4] {
        let mut pressed = [false; 4];
        for b in Button::ALL {
            pressed[b.index()] = self.is_pressed(b);
        }
        pressed
    }
}
