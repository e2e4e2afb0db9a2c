use crate::error::Result;
use crate::events::KeyInput;

/// Source of single key presses for the switcher loop
pub trait KeySource {
    /// Block until the next key press
    fn next_key(&mut self) -> Result<KeyInput>;
}
