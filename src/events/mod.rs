pub mod keyboard;
pub mod window;

pub use keyboard::KeyInput;
pub use window::{ActivationOutcome, WindowHandle, WindowInfo};
