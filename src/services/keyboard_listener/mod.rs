mod keyboard_listener;
#[cfg(test)]
mod scripted_keyboard_listener;
mod r#trait;

pub use self::keyboard_listener::TerminalKeyboardListener;
#[cfg(test)]
pub use self::scripted_keyboard_listener::ScriptedKeyboardListener;
pub use self::r#trait::KeySource;
