pub mod activator;
pub mod binding_table;
pub mod key_bindings;
pub mod keyboard_listener;
pub mod switcher;
pub mod window_manager;

pub use activator::WindowActivator;
pub use key_bindings::KeyBindings;
pub use keyboard_listener::TerminalKeyboardListener;
pub use switcher::Switcher;
pub use window_manager::create_window_manager;
