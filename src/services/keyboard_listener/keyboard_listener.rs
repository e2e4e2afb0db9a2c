use crate::error::Result;
use crate::events::KeyInput;
use crate::trace_if_enabled;
use crossterm::event::{self, Event};
use crossterm::terminal;
use tracing::{error, info};

use super::r#trait::KeySource;

/// Читает по одной клавише из терминала в raw-режиме, без Enter.
///
/// Raw-режим включается в `new` и выключается в `Drop`, так что терминал
/// восстанавливается при любом выходе из цикла.
pub struct TerminalKeyboardListener {
    _private: (),
}

impl TerminalKeyboardListener {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        info!("Терминал переведён в raw-режим");
        Ok(Self { _private: () })
    }
}

impl KeySource for TerminalKeyboardListener {
    fn next_key(&mut self) -> Result<KeyInput> {
        loop {
            match event::read()? {
                Event::Key(key_event) => {
                    let input = KeyInput::from_key_event(&key_event);
                    trace_if_enabled!("Событие клавиши {:?} -> {}", key_event, input);
                    if input != KeyInput::Ignored {
                        return Ok(input);
                    }
                }
                // Resize, фокус, мышь и вставка не интересуют цикл
                other => trace_if_enabled!("Пропускаем событие терминала: {:?}", other),
            }
        }
    }
}

impl Drop for TerminalKeyboardListener {
    fn drop(&mut self) {
        info!("Восстановление режима терминала");
        if let Err(e) = terminal::disable_raw_mode() {
            error!("Не удалось выключить raw-режим: {}", e);
        }
    }
}
