use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;

/// Одно нажатие, как его видит цикл переключателя
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Печатный символ, регистр сохранён
    Char(char),
    /// Esc или Ctrl+C
    Exit,
    /// Стрелки, функциональные клавиши, отпускания и прочее
    Ignored,
}

impl KeyInput {
    pub fn from_key_event(event: &KeyEvent) -> Self {
        // На Windows crossterm присылает и отпускания
        if event.kind == KeyEventKind::Release {
            return KeyInput::Ignored;
        }

        match event.code {
            KeyCode::Char('c') | KeyCode::Char('C')
                if event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                KeyInput::Exit
            }
            KeyCode::Esc => KeyInput::Exit,
            KeyCode::Char(c) => KeyInput::Char(c),
            KeyCode::Enter => KeyInput::Char('\n'),
            KeyCode::Tab => KeyInput::Char('\t'),
            _ => KeyInput::Ignored,
        }
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyInput::Char(c) => write!(f, "'{}'", c.escape_default()),
            KeyInput::Exit => write!(f, "exit"),
            KeyInput::Ignored => write!(f, "ignored"),
        }
    }
}
