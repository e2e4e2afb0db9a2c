use crate::error::Result;
use crate::events::KeyInput;
use std::collections::VecDeque;

use super::r#trait::KeySource;

/// Заранее записанная последовательность нажатий. Когда она кончается,
/// источник отдаёт `Exit`, чтобы цикл завершился.
pub struct ScriptedKeyboardListener {
    keys: VecDeque<KeyInput>,
}

impl ScriptedKeyboardListener {
    pub fn new(keys: impl IntoIterator<Item = KeyInput>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn chars(keys: &str) -> Self {
        Self::new(keys.chars().map(KeyInput::Char))
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeyboardListener {
    fn next_key(&mut self) -> Result<KeyInput> {
        Ok(self.keys.pop_front().unwrap_or(KeyInput::Exit))
    }
}
