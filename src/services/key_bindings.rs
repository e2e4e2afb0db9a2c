use crate::config::{normalize_key, KeyBindingConfig};
use std::collections::HashMap;

/// Клавиша и фрагмент заголовка окна, на которое она переключает
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: char,
    pub title: String,
}

/// Неизменяемая таблица привязок. Порядок - порядок из конфигурации,
/// он важен только для отображения.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: Vec<KeyBinding>,
    // Индекс для O(1) поиска по клавише
    index: HashMap<char, usize>,
}

impl KeyBindings {
    /// Построить таблицу из конфигурации, отбросив привязки с пустой клавишей
    /// или пустым заголовком. Повторная клавиша не перезаписывает первую.
    pub fn from_config(entries: &[KeyBindingConfig]) -> Self {
        let mut table = Self::default();

        for entry in entries {
            let title = entry.title.trim();
            let mut chars = entry.key.trim().chars();
            let key = match (chars.next(), chars.next()) {
                (Some(key), None) => normalize_key(key),
                _ => continue,
            };

            if title.is_empty() || table.index.contains_key(&key) {
                continue;
            }

            table.index.insert(key, table.bindings.len());
            table.bindings.push(KeyBinding {
                key,
                title: title.to_string(),
            });
        }

        table
    }

    /// Фрагмент заголовка для нажатой клавиши (регистр клавиши не важен)
    pub fn resolve(&self, key: char) -> Option<&str> {
        self.index
            .get(&normalize_key(key))
            .map(|&i| self.bindings[i].title.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
