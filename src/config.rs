use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub window: WindowConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub bindings: Vec<KeyBindingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Файл для логов. Терминал занят таблицей, поэтому без файла логи идут в stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    pub backend: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Заголовок окна терминала, по которому его находит внешний хоткей
    #[serde(default)]
    pub terminal_title: Option<String>,
}

/// Запись таблицы привязок в том виде, в каком она лежит в TOML.
/// Пустой `title` допустим: такая клавиша просто не попадёт в таблицу.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct KeyBindingConfig {
    pub key: String,
    #[serde(default)]
    pub title: String,
}

impl KeyBindingConfig {
    pub fn new(key: &str, title: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
        }
    }
}

pub const BACKENDS: &[&str] = &["auto", "ewmh", "dry-run"];

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "compact".to_string(),
                file: None,
            },
            window: WindowConfig {
                backend: "auto".to_string(),
            },
            ui: UiConfig {
                terminal_title: Some("App Switcher".to_string()),
            },
            bindings: default_bindings(),
        }
    }
}

fn default_bindings() -> Vec<KeyBindingConfig> {
    [
        ("A", ""),
        ("B", ""),
        ("C", ""),
        ("D", ""),
        ("E", "Excel"),
        ("F", ""),
        ("G", ""),
        ("H", ""),
        ("I", "Notepad++"),
        ("J", ""),
        ("K", ""),
        ("L", ""),
        ("M", "Outlook"),
        ("N", "Microsoft Teams"),
        ("O", ""),
        ("P", "PDF-XChange Editor"),
        ("Q", ""),
        ("R", ""),
        ("S", "Edge"),
        ("T", "Total Commander"),
        ("U", ""),
        ("V", "Visual Studio Code"),
        ("W", "Word"),
        ("X", ""),
        ("Y", "OneNote"),
        ("Z", ""),
    ]
    .iter()
    .map(|(key, title)| KeyBindingConfig::new(key, title))
    .collect()
}

impl Config {
    /// Собрать конфигурацию: значения по умолчанию <- TOML <- `APP_SWITCHER_*`.
    ///
    /// Не валидирует: флаги командной строки накладываются позже, и
    /// `validate` вызывается уже после них.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        // Файл не обязателен: без него работают значения по умолчанию
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("APP_SWITCHER_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        Ok(config)
    }

    /// Наложить `--log-level` и `--backend` поверх загруженных значений
    pub fn with_overrides(mut self, log_level: Option<&str>, backend: Option<&str>) -> Self {
        if let Some(level) = log_level {
            self.logging.level = level.to_string();
        }
        if let Some(backend) = backend {
            self.window.backend = backend.to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "full" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация бэкенда окон
        if !BACKENDS.contains(&self.window.backend.as_str()) {
            anyhow::bail!(
                "Неверный бэкенд окон: {} (допустимо: {})",
                self.window.backend,
                BACKENDS.join(", ")
            );
        }

        // Валидация привязок: одна клавиша - один символ, без повторов
        let mut seen = Vec::new();
        for (i, binding) in self.bindings.iter().enumerate() {
            let key = binding.key.trim();
            let mut chars = key.chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                (None, _) => anyhow::bail!("Пустая клавиша в привязке #{}", i + 1),
                _ => anyhow::bail!(
                    "Клавиша '{}' в привязке #{} должна быть одним символом",
                    binding.key,
                    i + 1
                ),
            };

            if !ch.is_alphabetic() {
                anyhow::bail!(
                    "Клавиша '{}' в привязке #{} должна быть буквой",
                    binding.key,
                    i + 1
                );
            }

            let normalized = normalize_key(ch);
            if seen.contains(&normalized) {
                anyhow::bail!("Клавиша '{}' назначена повторно (привязка #{})", binding.key, i + 1);
            }
            seen.push(normalized);
        }

        Ok(())
    }

    pub fn bindings(&self) -> &[KeyBindingConfig] {
        &self.bindings
    }
}

/// Клавиши сравниваются без учёта регистра и хранятся в верхнем регистре
pub fn normalize_key(key: char) -> char {
    key.to_uppercase().next().unwrap_or(key)
}
