use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwitcherError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Окно не найдено: {0}")]
    WindowNotFound(String),

    #[error("Окно больше не существует: {0}")]
    StaleHandle(String),

    #[error("Ошибка оконной системы: {0}")]
    Platform(String),

    #[error("Утилита недоступна: {0}")]
    ToolUnavailable(String),

    #[error("Сервис недоступен: {0}")]
    ServiceUnavailable(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl SwitcherError {
    /// Ошибка, которую активатор считает устаревшим окном, а не сбоем платформы
    pub fn is_stale(&self) -> bool {
        matches!(self, SwitcherError::StaleHandle(_))
    }
}

pub type Result<T> = std::result::Result<T, SwitcherError>;
