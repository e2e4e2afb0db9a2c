use std::fmt;

/// Непрозрачная ссылка на живое окно ОС.
///
/// Действительна только в рамках одной попытки активации: окно может
/// закрыться сразу после перечисления.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowHandle(String);

impl WindowHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Информация об окне
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    pub visible: bool,
}

impl WindowInfo {
    pub fn new(handle: WindowHandle, title: String) -> Self {
        Self {
            handle,
            title,
            visible: true,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Проверить, содержит ли заголовок фрагмент (регистронезависимо).
    /// `fragment_lower` уже должен быть в нижнем регистре.
    pub fn title_contains(&self, fragment_lower: &str) -> bool {
        self.title.to_lowercase().contains(fragment_lower)
    }
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.title, self.handle)
    }
}

/// Результат одной попытки активации
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated(String),
    NotFound,
}

impl ActivationOutcome {
    #[cfg(test)]
    pub fn is_activated(&self) -> bool {
        matches!(self, ActivationOutcome::Activated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_info_creation() {
        let window = WindowInfo::new(WindowHandle::new("0x01"), "Test Window".to_string())
            .with_visible(false);

        assert_eq!(window.handle.as_str(), "0x01");
        assert_eq!(window.title, "Test Window");
        assert!(!window.visible);
    }

    #[test]
    fn test_title_contains_is_case_insensitive() {
        let window = WindowInfo::new(WindowHandle::new("h2"), "Book1 - Excel".to_string());

        assert!(window.title_contains("excel"));
        assert!(window.title_contains("book1 -"));
        assert!(!window.title_contains("word"));
    }

    #[test]
    fn test_display() {
        let window = WindowInfo::new(WindowHandle::new("0x03a00007"), "Inbox - Outlook".to_string());
        assert_eq!(window.to_string(), "\"Inbox - Outlook\" (0x03a00007)");
        assert!(ActivationOutcome::Activated("x".into()).is_activated());
        assert!(!ActivationOutcome::NotFound.is_activated());
    }
}
