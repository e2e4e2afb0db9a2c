use crate::debug_if_enabled;
use crate::error::{Result, SwitcherError};
use crate::events::{ActivationOutcome, WindowInfo};
use crate::services::window_manager::WindowManager;
use tracing::{info, warn};

/// Находит окно по фрагменту заголовка и выводит его на передний план.
///
/// Один вызов `activate` проходит путь `Idle -> Enumerating -> (Matched ->
/// Restoring? -> Activated) | (Unmatched -> NotFound)` без повторов. Любая
/// ошибка оконной системы поглощается и превращается в `NotFound`, чтобы
/// цикл ввода продолжал ждать следующую клавишу.
pub struct WindowActivator<M: WindowManager> {
    manager: M,
}

impl<M: WindowManager> WindowActivator<M> {
    pub fn new(manager: M) -> Self {
        Self { manager }
    }

    #[cfg(test)]
    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn activate(&self, fragment: &str) -> ActivationOutcome {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            debug_if_enabled!("Пустой фрагмент заголовка - пропускаем");
            return ActivationOutcome::NotFound;
        }

        match self.try_activate(fragment) {
            Ok(title) => {
                info!("Окно активировано: \"{}\"", title);
                ActivationOutcome::Activated(title)
            }
            Err(SwitcherError::WindowNotFound(_)) => {
                info!("Окно \"{}\" не найдено", fragment);
                ActivationOutcome::NotFound
            }
            Err(e) if e.is_stale() => {
                warn!("Окно для \"{}\" закрылось во время активации: {}", fragment, e);
                ActivationOutcome::NotFound
            }
            Err(e) => {
                warn!("Не удалось активировать окно \"{}\": {}", fragment, e);
                ActivationOutcome::NotFound
            }
        }
    }

    /// Список видимых окон, который видит бэкенд
    pub fn visible_windows(&self) -> Result<Vec<WindowInfo>> {
        Ok(self
            .manager
            .enumerate()?
            .into_iter()
            .filter(|w| w.visible)
            .collect())
    }

    fn try_activate(&self, fragment: &str) -> Result<String> {
        let window = self.find_window(fragment)?;
        debug_if_enabled!("Найдено окно {} для фрагмента \"{}\"", window, fragment);

        if self.manager.is_minimized(&window.handle)? {
            debug_if_enabled!("Окно {} свёрнуто - восстанавливаем", window.handle);
            self.manager.restore(&window.handle)?;
        }

        self.manager.set_foreground(&window.handle)?;
        Ok(window.title)
    }

    /// Первое видимое окно, чей заголовок содержит фрагмент. Остальные совпадения игнорируются.
    fn find_window(&self, fragment: &str) -> Result<WindowInfo> {
        let fragment_lower = fragment.to_lowercase();

        self.visible_windows()?
            .into_iter()
            .find(|w| w.title_contains(&fragment_lower))
            .ok_or_else(|| SwitcherError::WindowNotFound(fragment.to_string()))
    }
}
