use crate::error::{Result, SwitcherError};
use crate::events::{WindowHandle, WindowInfo};
use parking_lot::Mutex;
use tracing::info;

use super::r#trait::WindowManager;

/// Вызов бэкенда, записанный для проверки переходов состояния
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCall {
    Enumerate,
    IsMinimized(WindowHandle),
    Restore(WindowHandle),
    SetForeground(WindowHandle),
}

#[derive(Debug, Clone)]
struct FakeWindow {
    info: WindowInfo,
    minimized: bool,
}

#[derive(Debug, Default)]
struct DryRunState {
    windows: Vec<FakeWindow>,
    calls: Vec<WindowCall>,
    vanish_after_enumerate: Option<WindowHandle>,
    fail_enumeration: bool,
    fail_next: Option<(WindowCall, SwitcherError)>,
}

/// In-memory window system for `--dry-run` and tests.
pub struct DryRunWindowManager {
    state: Mutex<DryRunState>,
}

impl Default for DryRunWindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DryRunWindowManager {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DryRunState::default()),
        }
    }

    pub fn with_sample_windows() -> Self {
        Self::new()
            .with_window("0x01", "Book1 - Excel - dry_run", true)
            .with_window("0x02", "Document1 - Word - dry_run", false)
            .with_window("0x03", "Inbox - Outlook - dry_run", false)
            .with_window("0x04", "main.rs - Visual Studio Code - dry_run", false)
    }

    pub fn with_window(self, handle: &str, title: &str, minimized: bool) -> Self {
        self.push(
            WindowInfo::new(WindowHandle::new(handle), title.to_string()),
            minimized,
        )
    }

    #[cfg(test)]
    pub fn with_hidden_window(self, handle: &str, title: &str) -> Self {
        self.push(
            WindowInfo::new(WindowHandle::new(handle), title.to_string()).with_visible(false),
            false,
        )
    }

    fn push(self, info: WindowInfo, minimized: bool) -> Self {
        self.state.lock().windows.push(FakeWindow { info, minimized });
        self
    }

    /// Окно исчезнет сразу после следующего перечисления
    #[cfg(test)]
    pub fn vanish_after_enumerate(&self, handle: &str) {
        self.state.lock().vanish_after_enumerate = Some(WindowHandle::new(handle));
    }

    #[cfg(test)]
    pub fn fail_enumeration(&self, fail: bool) {
        self.state.lock().fail_enumeration = fail;
    }

    /// Следующий такой вызов вернёт `error` (один раз)
    #[cfg(test)]
    pub fn fail_next(&self, call: WindowCall, error: SwitcherError) {
        self.state.lock().fail_next = Some((call, error));
    }

    #[cfg(test)]
    pub fn calls(&self) -> Vec<WindowCall> {
        self.state.lock().calls.clone()
    }

    #[cfg(test)]
    pub fn is_window_minimized(&self, handle: &str) -> Option<bool> {
        self.state
            .lock()
            .windows
            .iter()
            .find(|w| w.info.handle.as_str() == handle)
            .map(|w| w.minimized)
    }

    fn with_existing<T>(
        &self,
        handle: &WindowHandle,
        call: WindowCall,
        f: impl FnOnce(&mut FakeWindow) -> T,
    ) -> Result<T> {
        let mut state = self.state.lock();
        state.calls.push(call.clone());

        if state.fail_next.as_ref().is_some_and(|(failing, _)| *failing == call) {
            if let Some((_, error)) = state.fail_next.take() {
                return Err(error);
            }
        }

        match state.windows.iter_mut().find(|w| &w.info.handle == handle) {
            Some(window) => Ok(f(window)),
            None => Err(SwitcherError::StaleHandle(format!("окно {} закрыто", handle))),
        }
    }
}

impl WindowManager for DryRunWindowManager {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    fn probe(&self) -> Result<()> {
        Ok(())
    }

    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        let mut state = self.state.lock();
        state.calls.push(WindowCall::Enumerate);

        if state.fail_enumeration {
            return Err(SwitcherError::Internal("эмуляция сбоя перечисления окон".to_string()));
        }

        let windows = state.windows.iter().map(|w| w.info.clone()).collect();

        if let Some(handle) = state.vanish_after_enumerate.take() {
            state.windows.retain(|w| w.info.handle != handle);
        }

        Ok(windows)
    }

    fn is_minimized(&self, handle: &WindowHandle) -> Result<bool> {
        self.with_existing(handle, WindowCall::IsMinimized(handle.clone()), |w| w.minimized)
    }

    fn restore(&self, handle: &WindowHandle) -> Result<()> {
        self.with_existing(handle, WindowCall::Restore(handle.clone()), |w| {
            w.minimized = false;
        })
    }

    fn set_foreground(&self, handle: &WindowHandle) -> Result<()> {
        self.with_existing(handle, WindowCall::SetForeground(handle.clone()), |w| {
            info!("Dry-run: активируем окно {}", w.info);
        })
    }
}
