use crate::config::Config;
use crate::error::{Result, SwitcherError};
use crate::events::{WindowHandle, WindowInfo};
use tracing::{info, warn};

use super::detect::{detect_session, SessionType};
use super::dry_run::DryRunWindowManager;
use super::ewmh::EwmhWindowManager;

/// Capability interface over the OS window system.
///
/// Handles returned by `enumerate` may go stale at any moment; every method
/// taking a handle must report `StaleHandle` (or another error) instead of
/// panicking.
pub trait WindowManager {
    /// Short backend name for logs and `--list-windows`
    fn name(&self) -> &'static str;

    /// Check that the backend can talk to the window system at all
    fn probe(&self) -> Result<()>;

    /// All top-level windows in the window system's own order
    fn enumerate(&self) -> Result<Vec<WindowInfo>>;

    fn is_minimized(&self, handle: &WindowHandle) -> Result<bool>;

    fn restore(&self, handle: &WindowHandle) -> Result<()>;

    fn set_foreground(&self, handle: &WindowHandle) -> Result<()>;
}

impl<T: WindowManager + ?Sized> WindowManager for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn probe(&self) -> Result<()> {
        (**self).probe()
    }

    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        (**self).enumerate()
    }

    fn is_minimized(&self, handle: &WindowHandle) -> Result<bool> {
        (**self).is_minimized(handle)
    }

    fn restore(&self, handle: &WindowHandle) -> Result<()> {
        (**self).restore(handle)
    }

    fn set_foreground(&self, handle: &WindowHandle) -> Result<()> {
        (**self).set_foreground(handle)
    }
}

/// Factory function to create the window manager backend selected by the
/// config, or the in-memory one when `dry_run` is set
pub fn create_window_manager(config: &Config, dry_run: bool) -> Result<Box<dyn WindowManager>> {
    if dry_run {
        return Ok(Box::new(DryRunWindowManager::with_sample_windows()));
    }

    match config.window.backend.as_str() {
        "dry-run" => Ok(Box::new(DryRunWindowManager::with_sample_windows())),
        "ewmh" => {
            let manager = EwmhWindowManager::new();
            manager.probe()?;
            Ok(Box::new(manager))
        }
        "auto" => auto_detect(),
        other => Err(SwitcherError::Config(anyhow::anyhow!(
            "Неизвестный бэкенд окон: {}",
            other
        ))),
    }
}

fn auto_detect() -> Result<Box<dyn WindowManager>> {
    let session = detect_session();
    info!("Обнаружен тип сессии: {:?}", session);

    if session == SessionType::Wayland {
        warn!("Wayland-сессия: через EWMH будут видны только окна XWayland");
    }

    let manager = EwmhWindowManager::new();
    match manager.probe() {
        Ok(()) => {
            info!("Используем бэкенд {}", manager.name());
            Ok(Box::new(manager))
        }
        Err(e) => {
            warn!("Бэкенд {} недоступен: {}", manager.name(), e);
            Err(SwitcherError::ServiceUnavailable(format!(
                "Ни один бэкенд окон не работает (сессия {:?}). Установите wmctrl и xprop или запустите с --dry-run",
                session
            )))
        }
    }
}
