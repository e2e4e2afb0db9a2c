use crate::error::Result;
use crate::events::{WindowHandle, WindowInfo};
use crate::utils::ToolCommand;
use tracing::debug;

use super::r#trait::WindowManager;

const HIDDEN_STATE: &str = "_NET_WM_STATE_HIDDEN";

/// X11 backend over the EWMH hints, driven through `wmctrl`, `xprop` and `xdotool`.
///
/// `wmctrl -l` lists only managed client windows, so every window it
/// reports is a top-level one and counts as visible. A minimized window keeps
/// its place in the list and carries `_NET_WM_STATE_HIDDEN`.
///
/// Window managers ignore client requests to drop `_NET_WM_STATE_HIDDEN`, so
/// restore maps the window instead (`xdotool windowmap`). Mapping an iconic
/// window is the ICCCM Iconic -> Normal transition, honoured by Mutter,
/// KWin, Xfwm4, Openbox, Fluxbox and other ICCCM-compliant managers.
pub struct EwmhWindowManager;

impl EwmhWindowManager {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EwmhWindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager for EwmhWindowManager {
    fn name(&self) -> &'static str {
        "ewmh"
    }

    fn probe(&self) -> Result<()> {
        ToolCommand::new("wmctrl").arg("-m").run()?;
        ToolCommand::new("xprop").arg("-version").run()?;
        ToolCommand::new("xdotool").arg("version").run()?;
        Ok(())
    }

    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        let stdout = ToolCommand::new("wmctrl").arg("-l").run()?;
        let windows = parse_wmctrl_list(&stdout);
        debug!("wmctrl вернул {} окон", windows.len());
        Ok(windows)
    }

    fn is_minimized(&self, handle: &WindowHandle) -> Result<bool> {
        let stdout = ToolCommand::new("xprop")
            .args(["-id", handle.as_str(), "_NET_WM_STATE"])
            .run()?;
        Ok(is_hidden_state(&stdout))
    }

    fn restore(&self, handle: &WindowHandle) -> Result<()> {
        restore_command(handle).run()?;
        Ok(())
    }

    fn set_foreground(&self, handle: &WindowHandle) -> Result<()> {
        focus_command(handle).run()?;
        Ok(())
    }
}

/// Свёрнутое окно разворачивается отображением (ICCCM Iconic -> Normal)
fn restore_command(handle: &WindowHandle) -> ToolCommand {
    ToolCommand::new("xdotool").args(["windowmap", handle.as_str()])
}

/// `_NET_ACTIVE_WINDOW`: переключить рабочий стол и поднять окно
fn focus_command(handle: &WindowHandle) -> ToolCommand {
    ToolCommand::new("wmctrl").args(["-i", "-a", handle.as_str()])
}

/// Разобрать вывод `wmctrl -l`: `<id> <desktop> <host> <title...>`.
/// Заголовок сохраняет внутренние пробелы; битые строки пропускаются.
fn parse_wmctrl_list(stdout: &str) -> Vec<WindowInfo> {
    stdout.lines().filter_map(parse_wmctrl_line).collect()
}

fn parse_wmctrl_line(line: &str) -> Option<WindowInfo> {
    let (id, rest) = next_field(line)?;
    let (_desktop, rest) = next_field(rest)?;
    let (_host, title) = next_field(rest)?;

    if !id.starts_with("0x") {
        return None;
    }

    Some(WindowInfo::new(WindowHandle::new(id), title.to_string()))
}

fn next_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((field, rest)) => Some((field, rest.trim_start())),
        None => Some((s, "")),
    }
}

/// `_NET_WM_STATE(ATOM) = _NET_WM_STATE_HIDDEN, _NET_WM_STATE_SKIP_TASKBAR`
fn is_hidden_state(xprop_output: &str) -> bool {
    xprop_output
        .split_once('=')
        .map(|(_, atoms)| atoms.split(',').any(|atom| atom.trim() == HIDDEN_STATE))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wmctrl_list() {
        let stdout = "\
0x03a00007  0 workstation Book1 - Excel
0x04200003 -1 workstation Inbox  -  Outlook
garbage
0x05000001  1 workstation
";
        let windows = parse_wmctrl_list(stdout);

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].handle.as_str(), "0x03a00007");
        assert_eq!(windows[0].title, "Book1 - Excel");
        assert_eq!(windows[1].title, "Inbox  -  Outlook");
        // Окно без заголовка остаётся в списке, но ни с чем не совпадёт
        assert_eq!(windows[2].title, "");
        assert!(windows.iter().all(|w| w.visible));
    }

    #[test]
    fn test_hidden_state_detection() {
        assert!(is_hidden_state(
            "_NET_WM_STATE(ATOM) = _NET_WM_STATE_HIDDEN, _NET_WM_STATE_SKIP_TASKBAR"
        ));
        assert!(!is_hidden_state(
            "_NET_WM_STATE(ATOM) = _NET_WM_STATE_MAXIMIZED_VERT, _NET_WM_STATE_MAXIMIZED_HORZ"
        ));
        assert!(!is_hidden_state("_NET_WM_STATE:  not found."));
    }

    #[test]
    fn test_restore_maps_window_instead_of_toggling_hidden() {
        let handle = WindowHandle::new("0x03a00007");

        let restore = restore_command(&handle);
        assert_eq!(restore.program(), "xdotool");
        assert_eq!(restore.arg_list(), ["windowmap", "0x03a00007"]);

        let focus = focus_command(&handle);
        assert_eq!(focus.program(), "wmctrl");
        assert_eq!(focus.arg_list(), ["-i", "-a", "0x03a00007"]);
    }
}
