#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    X11,
    Wayland,
    Unknown,
}

pub fn detect_session() -> SessionType {
    session_from_env(
        std::env::var("XDG_SESSION_TYPE").ok().as_deref(),
        std::env::var("WAYLAND_DISPLAY").ok().as_deref(),
        std::env::var("DISPLAY").ok().as_deref(),
    )
}

fn session_from_env(
    session_type: Option<&str>,
    wayland_display: Option<&str>,
    display: Option<&str>,
) -> SessionType {
    match session_type.map(|s| s.to_lowercase()).as_deref() {
        Some("wayland") => return SessionType::Wayland,
        Some("x11") => return SessionType::X11,
        _ => {}
    }

    if wayland_display.is_some_and(|d| !d.is_empty()) {
        return SessionType::Wayland;
    }

    if display.is_some_and(|d| !d.is_empty()) {
        return SessionType::X11;
    }

    SessionType::Unknown
}
