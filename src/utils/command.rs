use crate::error::{Result, SwitcherError};
use std::collections::HashMap;
use std::process::Command;
use tracing::debug;

/// Вызов внешней утилиты оконной системы (`wmctrl`, `xprop`, `xdotool`).
///
/// Под `sudo` утилита запускается от имени `SUDO_USER`, иначе она не увидит
/// X-сессию пользователя.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: &'static str,
    args: Vec<String>,
}

fn build_env_overrides() -> HashMap<String, String> {
    let mut env_vars = HashMap::new();

    for name in ["DISPLAY", "XAUTHORITY"] {
        if let Ok(value) = std::env::var(name) {
            env_vars.insert(name.to_string(), value);
        }
    }

    env_vars
}

impl ToolCommand {
    pub fn new(program: &'static str) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[cfg(test)]
    pub fn program(&self) -> &'static str {
        self.program
    }

    #[cfg(test)]
    pub fn arg_list(&self) -> &[String] {
        &self.args
    }

    fn create_command(&self) -> Command {
        let mut cmd = match std::env::var("SUDO_USER") {
            Ok(sudo_user) if !sudo_user.is_empty() => {
                let mut cmd = Command::new("sudo");
                cmd.args(["-E", "-u", &sudo_user, self.program]);
                cmd.args(&self.args);
                cmd
            }
            _ => {
                let mut cmd = Command::new(self.program);
                cmd.args(&self.args);
                cmd
            }
        };

        for (key, value) in build_env_overrides() {
            cmd.env(key, value);
        }

        cmd
    }

    /// Запустить утилиту и вернуть её stdout.
    ///
    /// Ненулевой код возврата превращается в `Platform`, а ответ X-сервера
    /// `BadWindow` в `StaleHandle`: окно закрылось между вызовами.
    pub fn run(&self) -> Result<String> {
        debug!("Запуск {} {:?}", self.program, self.args);

        let output = self.create_command().output().map_err(|e| {
            SwitcherError::ToolUnavailable(format!("{} не найден: {}", self.program, e))
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("BadWindow") {
            return Err(SwitcherError::StaleHandle(format!(
                "{} {}: {}",
                self.program,
                self.args.join(" "),
                stderr.trim()
            )));
        }

        if !output.status.success() {
            debug!("{} вернул ошибку: {}", self.program, stderr);
            return Err(SwitcherError::Platform(format!(
                "{} {} завершился с {}: {}",
                self.program,
                self.args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
