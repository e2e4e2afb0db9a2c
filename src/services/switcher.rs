use crate::error::Result;
use crate::events::{ActivationOutcome, KeyInput};
use crate::services::activator::WindowActivator;
use crate::services::binding_table::BindingTable;
use crate::services::key_bindings::KeyBindings;
use crate::services::keyboard_listener::KeySource;
use crate::services::window_manager::WindowManager;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType, SetTitle};
use crossterm::{cursor::MoveTo, queue};
use std::io::Write;
use tracing::{debug, info};

/// Ширина таблицы следует за терминалом в этих пределах
const MIN_TABLE_WIDTH: u16 = 40;
const MAX_TABLE_WIDTH: u16 = 80;

/// Что сказать пользователю под таблицей после очередного нажатия
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Activated(String),
    NotFound(String),
}

/// Цикл "таблица -> клавиша -> активация".
///
/// Однопоточный: следующая клавиша читается только после того, как
/// предыдущая активация полностью завершилась.
pub struct Switcher<M: WindowManager, K: KeySource, W: Write> {
    bindings: KeyBindings,
    table: BindingTable,
    activator: WindowActivator<M>,
    keys: K,
    out: W,
    status: Status,
}

impl<M: WindowManager, K: KeySource, W: Write> Switcher<M, K, W> {
    pub fn new(bindings: KeyBindings, activator: WindowActivator<M>, keys: K, out: W) -> Self {
        let table = BindingTable::new(&bindings);
        Self {
            bindings,
            table,
            activator,
            keys,
            out,
            status: Status::Ready,
        }
    }

    pub fn set_terminal_title(&mut self, title: &str) -> Result<()> {
        queue!(self.out, SetTitle(title))?;
        self.out.flush()?;
        Ok(())
    }

    /// Крутить цикл, пока пользователь не нажмёт Esc, Ctrl+C или не-букву
    pub fn run(&mut self) -> Result<()> {
        info!("Цикл переключателя запущен, привязок: {}", self.bindings.len());

        loop {
            self.render()?;

            let input = self.keys.next_key()?;
            debug!("Нажата клавиша {}", input);

            match input {
                KeyInput::Char(key) if key.is_alphabetic() => {
                    self.handle_key(key);
                }
                KeyInput::Char(_) | KeyInput::Exit => break,
                KeyInput::Ignored => {}
            }
        }

        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()?;
        info!("Цикл переключателя завершён");
        Ok(())
    }

    /// Обработать одну букву. Клавиша без привязки ничего не делает.
    pub fn handle_key(&mut self, key: char) -> Option<ActivationOutcome> {
        let fragment = match self.bindings.resolve(key) {
            Some(fragment) => fragment.to_string(),
            None => {
                debug!("Клавиша '{}' не привязана", key);
                return None;
            }
        };

        let outcome = self.activator.activate(&fragment);
        self.status = match &outcome {
            ActivationOutcome::Activated(title) => Status::Activated(title.clone()),
            ActivationOutcome::NotFound => Status::NotFound(fragment),
        };

        Some(outcome)
    }

    #[cfg(test)]
    pub fn status(&self) -> &Status {
        &self.status
    }

    #[cfg(test)]
    pub fn activator(&self) -> &WindowActivator<M> {
        &self.activator
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn render(&mut self) -> Result<()> {
        // Raw-режим: перевод строки не возвращает каретку
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;

        let width = terminal::size()
            .map_or(MAX_TABLE_WIDTH, |(cols, _)| cols.clamp(MIN_TABLE_WIDTH, MAX_TABLE_WIDTH));
        for line in self.table.lines(width) {
            queue!(self.out, Print(line), Print("\r\n"))?;
        }

        match &self.status {
            Status::Ready => queue!(
                self.out,
                Print("\r\n"),
                PrintStyledContent("Press an application key (Esc to quit)".dim())
            )?,
            Status::Activated(title) => queue!(
                self.out,
                Print("\r\n"),
                PrintStyledContent(format!("Activated: {}", title).green())
            )?,
            Status::NotFound(fragment) => queue!(
                self.out,
                Print("\r\n"),
                PrintStyledContent(format!("Window \"{}\" not found.", fragment).red())
            )?,
        }

        queue!(self.out, Print("\r\n"))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyBindingConfig;
    use crate::events::WindowHandle;
    use crate::services::keyboard_listener::ScriptedKeyboardListener;
    use crate::services::window_manager::{DryRunWindowManager, WindowCall};

    type TestSwitcher = Switcher<DryRunWindowManager, ScriptedKeyboardListener, Vec<u8>>;

    fn switcher(bindings: &[(&str, &str)], keys: ScriptedKeyboardListener) -> TestSwitcher {
        let entries: Vec<_> = bindings
            .iter()
            .map(|(key, title)| KeyBindingConfig::new(key, title))
            .collect();
        let manager = DryRunWindowManager::new()
            .with_window("h1", "Microsoft Word", false)
            .with_window("h2", "Book1 - Excel", true);

        Switcher::new(
            KeyBindings::from_config(&entries),
            WindowActivator::new(manager),
            keys,
            Vec::new(),
        )
    }

    fn rendered(switcher: &TestSwitcher) -> String {
        String::from_utf8_lossy(switcher.output()).into_owned()
    }

    #[test]
    fn test_pressing_bound_key_activates_window() {
        let mut switcher = switcher(&[("E", "Excel")], ScriptedKeyboardListener::chars(""));

        let outcome = switcher.handle_key('E');

        assert_eq!(outcome, Some(ActivationOutcome::Activated("Book1 - Excel".to_string())));
        assert_eq!(switcher.status(), &Status::Activated("Book1 - Excel".to_string()));
        let calls = switcher.activator().manager().calls();
        assert!(calls.contains(&WindowCall::Restore(WindowHandle::new("h2"))));
        assert!(calls.contains(&WindowCall::SetForeground(WindowHandle::new("h2"))));
    }

    #[test]
    fn test_lowercase_key_resolves_binding() {
        let mut switcher = switcher(&[("E", "Excel")], ScriptedKeyboardListener::chars(""));
        assert!(switcher.handle_key('e').is_some_and(|o| o.is_activated()));
    }

    #[test]
    fn test_missing_window_reports_not_found() {
        let mut switcher = switcher(&[("Z", "Zoom")], ScriptedKeyboardListener::chars(""));

        assert_eq!(switcher.handle_key('Z'), Some(ActivationOutcome::NotFound));
        assert_eq!(switcher.status(), &Status::NotFound("Zoom".to_string()));
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut switcher = switcher(&[("E", "Excel")], ScriptedKeyboardListener::chars(""));

        assert_eq!(switcher.handle_key('Q'), None);
        assert!(switcher.activator().manager().calls().is_empty());
        assert_eq!(switcher.status(), &Status::Ready);
    }

    #[test]
    fn test_loop_stops_on_non_letter() {
        let keys = ScriptedKeyboardListener::chars("qE1W");
        let mut switcher = switcher(&[("E", "Excel"), ("W", "Word")], keys);

        switcher.run().unwrap();

        let calls = switcher.activator().manager().calls();
        assert!(calls.contains(&WindowCall::SetForeground(WindowHandle::new("h2"))));
        // 'W' после '1' уже не обрабатывается
        assert!(!calls.contains(&WindowCall::SetForeground(WindowHandle::new("h1"))));
        assert_eq!(switcher.keys.remaining(), 1);
    }

    #[test]
    fn test_loop_skips_ignored_keys_and_exits() {
        let keys = ScriptedKeyboardListener::new([
            KeyInput::Ignored,
            KeyInput::Char('W'),
            KeyInput::Exit,
            KeyInput::Char('E'),
        ]);
        let mut switcher = switcher(&[("E", "Excel"), ("W", "Word")], keys);

        switcher.run().unwrap();

        assert_eq!(switcher.status(), &Status::Activated("Microsoft Word".to_string()));
        assert_eq!(switcher.keys.remaining(), 1);
    }

    #[test]
    fn test_render_shows_table_and_status() {
        let keys = ScriptedKeyboardListener::new([KeyInput::Char('Z'), KeyInput::Exit]);
        let mut switcher = switcher(&[("E", "Excel"), ("Z", "Zoom")], keys);

        switcher.run().unwrap();

        let output = rendered(&switcher);
        assert!(output.contains("Application"));
        let row = output
            .split("\r\n")
            .find(|line| line.starts_with("│E"))
            .expect("строка с привязкой E");
        let excel = row.find("Excel").unwrap();
        let zoom = row.find("Zoom").unwrap();
        assert!(excel < zoom, "Z стоит в правой паре: {row}");
        assert!(output.contains("Window \"Zoom\" not found."));
    }

    #[test]
    fn test_terminal_title_is_written() {
        let mut switcher = switcher(&[], ScriptedKeyboardListener::chars(""));
        switcher.set_terminal_title("App Switcher").unwrap();
        assert!(rendered(&switcher).contains("App Switcher"));
    }
}
