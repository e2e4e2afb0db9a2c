use crate::services::key_bindings::KeyBindings;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Row, Table, Widget},
};

const HEADER: [&str; 4] = ["Key", "Application", "Key", "Application"];

/// Таблица привязок в четыре колонки: две пары `Key | Application`.
///
/// Первая половина привязок идёт в левую пару сверху вниз, вторая - в правую.
/// При нечётном числе привязок правая пара последней строки пустая.
pub struct BindingTable {
    rows: Vec<[String; 4]>,
}

impl BindingTable {
    pub fn new(bindings: &KeyBindings) -> Self {
        let data: Vec<_> = bindings.iter().collect();
        let row_count = data.len().div_ceil(2);

        let rows = (0..row_count)
            .map(|i| {
                let (key_a, app_a) = (data[i].key.to_string(), data[i].title.clone());
                let (key_b, app_b) = data
                    .get(i + row_count)
                    .map(|b| (b.key.to_string(), b.title.clone()))
                    .unwrap_or_default();
                [key_a, app_a, key_b, app_b]
            })
            .collect();

        Self { rows }
    }

    #[cfg(test)]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn table(&self) -> Table<'_> {
        let rows = self
            .rows
            .iter()
            .map(|row| Row::new(row.iter().map(String::as_str)));

        let widths = [
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ];

        Table::new(rows, widths)
            .header(Row::new(HEADER))
            .column_spacing(2)
            .block(Block::default().borders(Borders::ALL))
    }

    /// Отрисовать таблицу шириной `width` и вернуть строки без хвостовых пробелов
    pub fn lines(&self, width: u16) -> Vec<String> {
        // Рамка сверху и снизу плюс заголовок
        let height = u16::try_from(self.rows.len() + 3).unwrap_or(u16::MAX);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        self.table().render(area, &mut buf);

        (area.top()..area.bottom())
            .map(|y| {
                let line: String = (area.left()..area.right())
                    .map(|x| buf.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                    .collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyBindingConfig;

    fn bindings(pairs: &[(&str, &str)]) -> KeyBindings {
        let entries: Vec<_> = pairs
            .iter()
            .map(|(key, title)| KeyBindingConfig::new(key, title))
            .collect();
        KeyBindings::from_config(&entries)
    }

    /// Непустые ячейки строки таблицы, слева направо
    fn cells(line: &str) -> Vec<&str> {
        line.trim_matches('│')
            .split("  ")
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect()
    }

    #[test]
    fn test_odd_count_fills_left_pair_first() {
        let table = BindingTable::new(&bindings(&[("E", "Excel"), ("M", "Outlook"), ("W", "Word")]));
        let lines = table.lines(60);

        assert_eq!(table.row_count(), 2);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with('┌'));
        assert_eq!(cells(&lines[1]), ["Key", "Application", "Key", "Application"]);
        assert_eq!(cells(&lines[2]), ["E", "Excel", "W", "Word"]);
        // Правая пара последней строки пустая
        assert_eq!(cells(&lines[3]), ["M", "Outlook"]);
        assert!(lines[4].starts_with('└'));
    }

    #[test]
    fn test_lines_fill_requested_width() {
        let table = BindingTable::new(&bindings(&[("P", "PDF-XChange Editor"), ("T", "Total Commander")]));
        let lines = table.lines(72);

        assert_eq!(cells(&lines[2]), ["P", "PDF-XChange Editor", "T", "Total Commander"]);
        // Рамка идёт во всю ширину области
        assert_eq!(lines[0].chars().count(), 72);
        assert!(lines[0].ends_with('┐'));
    }

    #[test]
    fn test_default_bindings_layout() {
        let table = BindingTable::new(&KeyBindings::from_config(
            crate::config::Config::default().bindings(),
        ));
        let lines = table.lines(80);

        // 10 привязок -> 5 строк, 'E' рядом с 'S'
        assert_eq!(table.row_count(), 5);
        assert_eq!(cells(&lines[2]), ["E", "Excel", "S", "Edge"]);
        assert_eq!(cells(&lines[6]), ["P", "PDF-XChange Editor", "Y", "OneNote"]);
    }

    #[test]
    fn test_empty_table_has_only_header() {
        let table = BindingTable::new(&KeyBindings::default());
        let lines = table.lines(40);

        assert_eq!(table.row_count(), 0);
        assert_eq!(lines.len(), 3);
        assert_eq!(cells(&lines[1]), ["Key", "Application", "Key", "Application"]);
    }
}
