#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub const fn left(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Left,
        }
    }

    pub const fn right(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Right,
        }
    }
}

const INDENT: &str = "  ";
const COLUMN_GAP: &str = "  ";
const DEFAULT_WIDTH: usize = 120;
const MIN_WIDTH: usize = 40;

/// Terminal width from `COLUMNS`, clamped to a usable minimum.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_WIDTH)
        .max(MIN_WIDTH)
}

pub fn key_value_rows(entries: &[(&str, String)]) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|(label, value)| format!("{INDENT}{}  {value}", pad(label, label_width, Align::Left)))
        .collect()
}

/// Renders an aligned table, or one block per row when the table would not
/// fit in `max_width`. Cell text is never truncated.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);
    let table_width = INDENT.len()
        + widths.iter().sum::<usize>()
        + COLUMN_GAP.len() * columns.len().saturating_sub(1);
    if table_width > max_width {
        return render_blocks(columns, rows, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();

    let mut output = Vec::with_capacity(rows.len() + 1);
    output.push(format_row(columns, &header, &widths));
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .chain([display_width(column.name)])
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let cell = cells.get(index).map(String::as_str).unwrap_or("");
            pad(cell, *width, column.align)
        })
        .collect::<Vec<String>>();

    format!("{INDENT}{}", pieces.join(COLUMN_GAP)).trim_end().to_string()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(|label| display_width(label)).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("{INDENT}{block_label} {}:", row_index + 1));
        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).map(String::as_str).unwrap_or("");
            output.push(format!(
                "{INDENT}{INDENT}{}  {value}",
                pad(label, label_width, Align::Left)
            ));
        }
    }
    output
}

// Counts chars, not bytes, so labels such as `≥ 20%` line up.
fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn pad(value: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    match align {
        Align::Left => format!("{value}{fill}"),
        Align::Right => format!("{fill}{value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, key_value_rows, render_table_or_blocks};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(&[
            ("Entities:", "12".to_string()),
            ("Fallback:", "3".to_string()),
            ("Rules source:", "built-in defaults".to_string()),
        ]);
        assert_eq!(rows[0], "  Entities:      12");
        assert_eq!(rows[2], "  Rules source:  built-in defaults");
    }

    #[test]
    fn table_aligns_columns_and_counts_unicode_as_one_column() {
        let columns = [Column::left("Rule"), Column::right("Actual")];
        let rows = vec![
            vec!["≥ 20%".to_string(), "25.0%".to_string()],
            vec!["between -10% and 10%".to_string(), "-5.0%".to_string()],
        ];
        let rendered = render_table_or_blocks(&columns, &rows, 80, "Row");
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0], "  Rule                  Actual");
        assert_eq!(rendered[1], "  ≥ 20%                  25.0%");
        assert_eq!(rendered[2], "  between -10% and 10%   -5.0%");
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let columns = [Column::left("Name"), Column::left("Explanation")];
        let rows = vec![
            vec!["Harbor Street".to_string(), "matched rule 1".to_string()],
            vec!["Mill Road".to_string(), "fallback rule".to_string()],
        ];
        let rendered = render_table_or_blocks(&columns, &rows, 20, "Entity");
        assert_eq!(rendered[0], "  Entity 1:");
        assert_eq!(rendered[1], "    Name:         Harbor Street");
        assert_eq!(rendered[2], "    Explanation:  matched rule 1");
        assert_eq!(rendered[3], "");
        assert_eq!(rendered[4], "  Entity 2:");
    }
}
