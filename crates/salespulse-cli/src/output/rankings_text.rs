use std::io;

use serde_json::Value;

use super::classify_text::{percent, rules_label, scalar_text};
use super::format::{self, Column};

pub fn render_rankings(data: &Value) -> io::Result<String> {
    let mut lines = vec![format!("Rankings ({})", rules_label(data))];
    for (title, key, include_sales) in [
        ("Top sales:", "by_sales", true),
        ("Strongest growth:", "by_growth", false),
        ("Most stable:", "by_stability", false),
        ("Weakest performers:", "bottom", false),
    ] {
        let rows = list(data, key)?;
        lines.push(String::new());
        lines.push(title.to_string());
        if rows.is_empty() {
            lines.push("  No entities.".to_string());
            continue;
        }
        lines.extend(ranked_table(rows, include_sales));
    }

    lines.push(String::new());
    lines.push("Inactive:".to_string());
    let inactive = list(data, "inactive")?;
    if inactive.is_empty() {
        lines.push("  None.".to_string());
    } else {
        let columns = [
            Column::left("ID"),
            Column::left("Name"),
            Column::left("Long-term"),
            Column::left("Last active"),
        ];
        let rows = inactive
            .iter()
            .map(|entity| {
                vec![
                    scalar_text(entity.get("id")),
                    scalar_text(entity.get("name")),
                    scalar_text(entity.get("status_long")),
                    scalar_text(entity.get("last_active_month")),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table_or_blocks(
            &columns,
            &rows,
            format::terminal_width(),
            "Entity",
        ));
    }

    Ok(lines.join("\n"))
}

fn list<'a>(data: &'a Value, key: &str) -> io::Result<&'a Vec<Value>> {
    data.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("rankings output requires {key}")))
}

fn ranked_table(rows: &[Value], include_sales: bool) -> Vec<String> {
    let mut columns = vec![
        Column::right("#"),
        Column::left("ID"),
        Column::left("Name"),
        Column::left("Long-term"),
        Column::right("12/12"),
    ];
    if include_sales {
        columns.push(Column::right("Sales"));
    }
    let cells = rows
        .iter()
        .map(|entity| {
            let mut row = vec![
                scalar_text(entity.get("rank")),
                scalar_text(entity.get("id")),
                scalar_text(entity.get("name")),
                scalar_text(entity.get("status_long")),
                percent(entity, "metric_12v12"),
            ];
            if include_sales {
                row.push(scalar_text(entity.get("total_sales")));
            }
            row
        })
        .collect::<Vec<Vec<String>>>();
    format::render_table_or_blocks(&columns, &cells, format::terminal_width(), "Rank")
}
