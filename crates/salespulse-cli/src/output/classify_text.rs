use std::io;

use salespulse_client::engine::condition::format_signed_percent;
use serde_json::Value;

use super::format::{self, Column};

pub fn render_classify(data: &Value) -> io::Result<String> {
    let entities = data
        .get("entities")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("classify output requires entities"))?;

    let status_filter = data.get("status_filter").and_then(Value::as_str);
    if entities.is_empty() {
        return Ok(match status_filter {
            Some(status) => format!("No entities have long-term status {status}."),
            None => "No entities found in the input.".to_string(),
        });
    }

    let heading = match status_filter {
        Some(status) => {
            let total = data
                .get("input")
                .and_then(|input| input.get("entity_count"))
                .and_then(Value::as_u64)
                .unwrap_or(entities.len() as u64);
            format!(
                "{} of {total} {} have long-term status {status} ({}).",
                entities.len(),
                plural(total as usize, "entity", "entities"),
                rules_label(data)
            )
        }
        None => format!(
            "Classified {} {} using {}.",
            entities.len(),
            plural(entities.len(), "entity", "entities"),
            rules_label(data)
        ),
    };
    let mut lines = vec![heading, String::new()];

    let columns = [
        Column::left("ID"),
        Column::left("Name"),
        Column::right("12/12"),
        Column::right("6/6"),
        Column::right("3/3"),
        Column::right("2/2"),
        Column::left("Long-term"),
        Column::left("Short-term"),
        Column::left("Explanation"),
    ];
    let rows = entities
        .iter()
        .map(|entity| {
            vec![
                scalar_text(entity.get("id")),
                scalar_text(entity.get("name")),
                percent(entity, "metric_12v12"),
                percent(entity, "metric_6v6"),
                percent(entity, "metric_3v3"),
                percent(entity, "metric_2v2"),
                scalar_text(entity.get("status_long")),
                scalar_text(entity.get("status_short")),
                scalar_text(entity.get("status_explanation")),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &rows,
        format::terminal_width(),
        "Entity",
    ));

    let fallback = data
        .get("fallback_count")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if fallback > 0 {
        lines.push(String::new());
        lines.push(format!(
            "{fallback} of {} matched no primary rule. Run `salespulse explain <path> <id>` to see why.",
            entities.len()
        ));
    }

    Ok(lines.join("\n"))
}

pub fn render_explain(data: &Value) -> io::Result<String> {
    let entity_id = data
        .get("entity_id")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("explain output requires entity_id"))?;
    let heading = match data.get("name").and_then(Value::as_str) {
        Some(name) => format!("Entity {entity_id} ({name})"),
        None => format!("Entity {entity_id}"),
    };

    let is_fallback = data
        .get("is_fallback")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let mut lines = vec![heading, String::new()];
    lines.extend(format::key_value_rows(&[
        ("Long-term:", scalar_text(data.get("status_long"))),
        ("Short-term:", scalar_text(data.get("status_short"))),
        ("Explanation:", scalar_text(data.get("status_explanation"))),
        ("Rule:", scalar_text(data.get("status_rule_index"))),
        ("Fallback:", yes_no(is_fallback)),
        ("Rules:", rules_label(data)),
    ]));

    lines.push(String::new());
    lines.push("Metric comparison:".to_string());
    let comparison = data
        .get("metrics_comparison")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if comparison.is_empty() {
        lines.push("  No rule matched, so the default status applies.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column::left("Metric"),
        Column::left("Period"),
        Column::left("Rule"),
        Column::right("Actual"),
        Column::left("Passed"),
    ];
    let rows = comparison
        .iter()
        .map(|row| {
            vec![
                scalar_text(row.get("name")),
                scalar_text(row.get("period")),
                scalar_text(row.get("rule")),
                scalar_text(row.get("actual")),
                yes_no(row.get("passed").and_then(Value::as_bool).unwrap_or(false)),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &rows,
        format::terminal_width(),
        "Condition",
    ));

    Ok(lines.join("\n"))
}

pub fn render_alerts(data: &Value) -> io::Result<String> {
    let alerts = data
        .get("alerts")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("alerts output requires alerts"))?;

    if alerts.is_empty() {
        return Ok("No alerts. Every active entity is within the alert thresholds.".to_string());
    }

    let mut lines = vec![
        format!(
            "{} {} need attention (policy {}):",
            alerts.len(),
            plural(alerts.len(), "entity", "entities"),
            scalar_text(data.get("policy_version"))
        ),
        String::new(),
    ];

    let columns = [
        Column::left("ID"),
        Column::left("Name"),
        Column::left("Long-term"),
        Column::right("12/12"),
        Column::right("Declining"),
        Column::left("Reasons"),
    ];
    let rows = alerts
        .iter()
        .map(|alert| {
            let reasons = alert
                .get("reasons")
                .and_then(Value::as_array)
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<&str>>()
                        .join(", ")
                })
                .unwrap_or_default();
            vec![
                scalar_text(alert.get("id")),
                scalar_text(alert.get("name")),
                scalar_text(alert.get("status_long")),
                percent(alert, "metric_12v12"),
                scalar_text(alert.get("declining_months")),
                reasons,
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &rows,
        format::terminal_width(),
        "Alert",
    ));

    Ok(lines.join("\n"))
}

pub fn render_summary(data: &Value) -> io::Result<String> {
    let totals = data
        .get("totals")
        .ok_or_else(|| io::Error::other("summary output requires totals"))?;

    let mut lines = vec![format!("Status summary ({})", rules_label(data)), String::new()];
    lines.push("Totals:".to_string());
    lines.extend(format::key_value_rows(&[
        ("Entities:", scalar_text(totals.get("entities"))),
        ("Active:", scalar_text(totals.get("active"))),
        ("Inactive:", scalar_text(totals.get("inactive"))),
        ("Fallback:", scalar_text(totals.get("fallback"))),
        ("Alerts:", scalar_text(data.get("alert_count"))),
    ]));

    for (title, key) in [
        ("Long-term status:", "long_term"),
        ("Short-term status:", "short_term"),
    ] {
        lines.push(String::new());
        lines.push(title.to_string());
        let counts = data
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let entries = counts
            .iter()
            .map(|count| {
                (
                    count.get("status").and_then(Value::as_str).unwrap_or("unknown"),
                    scalar_text(count.get("count")),
                )
            })
            .collect::<Vec<(&str, String)>>();
        lines.extend(format::key_value_rows(&entries));
    }

    Ok(lines.join("\n"))
}

pub fn render_export(data: &Value) -> io::Result<String> {
    let path = data
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("export output requires path"))?;
    let rows = data.get("rows_written").and_then(Value::as_u64).unwrap_or(0);
    Ok(format!(
        "Wrote {rows} {} to {path}.",
        plural(rows as usize, "row", "rows")
    ))
}

pub(super) fn rules_label(data: &Value) -> String {
    data.get("rules")
        .and_then(|rules| rules.get("path"))
        .and_then(Value::as_str)
        .map(|path| format!("rules from {path}"))
        .unwrap_or_else(|| "built-in default rules".to_string())
}

pub(super) fn percent(row: &Value, key: &str) -> String {
    format_signed_percent(row.get(key).and_then(Value::as_f64))
}

pub(super) fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
