use std::io;

use serde_json::Value;

use super::format;

pub fn render_rules_defaults(data: &Value) -> io::Result<String> {
    let config = data
        .get("config")
        .ok_or_else(|| io::Error::other("rules defaults output requires config"))?;

    let mut lines = vec![
        "Built-in classification rules.".to_string(),
        "Save this document as rules.json and edit it; omitted fields keep these values."
            .to_string(),
        String::new(),
    ];
    lines.push(pretty(config)?);
    Ok(lines.join("\n"))
}

pub fn render_rules_check(data: &Value) -> io::Result<String> {
    let path = data
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("rules check output requires path"))?;
    let config = data
        .get("config")
        .ok_or_else(|| io::Error::other("rules check output requires config"))?;
    let shape = data.get("shape").and_then(Value::as_str).unwrap_or("unknown");
    let matches_defaults = data
        .get("matches_defaults")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut lines = vec!["Rules document is valid.".to_string(), String::new()];
    lines.extend(format::key_value_rows(&[
        ("Path:", path.to_string()),
        ("Shape:", shape_label(shape).to_string()),
        (
            "Defaults:",
            if matches_defaults {
                "identical to the built-in rules".to_string()
            } else {
                "overrides the built-in rules".to_string()
            },
        ),
    ]));
    lines.push(String::new());
    lines.push("Effective rules:".to_string());
    lines.push(pretty(config)?);
    Ok(lines.join("\n"))
}

fn shape_label(shape: &str) -> &str {
    match shape {
        "current" => "current (long/short/fallback)",
        "legacy_flat" => "legacy flat document, migrated",
        "legacy_thresholds" => "legacy thresholds document, migrated",
        "empty" => "empty, built-in rules apply",
        other => other,
    }
}

fn pretty(value: &Value) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_rules_check, render_rules_defaults};

    #[test]
    fn defaults_print_the_document() {
        let rendered = render_rules_defaults(&json!({ "config": { "long": {} } }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Built-in classification rules."));
            assert!(text.contains("\"long\": {}"));
        }
    }

    #[test]
    fn check_describes_legacy_migration() {
        let rendered = render_rules_check(&json!({
            "path": "/tmp/rules.json",
            "shape": "legacy_flat",
            "matches_defaults": false,
            "config": {}
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("  Path:      /tmp/rules.json"));
            assert!(text.contains("  Shape:     legacy flat document, migrated"));
            assert!(text.contains("  Defaults:  overrides the built-in rules"));
            assert!(text.ends_with("Effective rules:\n{}"));
        }
    }

    #[test]
    fn check_names_the_thresholds_form() {
        let rendered = render_rules_check(&json!({
            "path": "settings.json",
            "shape": "legacy_thresholds",
            "matches_defaults": false,
            "config": {}
        }));
        assert!(rendered.is_ok_and(|text| text.contains("legacy thresholds document, migrated")));
    }

    #[test]
    fn check_requires_a_path() {
        assert!(render_rules_check(&json!({ "config": {} })).is_err());
    }
}
