mod support;

use std::fs;

use chrono::NaiveDate;
use salespulse_client::commands::export::{self, ExportRunOptions};
use salespulse_client::commands::rules;
use serde_json::json;
use support::fixtures::{input_for, payload, store_entities, temp_home, write_file};

#[test]
fn rules_defaults_prints_a_complete_document() {
    let value = payload(rules::defaults());
    assert_eq!(value["command"], json!("rules defaults"));
    let config = &value["data"]["config"];
    assert_eq!(config["long"]["surge"]["rules"].as_array().map(Vec::len), Some(3));
    assert_eq!(config["long"]["surge"]["rules"][0]["metric_12v12"]["operator"], json!(">="));
    assert_eq!(config["short"]["decline"]["threshold"], json!(-25.0));
    assert_eq!(config["fallback"]["growth"]["metric"], json!("6v6"));
}

#[test]
fn rules_check_migrates_legacy_documents() {
    let temp = temp_home("salespulse-rules-check");
    assert!(temp.is_ok());
    if let Ok((dir, _home)) = temp {
        let legacy = write_file(
            dir.path(),
            "legacy.json",
            r#"{ "crash": { "metric_12v12": { "value": -40 } } }"#,
        );
        assert!(legacy.is_ok());
        if let Ok(path) = legacy {
            let value = payload(rules::check(&path));
            assert_eq!(value["data"]["shape"], json!("legacy_flat"));
            assert_eq!(value["data"]["matches_defaults"], json!(false));
            assert_eq!(
                value["data"]["config"]["long"]["crash"]["rules"][0]["metric_12v12"]["value"],
                json!(-40.0)
            );
        }

        let empty = write_file(dir.path(), "empty.json", "{}");
        assert!(empty.is_ok());
        if let Ok(path) = empty {
            let value = payload(rules::check(&path));
            assert_eq!(value["data"]["shape"], json!("empty"));
            assert_eq!(value["data"]["matches_defaults"], json!(true));
        }
    }
}

#[test]
fn rules_check_rejects_non_object_documents() {
    let temp = temp_home("salespulse-rules-array");
    assert!(temp.is_ok());
    if let Ok((dir, _home)) = temp {
        let array = write_file(dir.path(), "rules.json", "[1, 2]");
        assert!(array.is_ok());
        if let Ok(path) = array {
            let result = rules::check(&path);
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "rules_invalid");
            }
        }
    }
}

#[test]
fn export_writes_dated_csv_with_bom() {
    let temp = temp_home("salespulse-export");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let entities = write_file(dir.path(), "stores.json", &store_entities().to_string());
        assert!(entities.is_ok());
        if let Ok(path) = entities {
            let out_dir = dir.path().join("exports");
            let value = payload(export::run_with_options(ExportRunOptions {
                input: input_for(&path, &home),
                out_dir: Some(out_dir.clone()),
                name: Some("stores".to_string()),
                status: None,
                date_override: NaiveDate::from_ymd_opt(2026, 10, 17),
            }));
            assert_eq!(value["data"]["file_name"], json!("stores_2026-10-17.csv"));
            assert_eq!(value["data"]["rows_written"], json!(4));

            let written = fs::read(out_dir.join("stores_2026-10-17.csv"));
            assert!(written.is_ok());
            if let Ok(bytes) = written {
                assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
                let text = String::from_utf8_lossy(&bytes[3..]).to_string();
                assert_eq!(text.lines().count(), 5);
                assert!(text.contains("S-2,Mill Road,-50,-50,-50,-30,crash,alarm,false,matched rule 1"));
            }
        }
    }
}

#[test]
fn export_rejects_name_with_path_separator() {
    let temp = temp_home("salespulse-export-name");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let entities = write_file(dir.path(), "stores.json", &store_entities().to_string());
        assert!(entities.is_ok());
        if let Ok(path) = entities {
            let result = export::run_with_options(ExportRunOptions {
                input: input_for(&path, &home),
                out_dir: Some(dir.path().to_path_buf()),
                name: Some("../escape".to_string()),
                status: None,
                date_override: None,
            });
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "invalid_argument");
            }
        }
    }
}

#[test]
fn exported_csv_can_be_classified_again() {
    let temp = temp_home("salespulse-export-roundtrip");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let entities = write_file(dir.path(), "stores.json", &store_entities().to_string());
        assert!(entities.is_ok());
        if let Ok(path) = entities {
            let exported = payload(export::run_with_options(ExportRunOptions {
                input: input_for(&path, &home),
                out_dir: Some(dir.path().to_path_buf()),
                name: None,
                status: None,
                date_override: NaiveDate::from_ymd_opt(2026, 1, 2),
            }));
            let csv_path = dir.path().join("salespulse_2026-01-02.csv");
            assert_eq!(exported["data"]["path"], json!(csv_path.display().to_string()));

            let again = payload(salespulse_client::commands::classify::run_with_options(
                input_for(&csv_path, &home).into(),
            ));
            let rows = again["data"]["entities"].as_array().cloned().unwrap_or_default();
            assert_eq!(rows.len(), 4);
            assert_eq!(rows[1]["status_long"], json!("crash"));
            assert_eq!(rows[1]["status_explanation"], json!("matched rule 1"));
        }
    }
}
