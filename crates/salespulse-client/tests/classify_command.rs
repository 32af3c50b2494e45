mod support;

use salespulse_client::commands::common::InputOptions;
use salespulse_client::commands::explain::{self, ExplainRunOptions};
use salespulse_client::commands::{alerts, classify, summary};
use serde_json::json;
use support::fixtures::{input_for, payload, store_entities, temp_home, write_file};

#[test]
fn classify_applies_defaults_when_no_rules_document_exists() {
    let temp = temp_home("salespulse-classify-defaults");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let entities = write_file(dir.path(), "stores.json", &store_entities().to_string());
        assert!(entities.is_ok());
        if let Ok(path) = entities {
            let value = payload(classify::run_with_options(input_for(&path, &home).into()));
            assert_eq!(value["ok"], json!(true));
            assert_eq!(value["command"], json!("classify"));
            assert_eq!(value["data"]["rules"]["kind"], json!("defaults"));
            assert_eq!(value["data"]["input"]["format"], json!("json_array"));
            assert_eq!(value["data"]["input"]["entity_count"], json!(4));

            let rows = value["data"]["entities"].as_array().cloned().unwrap_or_default();
            assert_eq!(rows.len(), 4);
            assert_eq!(rows[0]["status_long"], json!("surge"));
            assert_eq!(rows[0]["status_short"], json!("surge"));
            assert_eq!(rows[0]["status_rule_index"], json!(1));
            assert_eq!(rows[1]["status_long"], json!("crash"));
            assert_eq!(rows[1]["status_short"], json!("alarm"));
            assert_eq!(rows[1]["declining_months"], json!(5));
            assert_eq!(rows[2]["status_long"], json!("stable"));
            assert_eq!(rows[2]["metrics_comparison"].as_array().map(Vec::len), Some(1));
        }
    }
}

#[test]
fn home_rules_document_is_merged_over_defaults() {
    let temp = temp_home("salespulse-classify-home-rules");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let rules = write_file(
            &home,
            "rules.json",
            r#"{ "long": { "surge": { "rules": [ { "metric_12v12": { "value": 30 } } ] } } }"#,
        );
        let entities = write_file(dir.path(), "stores.json", &store_entities().to_string());
        assert!(rules.is_ok() && entities.is_ok());
        if let Ok(path) = entities {
            let value = payload(classify::run_with_options(input_for(&path, &home).into()));
            assert_eq!(value["data"]["rules"]["kind"], json!("home"));
            assert_eq!(value["data"]["rules"]["shape"], json!("current"));
            assert_eq!(value["data"]["entities"][0]["status_long"], json!("growth"));
            assert_eq!(value["data"]["entities"][0]["is_fallback"], json!(true));
        }
    }
}

#[test]
fn csv_and_json_inputs_classify_identically() {
    let temp = temp_home("salespulse-classify-csv");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let csv_body = "id,name,metric_12v12,metric_6v6,metric_3v3,metric_2v2\n\
S-1,Harbor Street,25,5,5,18\n\
S-2,Mill Road,-50,-50,-50,-30\n\
S-3,Quay Market,-5,,,\n";
        let json_body = json!([
            { "id": "S-1", "name": "Harbor Street", "metric_12v12": 25, "metric_6v6": 5, "metric_3v3": 5, "metric_2v2": 18 },
            { "id": "S-2", "name": "Mill Road", "metric_12v12": -50, "metric_6v6": -50, "metric_3v3": -50, "metric_2v2": -30 },
            { "id": "S-3", "name": "Quay Market", "metric_12v12": -5, "metric_6v6": null, "metric_3v3": null, "metric_2v2": null }
        ]);
        let csv_path = write_file(dir.path(), "stores.csv", csv_body);
        let json_path = write_file(dir.path(), "stores.json", &json_body.to_string());
        assert!(csv_path.is_ok() && json_path.is_ok());
        if let (Ok(csv_path), Ok(json_path)) = (csv_path, json_path) {
            let from_csv = payload(classify::run_with_options(input_for(&csv_path, &home).into()));
            let from_json = payload(classify::run_with_options(input_for(&json_path, &home).into()));
            assert_eq!(from_csv["data"]["input"]["format"], json!("csv"));
            assert_eq!(from_csv["data"]["entities"], from_json["data"]["entities"]);
        }
    }
}

#[test]
fn stdin_input_is_supported() {
    let temp = temp_home("salespulse-classify-stdin");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let result = classify::run_with_options(InputOptions {
            path: "-".to_string(),
            rules_path: None,
            stdin_override: Some(store_entities().to_string()),
            home_override: Some(&home),
        }
        .into());
        let value = payload(result);
        assert_eq!(value["data"]["input"]["kind"], json!("stdin"));
        assert_eq!(value["data"]["input"]["path"], json!(null));
    }
}

#[test]
fn explicit_missing_rules_file_is_an_error() {
    let temp = temp_home("salespulse-classify-missing-rules");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let entities = write_file(dir.path(), "stores.json", &store_entities().to_string());
        assert!(entities.is_ok());
        if let Ok(path) = entities {
            let mut options = input_for(&path, &home);
            options.rules_path = Some(dir.path().join("absent.json"));
            let result = classify::run_with_options(options.into());
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "rules_not_found");
            }
        }
    }
}

#[test]
fn malformed_rules_document_is_reported() {
    let temp = temp_home("salespulse-classify-bad-rules");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let rules = write_file(dir.path(), "rules.json", "{ not json");
        let entities = write_file(dir.path(), "stores.json", &store_entities().to_string());
        assert!(rules.is_ok() && entities.is_ok());
        if let (Ok(rules), Ok(path)) = (rules, entities) {
            let mut options = input_for(&path, &home);
            options.rules_path = Some(rules);
            let result = classify::run_with_options(options.into());
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "rules_invalid");
            }
        }
    }
}

#[test]
fn explain_returns_the_audit_trail_for_one_entity() {
    let temp = temp_home("salespulse-explain");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let entities = write_file(dir.path(), "stores.json", &store_entities().to_string());
        assert!(entities.is_ok());
        if let Ok(path) = entities {
            let value = payload(explain::run_with_options(ExplainRunOptions {
                input: input_for(&path, &home),
                entity_id: "S-1".to_string(),
            }));
            assert_eq!(value["data"]["entity_id"], json!("S-1"));
            assert_eq!(value["data"]["status_explanation"], json!("matched rule 1"));
            assert_eq!(value["data"]["metrics_comparison"][0]["rule"], json!("≥ 20%"));
            assert_eq!(value["data"]["metrics_comparison"][0]["actual"], json!("25.0%"));

            let missing = explain::run_with_options(ExplainRunOptions {
                input: input_for(&path, &home),
                entity_id: "S-404".to_string(),
            });
            assert!(missing.is_err());
            if let Err(error) = missing {
                assert_eq!(error.code, "entity_not_found");
            }
        }
    }
}

#[test]
fn alerts_and_summary_skip_inactive_entities() {
    let temp = temp_home("salespulse-alerts");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let entities = write_file(dir.path(), "stores.json", &store_entities().to_string());
        assert!(entities.is_ok());
        if let Ok(path) = entities {
            let alerts = payload(alerts::run_with_options(input_for(&path, &home)));
            assert_eq!(alerts["data"]["policy_version"], json!("alerts/v1"));
            let rows = alerts["data"]["alerts"].as_array().cloned().unwrap_or_default();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0]["id"], json!("S-2"));
            assert_eq!(
                rows[0]["reasons"],
                json!(["crash_status", "declining_streak", "steep_annual_drop"])
            );

            let summary = payload(summary::run_with_options(input_for(&path, &home)));
            assert_eq!(summary["data"]["totals"]["entities"], json!(4));
            assert_eq!(summary["data"]["totals"]["inactive"], json!(1));
            assert_eq!(summary["data"]["alert_count"], json!(1));
            assert_eq!(summary["data"]["long_term"][4]["status"], json!("crash"));
            assert_eq!(summary["data"]["long_term"][4]["count"], json!(2));
        }
    }
}
