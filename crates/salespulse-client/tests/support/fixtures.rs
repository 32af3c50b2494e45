#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use salespulse_client::SuccessEnvelope;
use salespulse_client::commands::common::InputOptions;
use serde_json::{Value, json};
use tempfile::{Builder, TempDir};

/// Scratch directory with an empty SalesPulse home inside it.
pub fn temp_home(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir()?;
    let home = dir.path().join("salespulse-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn write_file(dir: &Path, name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

pub fn store_entities() -> Value {
    json!([
        { "id": "S-1", "name": "Harbor Street", "metric_12v12": 25, "metric_6v6": 5, "metric_3v3": 5, "metric_2v2": 18 },
        { "id": "S-2", "name": "Mill Road", "metric_12v12": -50, "metric_6v6": -50, "metric_3v3": -50, "metric_2v2": -30, "declining_months": 5 },
        { "id": "S-3", "name": "Quay Market", "metric_12v12": -5, "metric_6v6": null, "metric_3v3": null, "metric_2v2": null },
        { "id": "S-4", "name": "Old Depot", "metric_12v12": -70, "metric_6v6": -70, "metric_3v3": -70, "metric_2v2": -70, "is_inactive": true }
    ])
}

pub fn input_for<'a>(path: &Path, home: &'a Path) -> InputOptions<'a> {
    InputOptions {
        path: path.display().to_string(),
        rules_path: None,
        stdin_override: None,
        home_override: Some(home),
    }
}

pub fn payload(result: Result<SuccessEnvelope, salespulse_client::ClientError>) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(value) = value {
            return value;
        }
    }
    Value::Null
}
