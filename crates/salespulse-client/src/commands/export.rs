use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::commands::common::{InputOptions, classify_input, parse_status_filter, retain_status};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ExportData;
use crate::engine::apply::ClassifiedEntity;
use crate::engine::metrics::MetricKey;
use crate::state::absolutize;
use crate::{ClientError, ClientResult};

pub const DEFAULT_EXPORT_NAME: &str = "salespulse";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const EXPORT_COLUMNS: [&str; 10] = [
    "id",
    "name",
    "metric_12v12",
    "metric_6v6",
    "metric_3v3",
    "metric_2v2",
    "status_long",
    "status_short",
    "is_fallback",
    "status_explanation",
];

#[derive(Debug, Default, Clone)]
pub struct ExportRunOptions<'a> {
    pub input: InputOptions<'a>,
    pub out_dir: Option<PathBuf>,
    pub name: Option<String>,
    /// Long-term status label; only matching entities are written.
    pub status: Option<String>,
    pub date_override: Option<NaiveDate>,
}

pub fn run(
    path: &str,
    rules_path: Option<&Path>,
    out_dir: Option<&Path>,
    name: Option<&str>,
    status: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ExportRunOptions {
        input: InputOptions::new(path, rules_path),
        out_dir: out_dir.map(Path::to_path_buf),
        name: name.map(str::to_string),
        status: status.map(str::to_string),
        date_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ExportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let prefix = export_prefix(options.name.as_deref())?;
    let status_filter = parse_status_filter(options.status.as_deref(), "export")?;
    let run = classify_input(&options.input)?;
    let entities = retain_status(run.classified, status_filter);

    let out_dir = absolutize(options.out_dir.as_deref().unwrap_or(Path::new(".")))?;
    let date = options
        .date_override
        .unwrap_or_else(|| Local::now().date_naive());
    let file_name = export_file_name(&prefix, date);
    let path = out_dir.join(&file_name);

    let body = render_csv(&entities).map_err(|detail| ClientError::export_failed(&path, &detail))?;
    fs::create_dir_all(&out_dir).map_err(|error| ClientError::export_failed(&path, &error.to_string()))?;
    fs::write(&path, body).map_err(|error| ClientError::export_failed(&path, &error.to_string()))?;
    info!(path = %path.display(), rows = entities.len(), "wrote classification export");

    success(
        "export",
        ExportData {
            path: path.display().to_string(),
            file_name,
            rows_written: entities.len(),
            columns: EXPORT_COLUMNS.iter().map(|column| column.to_string()).collect(),
            rules: run.rules,
            status_filter,
        },
    )
}

/// `<prefix>_<YYYY-MM-DD>.csv`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}_{}.csv", date.format("%Y-%m-%d"))
}

fn export_prefix(name: Option<&str>) -> ClientResult<String> {
    let prefix = name.map(str::trim).unwrap_or(DEFAULT_EXPORT_NAME);
    if prefix.is_empty() || prefix.contains(['/', '\\']) {
        return Err(ClientError::invalid_argument_for_command(
            "`--name` must be a non-empty file name prefix without path separators.",
            Some("export"),
        ));
    }
    Ok(prefix.to_string())
}

/// Renders the export body, BOM first so spreadsheet tools detect UTF-8.
pub fn render_csv(classified: &[ClassifiedEntity]) -> Result<Vec<u8>, String> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer
        .write_record(EXPORT_COLUMNS)
        .map_err(|error| error.to_string())?;

    for entity in classified {
        let metrics = &entity.entity.metrics;
        let row = [
            entity.id_text().unwrap_or_default(),
            entity.entity.name().unwrap_or_default().to_string(),
            metric_cell(metrics.raw(MetricKey::M12v12)),
            metric_cell(metrics.raw(MetricKey::M6v6)),
            metric_cell(metrics.raw(MetricKey::M3v3)),
            metric_cell(metrics.raw(MetricKey::M2v2)),
            entity.result.status_long.to_string(),
            entity.result.status_short.to_string(),
            entity.result.is_fallback.to_string(),
            entity.result.status_explanation.clone(),
        ];
        writer.write_record(&row).map_err(|error| error.to_string())?;
    }

    writer.into_inner().map_err(|error| error.to_string())
}

fn metric_cell(value: Option<f64>) -> String {
    value.map(|number| number.to_string()).unwrap_or_default()
}
