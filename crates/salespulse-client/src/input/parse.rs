use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::engine::metrics::{EntityRecord, MetricKey};
use crate::{ClientError, ClientResult};

const METRIC_FIELDS: [MetricKey; 4] = [
    MetricKey::M12v12,
    MetricKey::M6v6,
    MetricKey::M3v3,
    MetricKey::M2v2,
];

/// Extra CSV columns read as numbers. Alert selection relies on `declining_months`.
const NUMERIC_ATTRIBUTES: [&str; 3] = [
    "declining_months",
    "metric_peak_distance",
    "metric_3v3_yoy",
];

const BOOLEAN_ATTRIBUTES: [&str; 1] = ["is_inactive"];

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityFormat {
    JsonArray,
    Csv,
}

impl EntityFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JsonArray => "json_array",
            Self::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedEntities {
    pub format: EntityFormat,
    pub entities: Vec<EntityRecord>,
}

pub fn parse_entities(content: &str) -> ClientResult<ParsedEntities> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_entity_input("Entity source is empty."));
    }

    if looks_like_ndjson(trimmed) {
        return Err(ClientError::invalid_entity_format(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            "ndjson",
        ));
    }

    if trimmed.starts_with('[') {
        return Ok(ParsedEntities {
            format: EntityFormat::JsonArray,
            entities: parse_json_array(trimmed)?,
        });
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_entity_format(
            "JSON input must be a top-level array of entity objects.",
            "json_non_array",
        ));
    }

    if looks_like_csv(trimmed) {
        return Ok(ParsedEntities {
            format: EntityFormat::Csv,
            entities: parse_csv(trimmed)?,
        });
    }

    Err(ClientError::invalid_entity_format(
        "Unsupported entity format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> ClientResult<Vec<EntityRecord>> {
    let parsed = serde_json::from_str::<Value>(content).map_err(|_| {
        ClientError::invalid_entity_input("Invalid JSON input. Provide a valid JSON array.")
    })?;

    let Some(items) = parsed.as_array() else {
        return Err(ClientError::invalid_entity_input(
            "JSON input must be a top-level array of entity objects.",
        ));
    };

    let mut entities = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(ClientError::invalid_entity_input(
                "JSON array entries must all be objects.",
            ));
        };

        for key in METRIC_FIELDS {
            if let Some(value) = object.get(key.field_name())
                && !(value.is_number() || value.is_null())
            {
                return Err(ClientError::invalid_metric_value(
                    index + 1,
                    key.field_name(),
                    &value.to_string(),
                ));
            }
        }

        let entity = serde_json::from_value::<EntityRecord>(item.clone()).map_err(|error| {
            ClientError::invalid_entity_input(&format!("Row {}: {error}", index + 1))
        })?;
        entities.push(entity);
    }

    Ok(entities)
}

fn parse_csv(content: &str) -> ClientResult<Vec<EntityRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| ClientError::invalid_entity_input("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let has_metric_column = METRIC_FIELDS
        .iter()
        .any(|key| headers.iter().any(|header| header == key.field_name()));
    if !has_metric_column {
        return Err(ClientError::entity_schema_mismatch(expected_headers(), headers));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut entities = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|_| {
            ClientError::invalid_entity_input("CSV rows are malformed or not UTF-8.")
        })?;
        let row = row_index + 1;

        let mut object = Map::new();
        for (name, index) in &index_by_name {
            let raw = record.get(*index).unwrap_or_default();
            object.insert(name.clone(), cell_value(row, name, raw)?);
        }

        let entity = serde_json::from_value::<EntityRecord>(Value::Object(object))
            .map_err(|error| ClientError::invalid_entity_input(&format!("Row {row}: {error}")))?;
        entities.push(entity);
    }

    Ok(entities)
}

fn cell_value(row: usize, column: &str, raw: &str) -> ClientResult<Value> {
    let trimmed = raw.trim();
    let numeric = METRIC_FIELDS.iter().any(|key| key.field_name() == column)
        || NUMERIC_ATTRIBUTES.contains(&column);

    if numeric {
        if trimmed.is_empty() {
            return Ok(Value::Null);
        }
        return trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| ClientError::invalid_metric_value(row, column, raw));
    }

    if BOOLEAN_ATTRIBUTES.contains(&column) {
        return Ok(match trimmed.to_ascii_lowercase().as_str() {
            "" => Value::Null,
            "true" | "1" | "yes" => Value::Bool(true),
            "false" | "0" | "no" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        });
    }

    Ok(Value::String(raw.to_string()))
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        serde_json::from_str::<Value>(line.trim()).is_ok_and(|value| value.is_object())
    })
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

fn expected_headers() -> Vec<String> {
    let mut headers = vec!["id".to_string(), "name".to_string()];
    headers.extend(METRIC_FIELDS.iter().map(|key| key.field_name().to_string()));
    headers
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{EntityFormat, parse_entities};

    #[test]
    fn parses_json_array_with_pass_through_fields() {
        let parsed = parse_entities(
            r#"[{"id":"S-1","name":"Harbor","metric_12v12":25,"metric_6v6":null,"region":"north"}]"#,
        );
        assert!(parsed.is_ok());
        if let Ok(parsed) = parsed {
            assert_eq!(parsed.format, EntityFormat::JsonArray);
            let entity = &parsed.entities[0];
            assert_eq!(entity.metrics.metric_12v12, Some(25.0));
            assert_eq!(entity.metrics.metric_6v6, None);
            assert_eq!(entity.metrics.metric_2v2, None);
            assert_eq!(entity.attributes.get("region"), Some(&json!("north")));
            assert!(!entity.attributes.contains_key("metric_12v12"));
        }
    }

    #[test]
    fn parses_csv_with_typed_columns() {
        let parsed = parse_entities(
            "\u{feff}id,name,metric_12v12,metric_2v2,declining_months,is_inactive\nS-1,\"Harbor, North\",-12.5,,4,yes\n",
        );
        assert!(parsed.is_ok());
        if let Ok(parsed) = parsed {
            assert_eq!(parsed.format, EntityFormat::Csv);
            let entity = &parsed.entities[0];
            assert_eq!(entity.id_text(), Some("S-1".to_string()));
            assert_eq!(entity.name(), Some("Harbor, North"));
            assert_eq!(entity.metrics.metric_12v12, Some(-12.5));
            assert_eq!(entity.metrics.metric_2v2, None);
            assert_eq!(entity.attribute_f64("declining_months"), Some(4.0));
            assert!(entity.is_inactive());
        }
    }

    #[test]
    fn csv_and_json_parse_to_the_same_metrics() {
        let from_csv = parse_entities("id,metric_12v12,metric_6v6\nA,10,-3\n");
        let from_json = parse_entities(r#"[{"id":"A","metric_12v12":10,"metric_6v6":-3}]"#);
        assert!(from_csv.is_ok() && from_json.is_ok());
        if let (Ok(csv), Ok(json)) = (from_csv, from_json) {
            assert_eq!(csv.entities[0].metrics, json.entities[0].metrics);
            assert_eq!(csv.entities[0].id_text(), json.entities[0].id_text());
        }
    }

    #[test]
    fn rejects_non_numeric_metric_cell() {
        let parsed = parse_entities("id,metric_12v12\nA,lots\n");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_metric_value");
            assert!(error.message.contains("Row 1"));
            assert!(error.message.contains("metric_12v12"));
        }
    }

    #[test]
    fn rejects_string_metric_in_json() {
        let parsed = parse_entities(r#"[{"id":"A","metric_2v2":"12"}]"#);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_metric_value");
        }
    }

    #[test]
    fn rejects_csv_without_metric_columns() {
        let parsed = parse_entities("id,name\nA,Harbor\n");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "entity_schema_mismatch");
        }
    }

    #[test]
    fn rejects_ndjson_and_top_level_objects() {
        let ndjson = parse_entities("{\"id\":1}\n{\"id\":2}\n");
        assert!(ndjson.is_err());
        if let Err(error) = ndjson {
            assert_eq!(error.code, "invalid_entity_input");
            assert_eq!(
                error.data.as_ref().and_then(|data| data["received_format"].as_str()),
                Some("ndjson")
            );
        }

        let object = parse_entities("{\"id\":1,\"metric_12v12\":4}");
        assert!(object.is_err());
        if let Err(error) = object {
            assert_eq!(
                error.data.as_ref().and_then(|data| data["received_format"].as_str()),
                Some("json_non_array")
            );
        }
    }

    #[test]
    fn rejects_empty_source() {
        assert!(parse_entities("  \n").is_err());
    }
}
