//! Shape migration and field-level merge of user rules documents.
//!
//! Saved documents evolve over time: older ones lack `fallback`, the oldest
//! have no `long`/`short` split at all, either as status labels at the top
//! level or as the eight-number thresholds form. Shape detection lives here
//! and only here, so the classifiers only ever see a complete [`RulesConfig`].

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::warn;

use crate::engine::status::LongTermStatus;
use crate::rules::defaults::default_rules_config;
use crate::rules::model::RulesConfig;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigShape {
    /// `{ long, short, fallback }`, any of them possibly partial.
    Current,
    /// Status labels at the top level with no `long` key.
    LegacyFlat,
    /// Flat `growth_long`, `stable_low_short`, ... numbers.
    LegacyThresholds,
    /// Nothing recognizable; every field comes from defaults.
    Empty,
}

/// Keys of the thresholds form: one number per boundary and horizon.
pub const LEGACY_THRESHOLD_KEYS: [&str; 8] = [
    "growth_long",
    "stable_high_long",
    "stable_low_long",
    "crash_long",
    "growth_short",
    "stable_high_short",
    "stable_low_short",
    "crash_short",
];

/// Fields whose explicit `null` clears the default instead of keeping it.
const NULLABLE_FIELDS: [&str; 1] = ["value2"];

pub fn detect_shape(document: &Value) -> ConfigShape {
    let Some(object) = document.as_object() else {
        return ConfigShape::Empty;
    };

    if object.contains_key("long") {
        return ConfigShape::Current;
    }

    let has_flat_status = LongTermStatus::PRIORITY
        .iter()
        .any(|status| object.contains_key(status.as_str()));
    if has_flat_status {
        return ConfigShape::LegacyFlat;
    }

    if LEGACY_THRESHOLD_KEYS
        .iter()
        .any(|key| object.contains_key(*key))
    {
        return ConfigShape::LegacyThresholds;
    }

    if object.contains_key("short") || object.contains_key("fallback") {
        return ConfigShape::Current;
    }

    ConfigShape::Empty
}

/// Rewrites a legacy flat document into the current shape.
///
/// Each top-level status may hold `{ "rules": [...] }`, a bare rules array,
/// or a single rule object.
pub fn migrate_legacy(document: &Value) -> Value {
    let Some(object) = document.as_object() else {
        return Value::Object(Map::new());
    };

    let mut long = Map::new();
    let mut migrated = Map::new();
    for (key, value) in object {
        if LongTermStatus::parse(key).is_some() {
            long.insert(key.clone(), normalize_status_entry(value));
        } else {
            migrated.insert(key.clone(), value.clone());
        }
    }
    migrated.insert("long".to_string(), Value::Object(long));
    Value::Object(migrated)
}

/// Rewrites the thresholds form into a current-shape overlay.
///
/// The thresholds form has no surge tier, so a `growth_long` value disables
/// the surge rule and growth becomes `12v12 >= growth_long`. The stable band
/// runs from `stable_low_long` to `stable_high_long`, decline from
/// `crash_long` up to `stable_low_long`, and crash is `12v12 < crash_long`.
/// Short-term rungs take `growth_short`, `stable_low_short` and
/// `crash_short`. The ladder has a single bound per rung, so
/// `stable_high_short` has nothing to map onto. Keys that are absent keep
/// their defaults through the merge.
pub fn migrate_legacy_thresholds(document: &Value, source: &str) -> ClientResult<Value> {
    let Some(object) = document.as_object() else {
        return Ok(Value::Object(Map::new()));
    };
    let threshold = |key: &str| -> ClientResult<Option<f64>> {
        match object.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| {
                ClientError::rules_invalid(source, &format!("`{key}` must be a number"))
            }),
        }
    };

    let mut long = Map::new();
    if let Some(growth) = threshold("growth_long")? {
        long.insert("surge".to_string(), first_rule(json!({ "enabled": false })));
        long.insert(
            "growth".to_string(),
            first_rule_on_12v12(json!({ "operator": ">=", "value": growth, "value2": null })),
        );
    }
    let stable_low = threshold("stable_low_long")?;
    let stable_high = threshold("stable_high_long")?;
    if stable_low.is_some() || stable_high.is_some() {
        long.insert(
            "stable".to_string(),
            first_rule_on_12v12(between_overlay(stable_low, stable_high)),
        );
    }
    let crash = threshold("crash_long")?;
    if crash.is_some() || stable_low.is_some() {
        long.insert(
            "decline".to_string(),
            first_rule_on_12v12(between_overlay(crash, stable_low)),
        );
    }
    if let Some(crash) = crash {
        long.insert(
            "crash".to_string(),
            first_rule_on_12v12(json!({ "operator": "<", "value": crash, "value2": null })),
        );
    }

    let mut short = Map::new();
    for (status, key) in [
        ("surge", "growth_short"),
        ("stable", "stable_low_short"),
        ("decline", "crash_short"),
    ] {
        if let Some(value) = threshold(key)? {
            short.insert(status.to_string(), json!({ "threshold": value }));
        }
    }

    Ok(json!({ "long": long, "short": short }))
}

fn first_rule(rule: Value) -> Value {
    wrap_rules(vec![rule])
}

fn first_rule_on_12v12(condition: Value) -> Value {
    first_rule(json!({ "enabled": true, "metric_12v12": condition }))
}

fn between_overlay(low: Option<f64>, high: Option<f64>) -> Value {
    let mut condition = Map::new();
    condition.insert("operator".to_string(), json!("between"));
    if let Some(low) = low {
        condition.insert("value".to_string(), json!(low));
    }
    if let Some(high) = high {
        condition.insert("value2".to_string(), json!(high));
    }
    Value::Object(condition)
}

fn normalize_status_entry(value: &Value) -> Value {
    match value {
        Value::Array(rules) => wrap_rules(rules.clone()),
        Value::Object(entry) if entry.contains_key("rules") => value.clone(),
        Value::Object(entry) if entry.keys().any(|key| key.starts_with("metric_")) => {
            wrap_rules(vec![value.clone()])
        }
        other => other.clone(),
    }
}

fn wrap_rules(rules: Vec<Value>) -> Value {
    let mut entry = Map::new();
    entry.insert("rules".to_string(), Value::Array(rules));
    Value::Object(entry)
}

/// Overlays `overlay` onto `base` field by field.
///
/// Objects merge per key and arrays merge per index, so a user document that
/// tweaks one threshold of one rule keeps every other default. A `null`
/// overlay counts as absent, except on optional fields such as `value2`
/// where it clears the default. Scalars in the overlay win.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (_, Value::Null) => base.clone(),
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let value = match (base_map.get(key), overlay_value) {
                    (_, Value::Null) if NULLABLE_FIELDS.contains(&key.as_str()) => Value::Null,
                    (Some(base_value), _) => deep_merge(base_value, overlay_value),
                    (None, _) => overlay_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        (Value::Array(base_items), Value::Array(overlay_items)) => {
            let length = base_items.len().max(overlay_items.len());
            let merged = (0..length)
                .map(|index| match (base_items.get(index), overlay_items.get(index)) {
                    (Some(base_item), Some(overlay_item)) => deep_merge(base_item, overlay_item),
                    (Some(base_item), None) => base_item.clone(),
                    (None, Some(overlay_item)) => overlay_item.clone(),
                    (None, None) => Value::Null,
                })
                .collect();
            Value::Array(merged)
        }
        (_, overlay_value) => overlay_value.clone(),
    }
}

/// Result of loading a user rules document.
#[derive(Debug, Clone)]
pub struct MergedRules {
    pub shape: ConfigShape,
    pub config: RulesConfig,
}

/// Migrates and merges a possibly partial document against the built-in defaults.
pub fn merge_with_defaults(document: &Value) -> ClientResult<RulesConfig> {
    merge_document(document, "inline").map(|merged| merged.config)
}

pub fn merge_document(document: &Value, source: &str) -> ClientResult<MergedRules> {
    if !document.is_object() && !document.is_null() {
        return Err(ClientError::rules_invalid(
            source,
            "top-level value must be a JSON object",
        ));
    }

    let shape = detect_shape(document);
    let normalized = match shape {
        ConfigShape::LegacyFlat => migrate_legacy(document),
        ConfigShape::LegacyThresholds => migrate_legacy_thresholds(document, source)?,
        ConfigShape::Current => document.clone(),
        ConfigShape::Empty => {
            if let Some(object) = document.as_object().filter(|object| !object.is_empty()) {
                let keys = object.keys().cloned().collect::<Vec<String>>().join(", ");
                warn!(
                    source,
                    keys = %keys,
                    "rules document has no recognizable fields; using built-in rules"
                );
            }
            document.clone()
        }
    };

    let defaults = serde_json::to_value(default_rules_config())
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    let merged = deep_merge(&defaults, &normalized);

    let config = serde_json::from_value::<RulesConfig>(merged)
        .map_err(|error| ClientError::rules_invalid(source, &error.to_string()))?;

    Ok(MergedRules { shape, config })
}
