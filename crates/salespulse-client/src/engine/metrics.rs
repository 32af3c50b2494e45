use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One of the precomputed percentage-change windows carried by an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "12v12")]
    M12v12,
    #[serde(rename = "6v6")]
    M6v6,
    #[serde(rename = "3v3")]
    M3v3,
    #[serde(rename = "2v2")]
    M2v2,
}

impl MetricKey {
    /// Metric slots a long-term rule can constrain, in evaluation order.
    pub const RULE_SLOTS: [MetricKey; 3] = [Self::M12v12, Self::M6v6, Self::M3v3];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::M12v12 => "12v12",
            Self::M6v6 => "6v6",
            Self::M3v3 => "3v3",
            Self::M2v2 => "2v2",
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            Self::M12v12 => "metric_12v12",
            Self::M6v6 => "metric_6v6",
            Self::M3v3 => "metric_3v3",
            Self::M2v2 => "metric_2v2",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::M12v12 => "12/12",
            Self::M6v6 => "6/6",
            Self::M3v3 => "3/3",
            Self::M2v2 => "2/2",
        }
    }

    pub fn period(self) -> &'static str {
        match self {
            Self::M12v12 => "last 12 months vs previous 12 months",
            Self::M6v6 => "last 6 months vs previous 6 months",
            Self::M3v3 => "last 3 months vs same 3 months last year",
            Self::M2v2 => "last 2 months vs previous 2 months",
        }
    }
}

/// Percentage changes computed upstream. Missing values compare as zero.
///
/// Every metric field is written back out, as `null` when absent, so output
/// records keep the full input shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    #[serde(default)]
    pub metric_12v12: Option<f64>,
    #[serde(default)]
    pub metric_6v6: Option<f64>,
    #[serde(default)]
    pub metric_3v3: Option<f64>,
    #[serde(default)]
    pub metric_2v2: Option<f64>,
}

impl MetricSet {
    pub fn new(m12v12: f64, m6v6: f64, m3v3: f64, m2v2: f64) -> Self {
        Self {
            metric_12v12: Some(m12v12),
            metric_6v6: Some(m6v6),
            metric_3v3: Some(m3v3),
            metric_2v2: Some(m2v2),
        }
    }

    pub fn raw(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::M12v12 => self.metric_12v12,
            MetricKey::M6v6 => self.metric_6v6,
            MetricKey::M3v3 => self.metric_3v3,
            MetricKey::M2v2 => self.metric_2v2,
        }
    }

    pub fn value(&self, key: MetricKey) -> f64 {
        self.raw(key).unwrap_or(0.0)
    }
}

/// A store or product row. Everything besides the metrics passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(flatten)]
    pub metrics: MetricSet,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl EntityRecord {
    pub fn new(metrics: MetricSet) -> Self {
        Self {
            metrics,
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// Identifier rendered as text; numeric ids keep their JSON form.
    pub fn id_text(&self) -> Option<String> {
        match self.attributes.get("id")? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }

    pub fn attribute_f64(&self, key: &str) -> Option<f64> {
        let value = self.attributes.get(key)?;
        if let Some(number) = value.as_f64() {
            return Some(number);
        }
        value.as_str().and_then(|text| text.trim().parse::<f64>().ok())
    }

    pub fn is_inactive(&self) -> bool {
        match self.attributes.get("is_inactive") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(number)) => number.as_f64().is_some_and(|value| value != 0.0),
            Some(Value::String(text)) => {
                matches!(text.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
            }
            _ => false,
        }
    }
}
