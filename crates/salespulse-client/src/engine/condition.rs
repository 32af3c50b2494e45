use serde::{Deserialize, Serialize};

/// Comparison applied between a metric value and a configured threshold.
///
/// Operators arrive from user-edited documents, so any unknown text is kept
/// as [`Operator::Unrecognized`] instead of failing the whole document. An
/// unrecognized operator never satisfies a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Gte,
    Gt,
    Lte,
    Lt,
    Eq,
    Between,
    Unrecognized(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gte => ">=",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Lt => "<",
            Self::Eq => "=",
            Self::Between => "between",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Applies a single-threshold comparison. `Between` needs two bounds and
    /// is handled by [`check_condition`]; here it never matches.
    pub fn compare(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Gte => value >= threshold,
            Self::Gt => value > threshold,
            Self::Lte => value <= threshold,
            Self::Lt => value < threshold,
            Self::Eq => value == threshold,
            Self::Between | Self::Unrecognized(_) => false,
        }
    }

    fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::Gte => Some("≥"),
            Self::Gt => Some(">"),
            Self::Lte => Some("≤"),
            Self::Lt => Some("<"),
            Self::Eq => Some("="),
            Self::Between | Self::Unrecognized(_) => None,
        }
    }
}

impl From<String> for Operator {
    fn from(value: String) -> Self {
        match value.trim() {
            ">=" => Self::Gte,
            ">" => Self::Gt,
            "<=" => Self::Lte,
            "<" => Self::Lt,
            "=" | "==" => Self::Eq,
            "between" => Self::Between,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<&str> for Operator {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Operator> for String {
    fn from(value: Operator) -> Self {
        value.as_str().to_string()
    }
}

/// One threshold test against one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCondition {
    pub enabled: bool,
    pub operator: Operator,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<f64>,
}

impl MetricCondition {
    pub fn new(operator: Operator, value: f64) -> Self {
        Self {
            enabled: true,
            operator,
            value,
            value2: None,
        }
    }

    pub fn between(low: f64, high: f64) -> Self {
        Self {
            enabled: true,
            operator: Operator::Between,
            value: low,
            value2: Some(high),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            operator: Operator::Gte,
            value: 0.0,
            value2: None,
        }
    }

    /// Inclusive range for `between`, normalized so the bounds may be given in either order.
    pub fn range(&self) -> (f64, f64) {
        let other = self.value2.unwrap_or(self.value);
        (self.value.min(other), self.value.max(other))
    }

    /// Human-readable rule text shown in the audit trail, e.g. `≥ 20%`.
    pub fn describe(&self) -> String {
        if self.operator == Operator::Between {
            let (low, high) = self.range();
            return format!(
                "between {}% and {}%",
                format_number(low),
                format_number(high)
            );
        }
        match self.operator.symbol() {
            Some(symbol) => format!("{symbol} {}%", format_number(self.value)),
            None => format!("unknown operator {}", self.operator.as_str()),
        }
    }
}

/// Evaluates one condition. A disabled condition does not constrain anything.
pub fn check_condition(value: Option<f64>, condition: &MetricCondition) -> bool {
    if !condition.enabled {
        return true;
    }
    let actual = value.unwrap_or(0.0);
    if condition.operator == Operator::Between {
        let (low, high) = condition.range();
        return low <= actual && actual <= high;
    }
    condition.operator.compare(actual, condition.value)
}

/// Formats an actual metric value for comparison rows: one decimal and a percent sign.
pub fn format_percent(value: Option<f64>) -> String {
    format!("{:.1}%", value.unwrap_or(0.0))
}

/// Percent with an explicit `+` for gains; `-` when the value is missing.
pub fn format_signed_percent(value: Option<f64>) -> String {
    match value {
        Some(number) if number > 0.0 => format!("+{number:.1}%"),
        Some(number) => format!("{number:.1}%"),
        None => "-".to_string(),
    }
}

fn format_number(value: f64) -> String {
    if value == 0.0 {
        // avoids rendering "-0"
        return "0".to_string();
    }
    format!("{value}")
}
