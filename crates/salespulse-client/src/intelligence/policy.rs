use crate::engine::status::LongTermStatus;

/// Alert policy identifier, emitted with alert results so threshold changes stay auditable.
pub const ALERT_POLICY_VERSION: &str = "alerts/v1";

/// v1 alert selection policy.
///
/// An active entity is flagged when any trigger holds. Inactive entities are
/// never flagged.
#[derive(Debug, Clone, Copy)]
pub struct AlertPolicy {
    pub alert_status: LongTermStatus,
    pub min_declining_months: f64,
    pub steep_drop_below: f64,
}

impl AlertPolicy {
    pub fn is_alert_status(self, status: LongTermStatus) -> bool {
        status == self.alert_status
    }

    pub fn is_declining_streak(self, declining_months: Option<f64>) -> bool {
        declining_months.is_some_and(|months| months >= self.min_declining_months)
    }

    pub fn is_steep_drop(self, metric_12v12: f64) -> bool {
        metric_12v12 < self.steep_drop_below
    }
}

pub const ALERT_POLICY_V1: AlertPolicy = AlertPolicy {
    alert_status: LongTermStatus::Crash,
    min_declining_months: 3.0,
    steep_drop_below: -30.0,
};

#[cfg(test)]
mod tests {
    use crate::engine::status::LongTermStatus;
    use crate::intelligence::policy::ALERT_POLICY_V1;

    #[test]
    fn streak_threshold_is_inclusive() {
        let policy = ALERT_POLICY_V1;
        assert!(policy.is_declining_streak(Some(3.0)));
        assert!(!policy.is_declining_streak(Some(2.0)));
        assert!(!policy.is_declining_streak(None));
    }

    #[test]
    fn steep_drop_threshold_is_exclusive() {
        let policy = ALERT_POLICY_V1;
        assert!(policy.is_steep_drop(-30.1));
        assert!(!policy.is_steep_drop(-30.0));
        assert!(policy.is_alert_status(LongTermStatus::Crash));
        assert!(!policy.is_alert_status(LongTermStatus::Decline));
    }
}
