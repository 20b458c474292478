use serde::Serialize;

use crate::scheduler::Execution;

/// Health of a job judged from its latest execution group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// No failures in the batch
    Success,
    /// Every execution in the batch failed
    Danger,
    /// Mixed outcomes
    Warning,
    /// The job has no executions; rendered as a neutral badge
    Unknown,
}

impl HealthStatus {
    /// Classify from outcome counts within a single group.
    pub fn from_counts(succeeded: usize, failed: usize) -> Self {
        match (succeeded, failed) {
            (0, 0) => HealthStatus::Unknown,
            (_, 0) => HealthStatus::Success,
            (0, _) => HealthStatus::Danger,
            _ => HealthStatus::Warning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Success => "success",
            HealthStatus::Danger => "danger",
            HealthStatus::Warning => "warning",
            HealthStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify a job's latest execution group.
pub fn classify(latest_group: &[Execution]) -> HealthStatus {
    let succeeded = latest_group.iter().filter(|e| e.success).count();
    HealthStatus::from_counts(succeeded, latest_group.len() - succeeded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(outcomes: &[bool]) -> Vec<Execution> {
        outcomes
            .iter()
            .map(|&ok| Execution::new("job", 1, ok))
            .collect()
    }

    #[test]
    fn no_failures_is_success() {
        assert_eq!(classify(&batch(&[true])), HealthStatus::Success);
        assert_eq!(classify(&batch(&[true, true, true])), HealthStatus::Success);
    }

    #[test]
    fn only_failures_is_danger() {
        assert_eq!(classify(&batch(&[false])), HealthStatus::Danger);
        assert_eq!(classify(&batch(&[false, false])), HealthStatus::Danger);
    }

    #[test]
    fn mixed_outcomes_is_warning() {
        assert_eq!(classify(&batch(&[true, false])), HealthStatus::Warning);
        assert_eq!(classify(&batch(&[false, true, false])), HealthStatus::Warning);
    }

    #[test]
    fn empty_group_is_unknown_not_success() {
        assert_eq!(classify(&[]), HealthStatus::Unknown);
        assert_ne!(HealthStatus::from_counts(0, 0), HealthStatus::Success);
    }

    #[test]
    fn labels() {
        assert_eq!(HealthStatus::Warning.to_string(), "warning");
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unknown).unwrap(),
            "\"unknown\""
        );
    }
}
