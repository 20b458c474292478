use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a job may start while a previous run is still in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Concurrency {
    #[default]
    Allow,
    Forbid,
}

impl std::fmt::Display for Concurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Concurrency::Allow => write!(f, "allow"),
            Concurrency::Forbid => write!(f, "forbid"),
        }
    }
}

/// A named, schedulable unit of work as persisted by the agent.
///
/// The dashboard never mutates a job; the whole definition is shown to the
/// operator as pretty-printed JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub schedule: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub owner_email: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub retries: u32,
    #[serde(default)]
    pub concurrency: Concurrency,
    #[serde(default)]
    pub executor: String,
    #[serde(default)]
    pub executor_config: BTreeMap<String, String>,
    #[serde(default)]
    pub parent_job: Option<String>,
    #[serde(default)]
    pub dependent_jobs: Vec<String>,
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub last_success: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_error: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(name: impl Into<String>, schedule: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            schedule: schedule.into(),
            timezone: None,
            owner: String::new(),
            owner_email: String::new(),
            disabled: false,
            tags: BTreeMap::new(),
            retries: 0,
            concurrency: Concurrency::default(),
            executor: "shell".to_string(),
            executor_config: BTreeMap::new(),
            parent_job: None,
            dependent_jobs: Vec::new(),
            success_count: 0,
            error_count: 0,
            last_success: None,
            last_error: None,
        }
    }

    pub fn with_executor_config(mut self, key: &str, value: &str) -> Self {
        self.executor_config
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Two-space indented JSON of the full definition
    pub fn pretty_definition(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_defaults() {
        let job = Job::new("backup", "@every 1h");
        assert_eq!(job.name, "backup");
        assert_eq!(job.schedule, "@every 1h");
        assert_eq!(job.executor, "shell");
        assert_eq!(job.concurrency, Concurrency::Allow);
        assert!(!job.disabled);
        assert!(job.last_success.is_none());
    }

    #[test]
    fn pretty_definition_is_indented_json() {
        let job = Job::new("backup", "@daily").with_executor_config("command", "tar czf /b.tgz /data");
        let pretty = job.pretty_definition().unwrap();
        assert!(pretty.contains("\n  \"name\": \"backup\""));
        assert!(pretty.contains("\"command\": \"tar czf /b.tgz /data\""));

        let parsed: Job = serde_json::from_str(&pretty).unwrap();
        assert_eq!(parsed, job);
    }

    #[test]
    fn minimal_definition_deserializes() {
        let job: Job = serde_json::from_str(r#"{"name":"cleanup","schedule":"@hourly"}"#).unwrap();
        assert_eq!(job.name, "cleanup");
        assert!(job.tags.is_empty());
        assert_eq!(job.concurrency, Concurrency::Allow);
        assert_eq!(job.executor, "");
    }

    #[test]
    fn concurrency_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Concurrency::Forbid).unwrap(),
            "\"forbid\""
        );
        assert_eq!(Concurrency::Allow.to_string(), "allow");
    }
}
