use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded run of a job on one node.
///
/// Executions launched by the same scheduling event (a single firing fanned
/// out to several targets) share a `group` id. Ids grow with time, so a
/// larger id is a more recent batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    pub job_name: String,
    pub group: i64,
    pub success: bool,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub node_name: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default = "default_attempt")]
    pub attempt: u32,
}

fn default_attempt() -> u32 {
    1
}

impl Execution {
    pub fn new(job_name: impl Into<String>, group: i64, success: bool) -> Self {
        Self {
            job_name: job_name.into(),
            group,
            success,
            output: String::new(),
            node_name: String::new(),
            started_at: Utc::now(),
            finished_at: None,
            attempt: default_attempt(),
        }
    }

    pub fn on_node(mut self, node_name: impl Into<String>) -> Self {
        self.node_name = node_name.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }
}
