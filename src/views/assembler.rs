use std::sync::Arc;

use serde::Serialize;

use crate::cluster::Membership;
use crate::config::AgentIdentity;
use crate::scheduler::{Execution, Job};
use crate::store::Store;
use crate::views::bound::bound_executions;
use crate::views::grouping::{group_executions, ExecutionGroups};
use crate::views::status::{classify, HealthStatus};
use crate::views::truncate::truncate;

pub const DASHBOARD_PATH_PREFIX: &str = "dashboard";
pub const API_PATH_PREFIX: &str = "v1";

/// How deep below the dashboard root a view is served, which decides the
/// relative prefix its links need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDepth {
    /// `/dashboard`
    Index,
    /// `/dashboard/jobs`
    JobList,
    /// `/dashboard/jobs/{job}/executions`
    ExecutionList,
}

impl ViewDepth {
    pub fn prefix(&self) -> &'static str {
        match self {
            ViewDepth::Index => "",
            ViewDepth::JobList => "../",
            ViewDepth::ExecutionList => "../../../",
        }
    }
}

/// Identity and link metadata shared by every view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonData {
    pub version: String,
    /// Empty when no leader is currently known
    pub leader_name: String,
    pub member_name: String,
    pub backend: String,
    pub keyspace: String,
    pub path: String,
    pub api_path: String,
}

impl CommonData {
    pub fn new(identity: &AgentIdentity, leader_name: String, depth: ViewDepth) -> Self {
        let prefix = depth.prefix();
        Self {
            version: identity.version.clone(),
            leader_name,
            member_name: identity.node_name.clone(),
            backend: identity.backend.clone(),
            keyspace: identity.keyspace.clone(),
            path: format!("{}{}", prefix, DASHBOARD_PATH_PREFIX),
            api_path: format!("{}{}", prefix, API_PATH_PREFIX),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexView {
    pub common: CommonData,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRow {
    pub job: Job,
    pub status: HealthStatus,
    /// Pretty-printed JSON of the job definition
    pub definition: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobListView {
    pub common: CommonData,
    pub jobs: Vec<JobRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRow {
    #[serde(flatten)]
    pub execution: Execution,
    pub output_preview: String,
}

impl From<Execution> for ExecutionRow {
    fn from(execution: Execution) -> Self {
        let output_preview = truncate(&execution.output).to_string();
        Self {
            execution,
            output_preview,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionListView {
    pub common: CommonData,
    pub job_name: String,
    #[serde(flatten)]
    pub executions: ExecutionGroups<ExecutionRow>,
}

/// Bound a job's flat history to the display window, then group it.
pub fn assemble_executions(executions: Vec<Execution>) -> ExecutionGroups<ExecutionRow> {
    group_executions(bound_executions(executions)).map(ExecutionRow::from)
}

/// Builds render-ready views from store and membership reads.
///
/// Holds no mutable state: every call reads fresh snapshots, and a failed
/// lookup degrades to an empty field instead of failing the view.
#[derive(Clone)]
pub struct ViewAssembler {
    store: Arc<dyn Store>,
    membership: Arc<dyn Membership>,
    identity: AgentIdentity,
}

impl ViewAssembler {
    pub fn new(
        store: Arc<dyn Store>,
        membership: Arc<dyn Membership>,
        identity: AgentIdentity,
    ) -> Self {
        Self {
            store,
            membership,
            identity,
        }
    }

    async fn leader_name(&self) -> String {
        match self.membership.current_leader().await {
            Ok(Some(leader)) => leader.name,
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Leader lookup failed");
                String::new()
            }
        }
    }

    pub async fn common(&self, depth: ViewDepth) -> CommonData {
        let leader_name = self.leader_name().await;
        CommonData::new(&self.identity, leader_name, depth)
    }

    pub async fn index_view(&self) -> IndexView {
        IndexView {
            common: self.common(ViewDepth::Index).await,
        }
    }

    /// Health of a job from its latest execution group only.
    pub async fn job_status(&self, job_name: &str) -> HealthStatus {
        match self.store.latest_execution_group(job_name).await {
            Ok(latest) => classify(&latest),
            Err(e) => {
                tracing::warn!(job = %job_name, error = %e, "Latest execution group lookup failed");
                HealthStatus::Unknown
            }
        }
    }

    pub async fn job_list_view(&self) -> JobListView {
        let common = self.common(ViewDepth::JobList).await;

        let jobs = match self.store.list_jobs().await {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::warn!(error = %e, "Job listing failed");
                Vec::new()
            }
        };

        let mut rows = Vec::with_capacity(jobs.len());
        for job in jobs {
            let status = self.job_status(&job.name).await;
            let definition = job.pretty_definition().unwrap_or_else(|e| {
                tracing::warn!(job = %job.name, error = %e, "Job definition serialization failed");
                String::new()
            });
            rows.push(JobRow {
                job,
                status,
                definition,
            });
        }

        JobListView { common, jobs: rows }
    }

    pub async fn execution_list_view(&self, job_name: &str) -> ExecutionListView {
        let common = self.common(ViewDepth::ExecutionList).await;

        let executions = match self.store.list_executions(job_name).await {
            Ok(executions) => executions,
            Err(e) => {
                tracing::warn!(job = %job_name, error = %e, "Execution listing failed");
                Vec::new()
            }
        };

        ExecutionListView {
            common,
            job_name: job_name.to_string(),
            executions: assemble_executions(executions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_prefixes_follow_view_depth() {
        let identity = AgentIdentity::default();
        let index = CommonData::new(&identity, String::new(), ViewDepth::Index);
        let jobs = CommonData::new(&identity, String::new(), ViewDepth::JobList);
        let execs = CommonData::new(&identity, String::new(), ViewDepth::ExecutionList);

        assert_eq!(index.path, "dashboard");
        assert_eq!(index.api_path, "v1");
        assert_eq!(jobs.path, "../dashboard");
        assert_eq!(jobs.api_path, "../v1");
        assert_eq!(execs.path, "../../../dashboard");
        assert_eq!(execs.api_path, "../../../v1");
    }

    #[test]
    fn bounding_happens_before_grouping() {
        // 60 executions in group 1 followed by 60 in group 2: the window
        // drops the first 20 of group 1 but keeps both groups.
        let mut history: Vec<Execution> = (0..60).map(|_| Execution::new("j", 1, true)).collect();
        history.extend((0..60).map(|_| Execution::new("j", 2, false)));

        let grouped = assemble_executions(history);
        assert_eq!(grouped.len(), 100);
        assert_eq!(grouped.get(1).unwrap().len(), 40);
        assert_eq!(grouped.get(2).unwrap().len(), 60);
    }

    #[test]
    fn fully_excluded_early_groups_disappear() {
        let mut history: Vec<Execution> = (0..10).map(|_| Execution::new("j", 1, true)).collect();
        history.extend((0..100).map(|_| Execution::new("j", 2, true)));

        let grouped = assemble_executions(history);
        assert_eq!(grouped.ordered_ids, vec![2]);
    }

    #[test]
    fn execution_rows_carry_truncated_output() {
        let execution = Execution::new("j", 1, true).with_output("x".repeat(40));
        let row = ExecutionRow::from(execution);
        assert_eq!(row.output_preview, "x".repeat(25));
        assert_eq!(row.execution.output.len(), 40);
    }
}
