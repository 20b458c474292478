use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{DashboardError, Result};
use crate::scheduler::{Execution, Job};
use crate::store::{Store, StoreSnapshot};

const DEFAULT_MAX_EXECUTIONS: usize = 1_000;

#[derive(Debug, Default)]
struct Inner {
    jobs: HashMap<String, Job>,
    executions: HashMap<String, VecDeque<Execution>>,
}

/// In-process store keeping jobs and a bounded execution history per job
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    max_executions_per_job: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_EXECUTIONS)
    }

    pub fn with_capacity(max_executions_per_job: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_executions_per_job,
        }
    }

    /// Build a store from a snapshot. Executions whose job is not part of the
    /// snapshot are skipped.
    pub async fn from_snapshot(snapshot: StoreSnapshot, max_executions_per_job: usize) -> Self {
        let store = Self::with_capacity(max_executions_per_job);
        for job in snapshot.jobs {
            store.put_job(job).await;
        }
        for execution in snapshot.executions {
            if let Err(e) = store.add_execution(execution).await {
                tracing::warn!(error = %e, "Skipping execution from snapshot");
            }
        }
        store
    }

    /// Insert or replace a job definition. Returns true if the job is new.
    pub async fn put_job(&self, job: Job) -> bool {
        let mut inner = self.inner.write().await;
        inner.jobs.insert(job.name.clone(), job).is_none()
    }

    /// Append an execution to its job's history, evicting the oldest record
    /// once the per-job cap is reached.
    pub async fn add_execution(&self, execution: Execution) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.jobs.contains_key(&execution.job_name) {
            return Err(DashboardError::JobNotFound(execution.job_name));
        }

        let history = inner
            .executions
            .entry(execution.job_name.clone())
            .or_default();
        history.push_back(execution);
        while history.len() > self.max_executions_per_job {
            history.pop_front();
        }
        Ok(())
    }

    /// Number of stored jobs
    pub async fn len(&self) -> usize {
        self.inner.read().await.jobs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.jobs.is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let inner = self.inner.read().await;
        let mut jobs: Vec<Job> = inner.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(jobs)
    }

    async fn latest_execution_group(&self, job_name: &str) -> Result<Vec<Execution>> {
        let inner = self.inner.read().await;
        let Some(history) = inner.executions.get(job_name) else {
            return Ok(Vec::new());
        };
        let Some(latest) = history.iter().map(|e| e.group).max() else {
            return Ok(Vec::new());
        };
        Ok(history
            .iter()
            .filter(|e| e.group == latest)
            .cloned()
            .collect())
    }

    async fn list_executions(&self, job_name: &str) -> Result<Vec<Execution>> {
        let inner = self.inner.read().await;
        Ok(inner
            .executions
            .get(job_name)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default())
    }
}
