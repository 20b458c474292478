//! Read access to persisted jobs and executions.
//!
//! The dashboard only ever reads through [`Store`]. Implementations return
//! owned snapshots so callers never hold a store lock while assembling a view.
//!
//! - [`MemoryStore`]: bounded in-process store, used by the CLI and tests
//! - [`StoreSnapshot`]: JSON dump of jobs and executions that seeds a [`MemoryStore`]

use async_trait::async_trait;

use crate::error::Result;
use crate::scheduler::{Execution, Job};

pub mod memory;
pub mod snapshot;

pub use memory::MemoryStore;
pub use snapshot::StoreSnapshot;

#[async_trait]
pub trait Store: Send + Sync {
    /// All jobs, ordered by name.
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    /// Executions of the job's most recent group. Empty when the job has
    /// never run.
    async fn latest_execution_group(&self, job_name: &str) -> Result<Vec<Execution>>;

    /// Every retained execution of the job in arrival order.
    async fn list_executions(&self, job_name: &str) -> Result<Vec<Execution>>;
}
