//! Aggregation and classification behind the dashboard views.
//!
//! Everything here except [`ViewAssembler`] is a pure function over its
//! input:
//! - [`group_executions`]: partition executions by batch, ids ascending
//! - [`classify`]: health label for a job's latest batch
//! - [`bound_executions`]: trailing window of at most 100 records
//! - [`truncate`]: 25-character unicode-safe prefix
//!
//! [`ViewAssembler`] combines them with store reads and agent identity into
//! the index, job list and execution list views.

pub mod assembler;
pub mod bound;
pub mod grouping;
pub mod status;
pub mod truncate;

pub use assembler::{
    assemble_executions, CommonData, ExecutionListView, ExecutionRow, IndexView, JobListView,
    JobRow, ViewAssembler, ViewDepth,
};
pub use bound::{bound_executions, MAX_DISPLAYED_EXECUTIONS};
pub use grouping::{group_executions, ExecutionGroups};
pub use status::{classify, HealthStatus};
pub use truncate::{truncate, truncate_chars, TRUNCATE_CHARS};
