pub mod execution;
pub mod job;

pub use execution::Execution;
pub use job::{Concurrency, Job};
