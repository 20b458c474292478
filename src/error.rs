use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Membership lookup failed: {0}")]
    MembershipUnavailable(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
