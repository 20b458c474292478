use std::net::SocketAddr;
use std::path::PathBuf;

/// Identity of the agent serving the dashboard.
///
/// Built once at startup and handed to the view assembler; every view echoes
/// these values back to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentIdentity {
    /// Scheduler version string
    pub version: String,
    /// Name of the node serving requests
    pub node_name: String,
    /// Storage backend identifier (e.g. "etcd", "memory")
    pub backend: String,
    /// Keyspace jobs and executions live under in the backend
    pub keyspace: String,
}

impl Default for AgentIdentity {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            node_name: "node-1".to_string(),
            backend: "memory".to_string(),
            keyspace: "schedview".to_string(),
        }
    }
}

impl AgentIdentity {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            ..Default::default()
        }
    }

    pub fn with_backend(mut self, backend: impl Into<String>, keyspace: impl Into<String>) -> Self {
        self.backend = backend.into();
        self.keyspace = keyspace.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub listen_addr: SocketAddr,
    pub identity: AgentIdentity,
    /// Directory holding the UI assets. Files under `<ui_dir>/static` are
    /// served for any unmatched path below `/dashboard`.
    pub ui_dir: Option<PathBuf>,
    /// Executions retained per job by the in-memory store
    pub max_executions_per_job: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            // SAFETY: This is a hardcoded valid address that will always parse
            listen_addr: "127.0.0.1:8080"
                .parse()
                .expect("default listen address is valid"),
            identity: AgentIdentity::default(),
            ui_dir: None,
            max_executions_per_job: 1_000,
        }
    }
}

impl DashboardConfig {
    pub fn new(listen_addr: SocketAddr, identity: AgentIdentity) -> Self {
        Self {
            listen_addr,
            identity,
            ..Default::default()
        }
    }

    pub fn with_ui_dir(mut self, ui_dir: PathBuf) -> Self {
        self.ui_dir = Some(ui_dir);
        self
    }

    /// Directory static assets are served from, if a UI directory is configured.
    pub fn static_dir(&self) -> Option<PathBuf> {
        self.ui_dir.as_ref().map(|dir| dir.join("static"))
    }
}
