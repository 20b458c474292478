use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use schedview::cluster::{Member, MemberList};
use schedview::config::{AgentIdentity, DashboardConfig};
use schedview::dashboard::{run_dashboard, DashboardState};
use schedview::shutdown::install_shutdown_handler;
use schedview::store::{MemoryStore, StoreSnapshot};
use schedview::views::{truncate, ExecutionListView, JobListView, ViewAssembler};

#[derive(Parser, Debug)]
#[command(name = "schedview")]
#[command(version)]
#[command(about = "Read-only execution dashboard for a distributed job scheduler")]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the dashboard over HTTP
    Serve(ServeArgs),

    /// Print every job with its health
    Jobs {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the grouped execution history of a job
    Executions {
        /// Job name
        job: String,

        #[command(flatten)]
        source: SourceArgs,
    },
}

// =============================================================================
// Arguments
// =============================================================================

#[derive(Parser, Debug)]
struct IdentityArgs {
    /// Name of this node
    #[arg(long, default_value = "node-1")]
    node_name: String,

    /// Storage backend identifier shown to operators
    #[arg(long, default_value = "memory")]
    backend: String,

    /// Keyspace in the storage backend
    #[arg(long, default_value = "schedview")]
    keyspace: String,

    /// Name of the current cluster leader, if known
    #[arg(long)]
    leader: Option<String>,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Port for the dashboard
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Directory containing the UI; assets are served from <ui-dir>/static
    #[arg(long)]
    ui_dir: Option<PathBuf>,

    /// JSON snapshot of jobs and executions to serve
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Executions kept per job
    #[arg(long, default_value = "1000")]
    max_executions: usize,

    #[command(flatten)]
    identity: IdentityArgs,
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// JSON snapshot of jobs and executions
    #[arg(long)]
    snapshot: PathBuf,

    /// Output format
    #[arg(long, short = 'o', default_value = "table")]
    output: OutputFormat,

    #[command(flatten)]
    identity: IdentityArgs,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// =============================================================================
// Helper Functions
// =============================================================================

impl IdentityArgs {
    fn identity(&self) -> AgentIdentity {
        AgentIdentity::new(self.node_name.clone())
            .with_backend(self.backend.clone(), self.keyspace.clone())
    }

    async fn membership(&self) -> MemberList {
        // Nothing heartbeats from the CLI, so members never expire.
        let members = MemberList::new(u64::MAX);
        members.join(Member::new(self.node_name.clone(), "local")).await;
        if let Some(leader) = &self.leader {
            if *leader != self.node_name {
                members.join(Member::new(leader.clone(), "remote")).await;
            }
            members.set_leader(Some(leader.clone())).await;
        }
        members
    }
}

async fn build_assembler(
    identity: &IdentityArgs,
    snapshot: Option<&Path>,
    max_executions: usize,
) -> Result<ViewAssembler, Box<dyn std::error::Error>> {
    let snapshot = match snapshot {
        Some(path) => StoreSnapshot::load(path).await?,
        None => StoreSnapshot::default(),
    };
    let store = MemoryStore::from_snapshot(snapshot, max_executions).await;
    let membership = identity.membership().await;

    Ok(ViewAssembler::new(
        Arc::new(store),
        Arc::new(membership),
        identity.identity(),
    ))
}

fn print_jobs(view: &JobListView) {
    if view.jobs.is_empty() {
        println!("No jobs found.");
        return;
    }

    println!("{:<26} {:<9} {:<20} EXECUTOR", "JOB", "STATUS", "SCHEDULE");
    println!("{}", "-".repeat(70));
    for row in &view.jobs {
        println!(
            "{:<26} {:<9} {:<20} {}",
            truncate(&row.job.name),
            row.status,
            truncate(&row.job.schedule),
            row.job.executor
        );
    }
    println!();
    println!("Leader: {}", or_dash(&view.common.leader_name));
}

fn print_executions(view: &ExecutionListView) {
    println!("Job: {}", view.job_name);
    if view.executions.is_empty() {
        println!("No executions found.");
        return;
    }

    for group in &view.executions.ordered_ids {
        let Some(rows) = view.executions.get(*group) else {
            continue;
        };
        println!();
        println!("Group {}", group);
        println!("{:<26} {:<8} {:<26} OUTPUT", "NODE", "RESULT", "STARTED");
        println!("{}", "-".repeat(78));
        for row in rows {
            let result = if row.execution.success { "ok" } else { "failed" };
            println!(
                "{:<26} {:<8} {:<26} {}",
                or_dash(truncate(&row.execution.node_name)),
                result,
                row.execution.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
                row.output_preview.replace('\n', " ")
            );
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

// =============================================================================
// Command Handlers
// =============================================================================

async fn run_server(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let listen_addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    let mut config = DashboardConfig::new(listen_addr, args.identity.identity());
    config.max_executions_per_job = args.max_executions;
    if let Some(ui_dir) = args.ui_dir.clone() {
        config = config.with_ui_dir(ui_dir);
    }

    tracing::info!(
        listen_addr = %config.listen_addr,
        node_name = %config.identity.node_name,
        backend = %config.identity.backend,
        keyspace = %config.identity.keyspace,
        ui_dir = ?config.ui_dir,
        "Starting schedview"
    );

    let assembler = build_assembler(
        &args.identity,
        args.snapshot.as_deref(),
        config.max_executions_per_job,
    )
    .await?;

    let shutdown = install_shutdown_handler();
    run_dashboard(
        config.listen_addr,
        DashboardState { assembler },
        config.static_dir(),
        shutdown,
    )
    .await;
    Ok(())
}

async fn handle_jobs(source: SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let assembler = build_assembler(
        &source.identity,
        Some(source.snapshot.as_path()),
        DashboardConfig::default().max_executions_per_job,
    )
    .await?;
    let view = assembler.job_list_view().await;

    match source.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Table => print_jobs(&view),
    }
    Ok(())
}

async fn handle_executions(job: String, source: SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let assembler = build_assembler(
        &source.identity,
        Some(source.snapshot.as_path()),
        DashboardConfig::default().max_executions_per_job,
    )
    .await?;
    let view = assembler.execution_list_view(&job).await;

    match source.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Table => print_executions(&view),
    }
    Ok(())
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr so table and JSON output stay clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Serve(serve_args) => run_server(serve_args).await?,
        Commands::Jobs { source } => handle_jobs(source).await?,
        Commands::Executions { job, source } => handle_executions(job, source).await?,
    }

    Ok(())
}
