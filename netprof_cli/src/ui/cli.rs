use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use netprof_core::core::profile::active_profile;
use netprof_core::{
    ActionOrchestrator, Confirm, ProfileRecord, SessionConfig, SessionManager, WorkflowKind,
    WorkflowOutcome,
};
use netprof_grpc::{GrpcProfileService, DEFAULT_DAEMON_ADDR};

use super::prompt::{AssumeYes, TerminalConfirm};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "netprof", version, subcommand_required = true)]
pub struct Args {
    /// Daemon gRPC endpoint
    #[arg(long, global = true, env = "NETPROF_DAEMON_ADDR", default_value = DEFAULT_DAEMON_ADDR)]
    pub daemon_addr: String,

    /// Upper bound for every daemon call, in milliseconds
    #[arg(
        long,
        global = true,
        env = "NETPROF_TIMEOUT_MS",
        default_value_t = 3000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Answer every confirmation with yes
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Print profile lists as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every profile the daemon knows, marking the active one
    List,
    /// Make a profile the active one
    Select {
        /// Profile to activate
        name: String,
    },
    /// Delete a profile
    Remove {
        /// Profile to delete
        name: String,
    },
    /// Create a new profile
    Add {
        /// Name of the new profile
        name: String,
    },
}

pub async fn run_cli(args: Args) -> Result<()> {
    let rpc_timeout = Duration::from_millis(args.timeout_ms);
    let service = GrpcProfileService::connect_lazy(&args.daemon_addr, rpc_timeout)?;
    let session = SessionManager::new(
        Arc::new(service),
        SessionConfig::default().with_rpc_timeout(rpc_timeout),
    );
    let confirm: Arc<dyn Confirm> = if args.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(TerminalConfirm)
    };
    let orchestrator = ActionOrchestrator::new(session, confirm);

    match args.command {
        Command::List => {
            let profiles = orchestrator
                .session()
                .list_profiles()
                .await
                .context("get profiles")?;
            print_profiles(&profiles, args.json)?;
        }
        Command::Select { name } => {
            // The switch workflow checks the target against the current list.
            load(&orchestrator).await?;
            let outcome = orchestrator
                .switch_profile(&name)
                .await
                .context(WorkflowKind::Switch.failure_context())?;
            report(WorkflowKind::Switch, &name, outcome, args.json)?;
        }
        Command::Remove { name } => {
            load(&orchestrator).await?;
            let outcome = orchestrator
                .remove_profile(&name)
                .await
                .context(WorkflowKind::Remove.failure_context())?;
            report(WorkflowKind::Remove, &name, outcome, args.json)?;
        }
        Command::Add { name } => {
            let outcome = orchestrator
                .create_profile(&name)
                .await
                .context(WorkflowKind::Create.failure_context())?;
            report(WorkflowKind::Create, &name, outcome, args.json)?;
        }
    }
    Ok(())
}

async fn load(orchestrator: &ActionOrchestrator) -> Result<()> {
    let profiles = orchestrator
        .session()
        .list_profiles()
        .await
        .context("get profiles")?;
    match active_profile(&profiles) {
        Some(active) => info!("Loaded {} profiles, '{}' active", profiles.len(), active.name),
        None => info!("Loaded {} profiles, none active", profiles.len()),
    }
    Ok(())
}

fn report(kind: WorkflowKind, name: &str, outcome: WorkflowOutcome, json: bool) -> Result<()> {
    match outcome {
        WorkflowOutcome::Completed {
            profiles,
            refresh_error,
        } => {
            println!("{}", kind.success_message(name));
            if let Some(e) = refresh_error {
                eprintln!("warning: could not reload profiles: {e}");
            }
            print_profiles(&profiles, json)?;
        }
        WorkflowOutcome::AlreadyActive => println!("Profile '{name}' is already active"),
        WorkflowOutcome::Declined => println!("Cancelled"),
        WorkflowOutcome::Deferred => {
            println!("Creating profiles is not supported by this client yet; '{name}' was not created")
        }
    }
    Ok(())
}

fn print_profiles(profiles: &[ProfileRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(profiles)?);
        return Ok(());
    }
    if profiles.is_empty() {
        println!("No profiles");
        return Ok(());
    }
    for p in profiles {
        let marker = if p.is_active { "✓" } else { " " };
        let state = if p.is_active { "Active" } else { "" };
        println!("{marker} {:<24} {state}", p.name);
    }
    Ok(())
}
