//! Custodian CLI - Main entry point

use custodian_bus::LoggingSubscriber;
use custodian_core::{Address, AssetId};
use custodian_rpc::{commands, AppContext};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "custodian")]
#[command(about = "Custodian - Two-phase validation for asset transfers", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    /// Optional correlation ID recorded with the action
    #[arg(long, global = true)]
    correlation_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new asset
    Mint {
        /// Receiving account
        owner: Address,
        /// Asset id
        asset: AssetId,
    },

    /// Destroy an asset
    Burn { asset: AssetId },

    /// Submit a transfer (deferred when the caller is the owner)
    Transfer {
        /// Account issuing the call
        #[arg(long)]
        caller: Address,
        from: Address,
        to: Address,
        asset: AssetId,
    },

    /// Submit a single-asset approval
    Approve {
        owner: Address,
        grantee: Address,
        asset: AssetId,
    },

    /// Submit a blanket approval (or revoke it immediately)
    ApproveAll {
        owner: Address,
        operator: Address,
        /// Revoke instead of grant
        #[arg(long)]
        revoke: bool,
    },

    /// Confirm a pending transfer request
    ConfirmTransfer {
        #[arg(long)]
        validator: Address,
        id: u64,
    },

    /// Confirm a pending approval request
    ConfirmApproval {
        #[arg(long)]
        validator: Address,
        id: u64,
    },

    /// Show a transfer request
    Request { id: u64 },

    /// Show an approval request
    Approval { id: u64 },

    /// List requests awaiting validation
    Pending,

    /// Show the owner of an asset
    Owner { asset: AssetId },

    /// Show request counters
    Stats,

    /// Audit the journal (verify hash chain)
    Audit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let correlation_id = cli
        .correlation_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut ctx = AppContext::new(&cli.data)?;
    let logger = ctx.bus.spawn_subscriber(Arc::new(LoggingSubscriber));

    let result = match cli.command {
        Commands::Mint { owner, asset } => commands::mint(&mut ctx, owner, asset, &correlation_id),
        Commands::Burn { asset } => commands::burn(&mut ctx, asset, &correlation_id),
        Commands::Transfer {
            caller,
            from,
            to,
            asset,
        } => commands::transfer(&mut ctx, caller, from, to, asset, &correlation_id),
        Commands::Approve {
            owner,
            grantee,
            asset,
        } => commands::approve(&mut ctx, owner, grantee, asset, &correlation_id),
        Commands::ApproveAll {
            owner,
            operator,
            revoke,
        } => commands::approve_all(&mut ctx, owner, operator, !revoke, &correlation_id),
        Commands::ConfirmTransfer { validator, id } => {
            commands::confirm_transfer(&mut ctx, validator, id, &correlation_id)
        }
        Commands::ConfirmApproval { validator, id } => {
            commands::confirm_approval(&mut ctx, validator, id, &correlation_id)
        }
        Commands::Request { id } => commands::request(&ctx, id),
        Commands::Approval { id } => commands::approval(&ctx, id),
        Commands::Pending => commands::pending(&ctx),
        Commands::Owner { asset } => commands::owner(&ctx, asset),
        Commands::Stats => commands::stats(&ctx),
        Commands::Audit => commands::audit(&ctx),
    };

    // Closing the bus lets the logger drain what was published
    drop(ctx);
    logger.await?;

    result
}
