//! CLI commands

use custodian_core::{Address, AssetId};
use custodian_events::{verify_chain, Action, EventReader};
use custodian_registry::AssetLedger;
use custodian_validation::{ApprovalOutcome, RequestId, TransferOutcome};

use crate::context::{ActionOutcome, AppContext};

/// Create a new asset
pub fn mint(
    ctx: &mut AppContext,
    owner: Address,
    asset: AssetId,
    correlation_id: &str,
) -> Result<(), anyhow::Error> {
    let committed = ctx.execute(
        Action::Mint {
            owner,
            asset_id: asset,
        },
        correlation_id,
    )?;

    println!(
        "✅ Minted {} to {} (seq: {})",
        asset, owner, committed.record.sequence
    );
    Ok(())
}

/// Destroy an asset
pub fn burn(ctx: &mut AppContext, asset: AssetId, correlation_id: &str) -> Result<(), anyhow::Error> {
    let committed = ctx.execute(Action::Burn { asset_id: asset }, correlation_id)?;

    if let ActionOutcome::Burned { owner } = committed.outcome {
        println!(
            "✅ Burned {} held by {} (seq: {})",
            asset, owner, committed.record.sequence
        );
    }
    Ok(())
}

/// Submit a transfer
pub fn transfer(
    ctx: &mut AppContext,
    caller: Address,
    from: Address,
    to: Address,
    asset: AssetId,
    correlation_id: &str,
) -> Result<(), anyhow::Error> {
    let committed = ctx.execute(
        Action::SubmitTransfer {
            caller,
            from,
            to,
            asset_id: asset,
        },
        correlation_id,
    )?;

    match committed.outcome {
        ActionOutcome::Transfer(TransferOutcome::Deferred(id)) => println!(
            "⏳ Transfer of {} from {} to {} awaiting validation (request: {})",
            asset, from, to, id
        ),
        ActionOutcome::Transfer(TransferOutcome::Executed) => println!(
            "✅ Transferred {} from {} to {} by operator {}",
            asset, from, to, caller
        ),
        _ => {}
    }
    Ok(())
}

/// Submit a single-asset approval
pub fn approve(
    ctx: &mut AppContext,
    owner: Address,
    grantee: Address,
    asset: AssetId,
    correlation_id: &str,
) -> Result<(), anyhow::Error> {
    let committed = ctx.execute(
        Action::SubmitApproval {
            owner,
            grantee,
            asset_id: asset,
        },
        correlation_id,
    )?;

    if let ActionOutcome::Approval(id) = committed.outcome {
        println!(
            "⏳ Approval of {} for {} awaiting validation (request: {})",
            grantee, asset, id
        );
    }
    Ok(())
}

/// Submit a blanket approval or revocation
pub fn approve_all(
    ctx: &mut AppContext,
    owner: Address,
    operator: Address,
    grant: bool,
    correlation_id: &str,
) -> Result<(), anyhow::Error> {
    let committed = ctx.execute(
        Action::SubmitApprovalForAll {
            owner,
            operator,
            grant,
        },
        correlation_id,
    )?;

    match committed.outcome {
        ActionOutcome::ApprovalForAll(ApprovalOutcome::Deferred(id)) => println!(
            "⏳ Operator {} for {} awaiting validation (request: {})",
            operator, owner, id
        ),
        ActionOutcome::ApprovalForAll(ApprovalOutcome::Revoked) => {
            println!("✅ Operator {} revoked for {}", operator, owner)
        }
        _ => {}
    }
    Ok(())
}

/// Confirm a pending transfer
pub fn confirm_transfer(
    ctx: &mut AppContext,
    validator: Address,
    id: RequestId,
    correlation_id: &str,
) -> Result<(), anyhow::Error> {
    let committed = ctx.execute(
        Action::ConfirmTransfer {
            validator,
            request_id: id,
        },
        correlation_id,
    )?;

    if let ActionOutcome::TransferConfirmed(request) = committed.outcome {
        println!(
            "✅ Transfer request {} confirmed: {} now owned by {}",
            id, request.asset_id, request.to
        );
    }
    Ok(())
}

/// Confirm a pending approval
pub fn confirm_approval(
    ctx: &mut AppContext,
    validator: Address,
    id: RequestId,
    correlation_id: &str,
) -> Result<(), anyhow::Error> {
    let committed = ctx.execute(
        Action::ConfirmApproval {
            validator,
            request_id: id,
        },
        correlation_id,
    )?;

    if let ActionOutcome::ApprovalConfirmed(request) = committed.outcome {
        match request.asset_id() {
            Some(asset) => println!(
                "✅ Approval request {} confirmed: {} may move {}",
                id, request.grantee, asset
            ),
            None => println!(
                "✅ Approval request {} confirmed: {} is operator for {}",
                id, request.grantee, request.owner
            ),
        }
    }
    Ok(())
}

/// Show a transfer request
pub fn request(ctx: &AppContext, id: RequestId) -> Result<(), anyhow::Error> {
    let request = ctx.engine.request_by_id(id)?;
    println!("{}", serde_json::to_string_pretty(request)?);
    Ok(())
}

/// Show an approval request
pub fn approval(ctx: &AppContext, id: RequestId) -> Result<(), anyhow::Error> {
    let request = ctx.engine.approval_by_id(id)?;
    println!("{}", serde_json::to_string_pretty(request)?);
    Ok(())
}

/// List requests awaiting validation
pub fn pending(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let transfers = ctx.engine.pending_transfers();
    let approvals = ctx.engine.pending_approvals();

    if transfers.is_empty() && approvals.is_empty() {
        println!("No pending requests");
        return Ok(());
    }

    for (id, request) in transfers {
        println!(
            "transfer #{:<4} {} {} -> {}",
            id, request.asset_id, request.from, request.to
        );
    }
    for (id, request) in approvals {
        let scope = match request.asset_id() {
            Some(asset) => asset.to_string(),
            None => "ALL".to_string(),
        };
        println!(
            "approval #{:<4} {} {} -> {}",
            id, scope, request.owner, request.grantee
        );
    }
    Ok(())
}

/// Show ownership and permissions of an asset
pub fn owner(ctx: &AppContext, asset: AssetId) -> Result<(), anyhow::Error> {
    let ledger = ctx.engine.ledger();
    let owner = ledger.owner_of(asset)?;

    println!("Asset {}: owner {}", asset, owner);
    if let Some(approved) = ledger.get_approved(asset)? {
        println!("          approved {}", approved);
    }
    println!("          owner holds {} asset(s)", ledger.balance_of(&owner));
    Ok(())
}

/// Show request counters
pub fn stats(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let stats = ctx.engine.stats();

    println!(
        "Transfers: {} total ({} pending, {} confirmed)",
        ctx.engine.total_transfer_requests(),
        stats.pending_transfers,
        stats.confirmed_transfers
    );
    println!(
        "Approvals: {} total ({} pending, {} confirmed)",
        ctx.engine.total_approval_requests(),
        stats.pending_approvals,
        stats.confirmed_approvals
    );
    println!("Journal:   {} records", ctx.last_sequence());
    Ok(())
}

/// Verify the journal hash chain
pub fn audit(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let records = EventReader::from_directory(ctx.journal_path())?.read_all()?;

    match verify_chain(&records) {
        Ok(()) => {
            println!("✅ Hash chain verified ({} records)", records.len());
            Ok(())
        }
        Err(e) => {
            println!("❌ Hash chain broken: {}", e);
            Err(e.into())
        }
    }
}
