//! Application context - wires everything together

use custodian_bus::{BusEvent, EventBus};
use custodian_events::{Action, EventError, EventReader, EventStore, JournalRecord};
use custodian_registry::{AssetRegistry, RegistryError};
use custodian_validation::{
    AllowAll, ApprovalOutcome, ApprovalRequest, RequestId, TransferOutcome, TransferRequest,
    ValidationConfig, ValidationEngine, ValidationError,
};
use std::path::{Path, PathBuf};

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = "custodian.json";

/// Application context - wires together all components
pub struct AppContext {
    pub engine: ValidationEngine<AssetRegistry>,
    pub event_store: EventStore,
    pub bus: EventBus,
    config: ValidationConfig,
    journal_path: PathBuf,
}

impl AppContext {
    /// Create a context, loading `custodian.json` and environment overrides
    pub fn new(data_path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let data_path = data_path.as_ref();
        let config = ValidationConfig::load(data_path.join(CONFIG_FILE))?;
        Self::with_config(data_path, config)
    }

    /// Create a context with an explicit configuration
    pub fn with_config(
        data_path: impl AsRef<Path>,
        config: ValidationConfig,
    ) -> Result<Self, anyhow::Error> {
        let journal_path = data_path.as_ref().join("journal");
        let event_store = EventStore::open(&journal_path)?;
        let bus = EventBus::default();

        // Historic confirmations were authorized when they were written, so
        // replay must not depend on today's validator set.
        let mut engine = ValidationEngine::new(AssetRegistry::new(), Box::new(AllowAll));

        let records = EventReader::from_directory(&journal_path)?.read_all()?;
        for record in &records {
            apply_action(&mut engine, &record.action).map_err(|e| {
                anyhow::anyhow!("Replay failed at sequence {}: {}", record.sequence, e)
            })?;
        }
        engine.drain_events();
        engine.set_policy(config.policy());

        tracing::debug!(
            records = records.len(),
            last_sequence = event_store.last_sequence(),
            "Journal replayed"
        );

        Ok(Self {
            engine,
            event_store,
            bus,
            config,
            journal_path,
        })
    }

    /// Execute an action, then journal and publish it
    ///
    /// Flow: Apply → Journal → Publish. An action is kept only once its
    /// record is on disk; rejected or unjournaled actions leave no trace.
    pub fn execute(
        &mut self,
        action: Action,
        correlation_id: &str,
    ) -> Result<Committed, CommitError> {
        let checkpoint = self.engine.checkpoint();

        let outcome = match apply_action(&mut self.engine, &action) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.engine.restore(checkpoint);
                return Err(e);
            }
        };
        let events = self.engine.drain_events();

        let record = JournalRecord::new(
            self.event_store.last_sequence() + 1,
            self.event_store.last_hash(),
            correlation_id,
            action,
            events,
        );
        if let Err(e) = self.event_store.append(&record) {
            self.engine.restore(checkpoint);
            return Err(e.into());
        }

        for event in &record.events {
            self.bus
                .publish(BusEvent::new(record.sequence, correlation_id, event.clone()));
        }

        Ok(Committed { record, outcome })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Get journal path
    pub fn journal_path(&self) -> &Path {
        &self.journal_path
    }

    /// Get last sequence number
    pub fn last_sequence(&self) -> u64 {
        self.event_store.last_sequence()
    }
}

/// Run one action against the engine
pub fn apply_action(
    engine: &mut ValidationEngine<AssetRegistry>,
    action: &Action,
) -> Result<ActionOutcome, CommitError> {
    let outcome = match *action {
        Action::Mint { owner, asset_id } => {
            engine.ledger_mut().mint(owner, asset_id)?;
            ActionOutcome::Minted
        }
        Action::Burn { asset_id } => {
            let owner = engine.ledger_mut().burn(asset_id)?;
            ActionOutcome::Burned { owner }
        }
        Action::SubmitTransfer {
            caller,
            from,
            to,
            asset_id,
        } => ActionOutcome::Transfer(engine.submit_transfer(caller, from, to, asset_id)?),
        Action::SubmitApproval {
            owner,
            grantee,
            asset_id,
        } => ActionOutcome::Approval(engine.submit_approval(owner, grantee, asset_id)?),
        Action::SubmitApprovalForAll {
            owner,
            operator,
            grant,
        } => ActionOutcome::ApprovalForAll(engine.submit_approval_for_all(owner, operator, grant)?),
        Action::ConfirmTransfer {
            validator,
            request_id,
        } => ActionOutcome::TransferConfirmed(engine.confirm_transfer(validator, request_id)?),
        Action::ConfirmApproval {
            validator,
            request_id,
        } => ActionOutcome::ApprovalConfirmed(engine.confirm_approval(validator, request_id)?),
    };
    Ok(outcome)
}

/// What an action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Minted,
    Burned { owner: custodian_core::Address },
    Transfer(TransferOutcome),
    Approval(RequestId),
    ApprovalForAll(ApprovalOutcome),
    TransferConfirmed(TransferRequest),
    ApprovalConfirmed(ApprovalRequest),
}

/// A journaled action and its outcome
#[derive(Debug, Clone)]
pub struct Committed {
    pub record: JournalRecord,
    pub outcome: ActionOutcome,
}

/// Errors during execute
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Event store error: {0}")]
    Event(#[from] EventError),
}
