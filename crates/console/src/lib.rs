use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::info;
use types::{
    config::ConsoleConfig,
    errors::{ConsoleError, WalletError},
    participant::{Participant, ParticipantId},
    workflow::WorkflowState,
};
use wallet::WalletBackend;

pub mod assembler;
pub mod collector;
pub mod instances;
pub mod lifecycle;
pub mod proposal;
pub mod registry;

mod guard;

use guard::OpGuard;
use instances::InstanceMap;
use registry::ParticipantRegistry;

/// The QA console core: the fixed participant roster, the live-connection
/// map, and the single in-flight transaction workflow. The UI layer reads
/// cloned snapshots and invokes the operation methods; all mutation happens
/// in here.
pub struct Console {
    config: ConsoleConfig,
    backend: Box<dyn WalletBackend>,
    registry: ParticipantRegistry,
    instances: InstanceMap,
    workflow: Mutex<WorkflowState>,
    ops: OpGuard,
}

impl Console {
    pub fn new(
        config: ConsoleConfig,
        backend: Box<dyn WalletBackend>,
    ) -> Result<Self, ConsoleError> {
        config.validate()?;
        info!(
            "Console up: {}-of-{} on {}",
            config.required_signatures,
            config.participant_count(),
            config.network
        );

        Ok(Self {
            registry: ParticipantRegistry::from_config(&config),
            instances: InstanceMap::default(),
            workflow: Mutex::new(WorkflowState::default()),
            ops: OpGuard::default(),
            backend,
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    #[must_use]
    pub const fn required_signatures(&self) -> usize {
        self.config.required_signatures
    }

    pub async fn participants(&self) -> Vec<Participant> {
        self.registry.snapshot().await
    }

    pub async fn participant(&self, id: ParticipantId) -> Result<Participant, ConsoleError> {
        self.registry.get(id).await
    }

    /// Cloned snapshot of the single in-flight workflow.
    pub async fn workflow(&self) -> WorkflowState {
        self.workflow.lock().await.clone()
    }

    pub async fn has_live_connection(&self, id: ParticipantId) -> bool {
        self.instances.contains(id).await
    }

    /// Bounds a wallet call so a hung connection surfaces as an error
    /// instead of an indefinitely in-progress step.
    pub(crate) async fn deadline<T, F>(&self, fut: F) -> Result<T, WalletError>
    where
        F: Future<Output = Result<T, WalletError>>,
    {
        let limit = Duration::from_secs(self.config.sync_timeout_secs);
        match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(WalletError::Rpc(format!(
                "No response within {}s",
                self.config.sync_timeout_secs
            ))),
        }
    }
}

#[cfg(test)]
mod tests;
