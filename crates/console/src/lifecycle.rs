use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};
use types::{
    errors::ConsoleError,
    participant::{ParticipantId, ParticipantStatus},
    transaction::NATIVE_TOKEN,
};
use wallet::WalletConnection;

use crate::Console;

impl Console {
    /// Brings one participant's wallet up: connecting -> syncing -> ready,
    /// with the readiness poll bounded by the configured timeout. Any
    /// failure tears the partial connection down, parks the participant in
    /// error, and registers nothing in the instance map.
    pub async fn start_participant(&self, id: ParticipantId) -> Result<(), ConsoleError> {
        let participant = self.registry.get(id).await?;
        let _op = self.ops.begin(id)?;

        if !participant.status.can_start() {
            return Err(ConsoleError::InvalidStatus {
                id,
                status: participant.status,
            });
        }

        info!("Starting participant {id} ({})", participant.name);
        self.registry
            .update(id, |p| {
                p.status = ParticipantStatus::Connecting;
                p.error = None;
            })
            .await?;

        match self.bring_up(id).await {
            Ok((connection, address, balance)) => {
                self.instances.insert(id, connection).await;
                self.registry
                    .update(id, |p| {
                        p.status = ParticipantStatus::Ready;
                        p.address = Some(address);
                        p.balance = Some(balance);
                    })
                    .await?;
                info!("Participant {id} is ready");
                Ok(())
            }
            Err(e) => {
                error!("Participant {id} failed to start: {e}");
                self.registry
                    .update(id, |p| {
                        p.status = ParticipantStatus::Error;
                        p.error = Some(e.to_string());
                        p.address = None;
                        p.balance = None;
                    })
                    .await?;
                Err(e)
            }
        }
    }

    /// Closes a live connection and returns the participant to idle.
    /// Stopping a participant with no live connection is a no-op.
    pub async fn stop_participant(&self, id: ParticipantId) -> Result<(), ConsoleError> {
        self.registry.get(id).await?;
        let _op = self.ops.begin(id)?;

        let Some(connection) = self.instances.remove(id).await else {
            debug!("No live connection for participant {id}, nothing to stop");
            return Ok(());
        };

        if let Err(e) = connection.stop().await {
            warn!("Closing wallet for participant {id} reported: {e}");
        }

        self.registry
            .update(id, |p| {
                p.status = ParticipantStatus::Idle;
                p.address = None;
                p.balance = None;
                p.error = None;
            })
            .await?;
        info!("Participant {id} stopped");
        Ok(())
    }

    /// Re-queries the balance of a ready participant. A failed query is a
    /// read failure, not a health check; the status stays ready.
    pub async fn refresh_balance(&self, id: ParticipantId) -> Result<u64, ConsoleError> {
        let participant = self.registry.get(id).await?;
        let _op = self.ops.begin(id)?;

        if !participant.is_ready() {
            return Err(ConsoleError::NotReady(id));
        }

        let connection = self
            .instances
            .get(id)
            .await
            .ok_or(ConsoleError::NotReady(id))?;
        let balance = connection.balance(NATIVE_TOKEN).await?;

        self.registry
            .update(id, |p| p.balance = Some(balance))
            .await?;
        debug!("Participant {id} balance refreshed: {balance}");
        Ok(balance)
    }

    async fn bring_up(
        &self,
        id: ParticipantId,
    ) -> Result<(Arc<dyn WalletConnection>, String, u64), ConsoleError> {
        let seed = self
            .config
            .seeds
            .get(id as usize)
            .ok_or(ConsoleError::UnknownParticipant(id))?;
        let connection = self.backend.open(seed, &self.config.network).await?;

        match self.sync_and_describe(id, &connection).await {
            Ok((address, balance)) => Ok((connection, address, balance)),
            Err(e) => {
                if let Err(stop_err) = connection.stop().await {
                    warn!("Teardown for participant {id} also failed: {stop_err}");
                }
                Err(e)
            }
        }
    }

    async fn sync_and_describe(
        &self,
        id: ParticipantId,
        connection: &Arc<dyn WalletConnection>,
    ) -> Result<(String, u64), ConsoleError> {
        connection.start().await?;
        self.registry
            .update(id, |p| p.status = ParticipantStatus::Syncing)
            .await?;

        let limit = Duration::from_secs(self.config.sync_timeout_secs);
        match timeout(limit, self.poll_ready(connection)).await {
            Ok(result) => result?,
            Err(_) => return Err(ConsoleError::SyncTimeout(self.config.sync_timeout_secs)),
        }

        let address = connection.address_at_index(0).await?;
        let balance = connection.balance(NATIVE_TOKEN).await?;
        Ok((address, balance))
    }

    async fn poll_ready(
        &self,
        connection: &Arc<dyn WalletConnection>,
    ) -> Result<(), ConsoleError> {
        let interval = Duration::from_millis(self.config.poll_interval_ms);
        loop {
            if connection.is_ready().await? {
                return Ok(());
            }
            sleep(interval).await;
        }
    }
}
