use std::collections::BTreeMap;

use tokio::sync::RwLock;
use types::{
    config::ConsoleConfig,
    errors::ConsoleError,
    participant::{Participant, ParticipantId},
};

/// Fixed roster of signer identities, one per configured seed. Created once
/// at startup and never resized; the lifecycle controller is the only
/// writer, everything else reads cloned snapshots.
pub struct ParticipantRegistry {
    inner: RwLock<BTreeMap<ParticipantId, Participant>>,
}

impl ParticipantRegistry {
    #[must_use]
    pub fn from_config(config: &ConsoleConfig) -> Self {
        let roster = config
            .seeds
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let id = i as ParticipantId;
                (id, Participant::new(id, config.participant_name(i)))
            })
            .collect();

        Self {
            inner: RwLock::new(roster),
        }
    }

    pub async fn snapshot(&self) -> Vec<Participant> {
        self.inner.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: ParticipantId) -> Result<Participant, ConsoleError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ConsoleError::UnknownParticipant(id))
    }

    pub async fn ready_count(&self) -> usize {
        self.inner
            .read()
            .await
            .values()
            .filter(|p| p.is_ready())
            .count()
    }

    pub async fn update<F>(&self, id: ParticipantId, mutate: F) -> Result<(), ConsoleError>
    where
        F: FnOnce(&mut Participant),
    {
        let mut roster = self.inner.write().await;
        let participant = roster
            .get_mut(&id)
            .ok_or(ConsoleError::UnknownParticipant(id))?;
        mutate(participant);
        Ok(())
    }
}
