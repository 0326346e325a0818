use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use types::participant::ParticipantId;
use wallet::WalletConnection;

/// Live wallet connections keyed by participant id. Connection handles are
/// not serializable and never appear in observable state; this map is the
/// only place they live, and the lifecycle controller is the only writer.
#[derive(Default)]
pub struct InstanceMap {
    inner: Mutex<HashMap<ParticipantId, Arc<dyn WalletConnection>>>,
}

impl InstanceMap {
    pub async fn insert(&self, id: ParticipantId, connection: Arc<dyn WalletConnection>) {
        self.inner.lock().await.insert(id, connection);
    }

    pub async fn remove(&self, id: ParticipantId) -> Option<Arc<dyn WalletConnection>> {
        self.inner.lock().await.remove(&id)
    }

    pub async fn get(&self, id: ParticipantId) -> Option<Arc<dyn WalletConnection>> {
        self.inner.lock().await.get(&id).cloned()
    }

    pub async fn contains(&self, id: ParticipantId) -> bool {
        self.inner.lock().await.contains_key(&id)
    }
}
