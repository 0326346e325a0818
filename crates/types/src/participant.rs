use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Stable identifier for a signer. Doubles as the seed-derivation index.
pub type ParticipantId = u32;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    #[display("idle")]
    Idle,
    #[display("connecting")]
    Connecting,
    #[display("syncing")]
    Syncing,
    #[display("ready")]
    Ready,
    #[display("error")]
    Error,
}

impl ParticipantStatus {
    /// Valid transitions are idle -> connecting -> syncing -> ready, any
    /// active state -> error, and ready/error -> idle on stop. A start is
    /// only accepted from the two resting states.
    #[must_use]
    pub const fn can_start(self) -> bool {
        matches!(self, Self::Idle | Self::Error)
    }
}

/// One identity in the fixed multisig signer set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub seed_index: u32,
    pub status: ParticipantStatus,
    pub address: Option<String>,
    pub balance: Option<u64>,
    pub error: Option<String>,
}

impl Participant {
    #[must_use]
    pub fn new(id: ParticipantId, name: String) -> Self {
        Self {
            id,
            name,
            seed_index: id,
            status: ParticipantStatus::Idle,
            address: None,
            balance: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.status, ParticipantStatus::Ready)
    }
}
