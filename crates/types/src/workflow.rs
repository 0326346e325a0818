use std::collections::BTreeSet;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::participant::ParticipantId;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStep {
    #[default]
    #[display("idle")]
    Idle,
    #[display("creating")]
    Creating,
    #[display("signing")]
    Signing,
    #[display("assembling")]
    Assembling,
    #[display("sending")]
    Sending,
    #[display("complete")]
    Complete,
    #[display("error")]
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedSignature {
    pub participant_id: ParticipantId,
    pub signature: String,
}

/// The single in-flight multisig transaction. Owned by the console; the UI
/// layer reads cloned snapshots of it as plain data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowState {
    pub step: WorkflowStep,
    /// Unsigned-transaction blob. Set once on creating -> signing and not
    /// written again until a reset.
    pub tx_hex: Option<String>,
    pub selected_signers: BTreeSet<ParticipantId>,
    pub signatures: Vec<CollectedSignature>,
    pub result: Option<String>,
    pub error: Option<String>,
}

impl WorkflowState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Toggles membership; returns whether the id is selected afterwards.
    /// Already-collected signatures are never retracted here.
    pub fn toggle_signer(&mut self, id: ParticipantId) -> bool {
        if self.selected_signers.remove(&id) {
            false
        } else {
            self.selected_signers.insert(id);
            true
        }
    }

    /// Records a signature, replacing any prior entry from the same
    /// participant. Re-signing is idempotent in effect, not additive.
    pub fn put_signature(&mut self, sig: CollectedSignature) {
        match self
            .signatures
            .iter_mut()
            .find(|s| s.participant_id == sig.participant_id)
        {
            Some(existing) => *existing = sig,
            None => self.signatures.push(sig),
        }
    }

    #[must_use]
    pub fn signature_for(&self, id: ParticipantId) -> Option<&CollectedSignature> {
        self.signatures.iter().find(|s| s.participant_id == id)
    }

    /// Signatures counting toward the quorum: one per currently selected
    /// signer. A signature from a since-deselected signer is orphaned, not
    /// removed, and stops counting until the signer is re-selected.
    #[must_use]
    pub fn quorum_progress(&self) -> usize {
        self.signatures
            .iter()
            .filter(|s| self.selected_signers.contains(&s.participant_id))
            .count()
    }

    #[must_use]
    pub fn is_live_proposal(&self, tx_hex: &str) -> bool {
        self.tx_hex.as_deref() == Some(tx_hex)
    }
}
