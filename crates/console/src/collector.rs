use tracing::{debug, error, info};
use types::{
    errors::ConsoleError,
    participant::ParticipantId,
    workflow::{CollectedSignature, WorkflowStep},
};

use crate::Console;

impl Console {
    /// Adds the participant to the selected-signer set, or removes it if
    /// already present. Allowed in any workflow step. Deselecting a signer
    /// never retracts a signature they already produced; it just stops
    /// counting toward the quorum.
    pub async fn toggle_signer(&self, id: ParticipantId) -> Result<bool, ConsoleError> {
        self.registry.get(id).await?;

        let mut workflow = self.workflow.lock().await;
        let selected = workflow.toggle_signer(id);
        debug!(
            "Participant {id} {} as signer",
            if selected { "selected" } else { "deselected" }
        );
        Ok(selected)
    }

    /// Requests one signature over the live proposal from a selected, ready
    /// signer and records it, replacing any earlier signature from the same
    /// participant.
    pub async fn collect_signature(
        &self,
        id: ParticipantId,
        tx_hex: &str,
    ) -> Result<(), ConsoleError> {
        let participant = self.registry.get(id).await?;

        let connection = {
            let workflow = self.workflow.lock().await;
            if workflow.step != WorkflowStep::Signing {
                return Err(ConsoleError::InvalidStep {
                    expected: WorkflowStep::Signing,
                    actual: workflow.step,
                });
            }
            if !workflow.selected_signers.contains(&id) {
                return Err(ConsoleError::SignerNotSelected(id));
            }
            if !participant.is_ready() {
                return Err(ConsoleError::WalletNotReady(id));
            }
            if !workflow.is_live_proposal(tx_hex) {
                return Err(ConsoleError::StaleProposal);
            }
            self.instances
                .get(id)
                .await
                .ok_or(ConsoleError::WalletNotReady(id))?
        };

        match self
            .deadline(connection.sign_transaction(tx_hex, &self.config.pin))
            .await
        {
            Ok(signature) => {
                let mut workflow = self.workflow.lock().await;
                // A reset may have raced with the signing round trip; a
                // signature for a dead proposal is dropped, not recorded.
                if workflow.step != WorkflowStep::Signing || !workflow.is_live_proposal(tx_hex) {
                    return Err(ConsoleError::StaleProposal);
                }

                workflow.put_signature(CollectedSignature {
                    participant_id: id,
                    signature,
                });
                info!(
                    "Signature {}/{} collected from participant {id}",
                    workflow.quorum_progress(),
                    self.config.required_signatures
                );
                Ok(())
            }
            Err(e) => {
                let err = ConsoleError::from(e);
                let mut workflow = self.workflow.lock().await;
                if workflow.step == WorkflowStep::Signing && workflow.is_live_proposal(tx_hex) {
                    workflow.step = WorkflowStep::Error;
                    workflow.error = Some(err.to_string());
                }
                error!("Signature request to participant {id} failed: {err}");
                Err(err)
            }
        }
    }
}
