use tracing::{error, info};
use types::{errors::ConsoleError, participant::ParticipantId, workflow::WorkflowStep};

use crate::Console;

impl Console {
    /// Merges the collected signatures into the proposal, finalizes it, and
    /// submits it for broadcast via any ready participant's wallet (the
    /// assembler does not have to be a signer). Requires a met threshold;
    /// an under-quorum call is a validation failure and leaves the workflow
    /// in signing.
    pub async fn assemble_and_send(
        &self,
        id: ParticipantId,
        tx_hex: &str,
        signatures: &[String],
    ) -> Result<String, ConsoleError> {
        let participant = self.registry.get(id).await?;

        let connection = {
            let mut workflow = self.workflow.lock().await;
            if workflow.step != WorkflowStep::Signing {
                return Err(ConsoleError::InvalidStep {
                    expected: WorkflowStep::Signing,
                    actual: workflow.step,
                });
            }
            if signatures.len() < self.config.required_signatures {
                return Err(ConsoleError::ThresholdNotMet {
                    provided: signatures.len(),
                    required: self.config.required_signatures,
                });
            }
            if !workflow.is_live_proposal(tx_hex) {
                return Err(ConsoleError::StaleProposal);
            }
            if !participant.is_ready() {
                return Err(ConsoleError::NotReady(id));
            }
            let connection = self
                .instances
                .get(id)
                .await
                .ok_or(ConsoleError::NotReady(id))?;

            workflow.step = WorkflowStep::Assembling;
            workflow.error = None;
            connection
        };

        info!(
            "Assembling transaction with {} signatures via participant {id}",
            signatures.len()
        );

        let signed = match self
            .deadline(connection.merge_signatures(tx_hex, signatures))
            .await
        {
            Ok(signed) => signed,
            Err(e) => return self.fail_workflow(e.into()).await,
        };

        self.workflow.lock().await.step = WorkflowStep::Sending;
        info!("Transaction finalized, broadcasting");

        match self.deadline(connection.broadcast(&signed)).await {
            Ok(hash) => {
                let mut workflow = self.workflow.lock().await;
                workflow.result = Some(hash.clone());
                workflow.step = WorkflowStep::Complete;
                info!("Broadcast accepted: {hash}");
                Ok(hash)
            }
            Err(e) => self.fail_workflow(e.into()).await,
        }
    }

    /// Returns the workflow to a pristine idle state from any step.
    /// Participant statuses are untouched.
    pub async fn reset_transaction(&self) {
        let mut workflow = self.workflow.lock().await;
        info!("Workflow reset from {}", workflow.step);
        workflow.reset();
    }

    /// Terminal failure: the step parks at error and stays there until an
    /// explicit reset, never rolling back to signing.
    async fn fail_workflow<T>(&self, err: ConsoleError) -> Result<T, ConsoleError> {
        let mut workflow = self.workflow.lock().await;
        workflow.step = WorkflowStep::Error;
        workflow.error = Some(err.to_string());
        error!("Workflow failed: {err}");
        Err(err)
    }
}
