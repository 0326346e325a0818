use tracing::{error, info};
use types::{
    errors::ConsoleError, participant::ParticipantId, transaction::TxOutput,
    workflow::WorkflowStep,
};

use crate::Console;

impl Console {
    /// Builds an unsigned transaction spending from one ready participant
    /// to a destination address and moves the workflow into signing. Input
    /// selection is left to the source wallet. Only valid from idle, and
    /// only once enough participants are ready to eventually meet the
    /// signature threshold.
    pub async fn create_transaction(
        &self,
        from: ParticipantId,
        destination: &str,
        amount: u64,
    ) -> Result<String, ConsoleError> {
        if amount == 0 {
            return Err(ConsoleError::InvalidAmount);
        }

        let source = self.registry.get(from).await?;

        let connection = {
            let mut workflow = self.workflow.lock().await;
            if workflow.step != WorkflowStep::Idle {
                return Err(ConsoleError::InvalidStep {
                    expected: WorkflowStep::Idle,
                    actual: workflow.step,
                });
            }

            let ready = self.registry.ready_count().await;
            if ready < self.config.required_signatures {
                return Err(ConsoleError::NotEnoughReady {
                    ready,
                    required: self.config.required_signatures,
                });
            }

            if !source.is_ready() {
                return Err(ConsoleError::NotReady(from));
            }
            let connection = self
                .instances
                .get(from)
                .await
                .ok_or(ConsoleError::NotReady(from))?;

            workflow.step = WorkflowStep::Creating;
            workflow.error = None;
            connection
        };

        info!("Creating proposal: {amount} from participant {from} to {destination}");

        let outputs = [TxOutput::new(destination, amount)];
        let built = self
            .deadline(connection.build_unsigned_transaction(&outputs))
            .await;

        let mut workflow = self.workflow.lock().await;
        match built {
            Ok(tx_hex) => {
                workflow.tx_hex = Some(tx_hex.clone());
                workflow.step = WorkflowStep::Signing;
                info!(
                    "Proposal built ({} bytes), collecting signatures",
                    tx_hex.len() / 2
                );
                Ok(tx_hex)
            }
            Err(e) => {
                let err = ConsoleError::from(e);
                workflow.step = WorkflowStep::Error;
                workflow.error = Some(err.to_string());
                error!("Proposal build failed: {err}");
                Err(err)
            }
        }
    }
}
