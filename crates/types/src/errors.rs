use std::error::Error;

use derive_more::Display;

use crate::participant::{ParticipantId, ParticipantStatus};
use crate::workflow::WorkflowStep;

/// Failure surfaced by an external wallet connection. Everything behind the
/// connection trait is a fallible black box; this is the whole taxonomy it
/// reports through.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[display("Wallet rpc failed: {}", _0)]
    Rpc(String),

    #[display("Wallet connection is not started")]
    NotConnected,

    #[display("Transaction rejected: {}", _0)]
    Rejected(String),
}

impl Error for WalletError {}

/// Error taxonomy of the console core. Precondition violations leave all
/// state untouched; mid-operation failures are also written into the
/// relevant participant status or workflow step.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[display("Amount must be a positive integer in the smallest token unit")]
    InvalidAmount,

    #[display("Unknown participant {}", _0)]
    UnknownParticipant(ParticipantId),

    #[display("Participant {id} cannot start from status {status}")]
    InvalidStatus {
        id: ParticipantId,
        status: ParticipantStatus,
    },

    #[display("An operation is already in flight for participant {}", _0)]
    OperationInFlight(ParticipantId),

    #[display("Participant {} is not ready", _0)]
    NotReady(ParticipantId),

    #[display("Wallet for participant {} is not ready", _0)]
    WalletNotReady(ParticipantId),

    #[display("Participant {} is not a selected signer", _0)]
    SignerNotSelected(ParticipantId),

    #[display("Transaction hex does not match the live proposal")]
    StaleProposal,

    #[display("Workflow step is {actual}, expected {expected}")]
    InvalidStep {
        expected: WorkflowStep,
        actual: WorkflowStep,
    },

    #[display("Only {ready} of the {required} participants required to sign are ready")]
    NotEnoughReady { ready: usize, required: usize },

    #[display("Collected {provided} of {required} required signatures")]
    ThresholdNotMet { provided: usize, required: usize },

    #[display("Wallet did not become ready within {}s", _0)]
    SyncTimeout(u64),

    #[display("Connection error: {}", _0)]
    Connection(String),

    #[display("Broadcast rejected: {}", _0)]
    BroadcastRejected(String),

    #[display("Invalid configuration: {}", _0)]
    Config(String),
}

impl Error for ConsoleError {}

impl From<WalletError> for ConsoleError {
    fn from(e: WalletError) -> Self {
        match e {
            WalletError::Rejected(msg) => Self::BroadcastRejected(msg),
            other => Self::Connection(other.to_string()),
        }
    }
}
