use std::sync::Arc;

use dyn_clone::DynClone;
use types::{errors::WalletError, transaction::TxOutput};

/// One participant's live wallet session. Every method is an asynchronous,
/// fallible black box; the transport behind it (and any retrying it does)
/// is opaque to the console.
#[async_trait::async_trait]
pub trait WalletConnection: Send + Sync {
    /// Opens the underlying session. A started connection may still be
    /// syncing; readiness is reported separately by `is_ready`.
    async fn start(&self) -> Result<(), WalletError>;

    async fn stop(&self) -> Result<(), WalletError>;

    async fn is_ready(&self) -> Result<bool, WalletError>;

    async fn address_at_index(&self, index: u32) -> Result<String, WalletError>;

    async fn balance(&self, token: &str) -> Result<u64, WalletError>;

    /// Builds an unsigned transaction paying the given outputs, selecting
    /// inputs automatically, and returns it as an opaque serialized blob.
    async fn build_unsigned_transaction(&self, outputs: &[TxOutput])
    -> Result<String, WalletError>;

    async fn sign_transaction(&self, tx_hex: &str, pin: &str) -> Result<String, WalletError>;

    async fn merge_signatures(
        &self,
        tx_hex: &str,
        signatures: &[String],
    ) -> Result<String, WalletError>;

    /// Submits a fully signed transaction for broadcast and returns its
    /// hash.
    async fn broadcast(&self, tx_hex: &str) -> Result<String, WalletError>;
}

/// Opens wallet connections for participant seeds. Injected into the
/// console; the lifecycle controller is its only caller.
#[async_trait::async_trait]
pub trait WalletBackend: Send + Sync + DynClone {
    async fn open(
        &self,
        seed: &str,
        network: &str,
    ) -> Result<Arc<dyn WalletConnection>, WalletError>;
}

dyn_clone::clone_trait_object!(WalletBackend);
