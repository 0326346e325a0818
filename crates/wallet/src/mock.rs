use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use sha2::{Digest, Sha256};
use tracing::debug;
use types::{errors::WalletError, transaction::TxOutput};

use crate::connection::{WalletBackend, WalletConnection};

/// Which wallet call an opened mock connection fails at. One injected
/// failure per backend; every other call behaves normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailStage {
    Start,
    Sync,
    Address,
    Balance,
    Build,
    Sign,
    Merge,
    Broadcast,
}

/// In-process stand-in for the wallet SDK. Everything it returns is derived
/// deterministically from the seed, so tests and the CLI demo see stable
/// addresses, signatures, and hashes without any network.
#[derive(Clone)]
pub struct MockBackend {
    ready_after_polls: u32,
    balance_sat: u64,
    fail: Option<FailStage>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ready_after_polls: 1,
            balance_sat: 100_000,
            fail: None,
        }
    }

    /// How many `is_ready` polls a connection answers `false` before it
    /// reports ready.
    #[must_use]
    pub const fn with_ready_after(mut self, polls: u32) -> Self {
        self.ready_after_polls = polls;
        self
    }

    #[must_use]
    pub const fn with_balance(mut self, sat: u64) -> Self {
        self.balance_sat = sat;
        self
    }

    #[must_use]
    pub const fn with_fail(mut self, stage: FailStage) -> Self {
        self.fail = Some(stage);
        self
    }
}

#[async_trait::async_trait]
impl WalletBackend for MockBackend {
    async fn open(
        &self,
        seed: &str,
        network: &str,
    ) -> Result<Arc<dyn WalletConnection>, WalletError> {
        let fingerprint = digest_hex(&[seed.as_bytes(), network.as_bytes()]);
        debug!("Opening mock wallet {}", &fingerprint[..12]);

        Ok(Arc::new(MockConnection {
            fingerprint,
            ready_after_polls: self.ready_after_polls,
            balance_sat: self.balance_sat,
            fail: self.fail,
            started: AtomicBool::new(false),
            polls: AtomicU32::new(0),
        }))
    }
}

pub struct MockConnection {
    fingerprint: String,
    ready_after_polls: u32,
    balance_sat: u64,
    fail: Option<FailStage>,
    started: AtomicBool,
    polls: AtomicU32,
}

impl MockConnection {
    fn check_started(&self) -> Result<(), WalletError> {
        if self.started.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(WalletError::NotConnected)
        }
    }

    fn injected(&self, stage: FailStage, message: &str) -> Result<(), WalletError> {
        if self.fail == Some(stage) {
            Err(WalletError::Rpc(message.to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl WalletConnection for MockConnection {
    async fn start(&self) -> Result<(), WalletError> {
        self.injected(FailStage::Start, "Session handshake refused")?;
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<(), WalletError> {
        self.started.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn is_ready(&self) -> Result<bool, WalletError> {
        self.check_started()?;
        self.injected(FailStage::Sync, "Connection dropped while syncing")?;

        let polled = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(polled > self.ready_after_polls)
    }

    async fn address_at_index(&self, index: u32) -> Result<String, WalletError> {
        self.check_started()?;
        self.injected(FailStage::Address, "Address derivation failed")?;
        Ok(format!("mock1{}x{index}", &self.fingerprint[..16]))
    }

    async fn balance(&self, _token: &str) -> Result<u64, WalletError> {
        self.check_started()?;
        self.injected(FailStage::Balance, "Balance query failed")?;
        Ok(self.balance_sat)
    }

    async fn build_unsigned_transaction(
        &self,
        outputs: &[TxOutput],
    ) -> Result<String, WalletError> {
        self.check_started()?;
        self.injected(FailStage::Build, "No spendable inputs")?;

        let body = serde_json::to_vec(outputs).map_err(|e| WalletError::Rpc(e.to_string()))?;
        Ok(hex::encode(body))
    }

    async fn sign_transaction(&self, tx_hex: &str, pin: &str) -> Result<String, WalletError> {
        self.check_started()?;
        self.injected(FailStage::Sign, "Signing request refused")?;

        // Deterministic per (wallet, proposal); the pin participates so a
        // wrong pin yields a visibly different blob.
        Ok(digest_hex(&[
            self.fingerprint.as_bytes(),
            tx_hex.as_bytes(),
            pin.as_bytes(),
        ]))
    }

    async fn merge_signatures(
        &self,
        tx_hex: &str,
        signatures: &[String],
    ) -> Result<String, WalletError> {
        self.check_started()?;
        self.injected(FailStage::Merge, "Signature merge rejected")?;

        let mut parts: Vec<&[u8]> = vec![tx_hex.as_bytes()];
        for sig in signatures {
            parts.push(sig.as_bytes());
        }
        let witness = digest_hex(&parts);
        Ok(format!("{tx_hex}{}", &witness[..16]))
    }

    async fn broadcast(&self, tx_hex: &str) -> Result<String, WalletError> {
        self.check_started()?;
        if self.fail == Some(FailStage::Broadcast) {
            return Err(WalletError::Rejected(
                "Transaction refused by the network".to_string(),
            ));
        }
        Ok(digest_hex(&[tx_hex.as_bytes()]))
    }
}

fn digest_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}
