use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ConsoleError;

const fn default_sync_timeout() -> u64 {
    60
}

const fn default_poll_interval() -> u64 {
    500
}

fn default_pin() -> String {
    "123".to_string()
}

/// Read-only configuration of the console: the fixed signer roster and the
/// quorum threshold. Loaded once at startup, never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Network name handed verbatim to the wallet backend.
    pub network: String,
    /// One BIP-39 mnemonic per participant. Participant ids are indices
    /// into this list.
    pub seeds: Vec<String>,
    /// Extended public keys of the multisig group, opaque to the console.
    pub xpubs: Vec<String>,
    /// The M in M-of-N.
    pub required_signatures: usize,
    #[serde(default)]
    pub participant_names: Vec<String>,
    /// Signing PIN handed to the wallet on each signature request.
    #[serde(default = "default_pin")]
    pub pin: String,
    #[serde(default = "default_sync_timeout")]
    pub sync_timeout_secs: u64,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl ConsoleConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConsoleError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConsoleError::Config(format!("Failed to read {}: {e}", path.display())))?;

        let config: Self = serde_yaml::from_str(&raw)
            .map_err(|e| ConsoleError::Config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        info!(
            "Loaded config: {} participants, {}-of-{} on {}",
            config.seeds.len(),
            config.required_signatures,
            config.seeds.len(),
            config.network
        );
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConsoleError> {
        let raw = serde_yaml::to_string(self)
            .map_err(|e| ConsoleError::Config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, raw)
            .map_err(|e| ConsoleError::Config(format!("Failed to write {}: {e}", path.display())))
    }

    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.seeds.is_empty() {
            return Err(ConsoleError::Config("No participant seeds".to_string()));
        }

        if self.required_signatures == 0 || self.required_signatures > self.seeds.len() {
            return Err(ConsoleError::Config(format!(
                "required_signatures must be between 1 and {}, got {}",
                self.seeds.len(),
                self.required_signatures
            )));
        }

        if !self.xpubs.is_empty() && self.xpubs.len() != self.seeds.len() {
            return Err(ConsoleError::Config(format!(
                "Expected {} xpubs to match the seed list, got {}",
                self.seeds.len(),
                self.xpubs.len()
            )));
        }

        for (i, seed) in self.seeds.iter().enumerate() {
            bip39::Mnemonic::parse(seed)
                .map_err(|e| ConsoleError::Config(format!("Seed {i} is not a valid mnemonic: {e}")))?;
        }

        Ok(())
    }

    #[must_use]
    pub fn participant_name(&self, index: usize) -> String {
        self.participant_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Participant {index}"))
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.seeds.len()
    }

    /// Starter 2-of-5 setup against well-known test mnemonics. What the CLI
    /// `init` command writes.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            network: "testnet".to_string(),
            seeds: vec![
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about".to_string(),
                "legal winner thank year wave sausage worth useful legal winner thank yellow".to_string(),
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage above".to_string(),
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong".to_string(),
                "ozone drill grab fiber curtain grace pudding thank cruise elder eight picnic".to_string(),
            ],
            xpubs: Vec::new(),
            required_signatures: 2,
            participant_names: Vec::new(),
            pin: default_pin(),
            sync_timeout_secs: default_sync_timeout(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}
