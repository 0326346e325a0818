use serde::{Deserialize, Serialize};

/// Token id the wallet backends treat as the chain's native unit.
pub const NATIVE_TOKEN: &str = "00";

/// One requested output of a proposal. Input selection is left entirely to
/// the wallet that builds the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub address: String,
    pub value: u64,
    pub token: String,
}

impl TxOutput {
    #[must_use]
    pub fn new(address: impl Into<String>, value: u64) -> Self {
        Self {
            address: address.into(),
            value,
            token: NATIVE_TOKEN.to_string(),
        }
    }
}
