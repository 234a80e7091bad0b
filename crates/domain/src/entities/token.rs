use serde::{Deserialize, Serialize};

/// Token metadata as returned by a token metadata provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenMeta {
    pub address: String,
    #[serde(default)]
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMeta {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            decimals,
        }
    }
}
