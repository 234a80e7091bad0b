use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pool type tag, as reported by the subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PoolType {
    Weighted,
    Investment,
    LiquidityBootstrapping,
    Stable,
    StablePhantom,
    ComposableStable,
    MetaStable,
    Linear,
    AaveLinear,
    Erc4626Linear,
    Element,
}

impl PoolType {
    /// Subgraph tag for this pool type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weighted => "Weighted",
            Self::Investment => "Investment",
            Self::LiquidityBootstrapping => "LiquidityBootstrapping",
            Self::Stable => "Stable",
            Self::StablePhantom => "StablePhantom",
            Self::ComposableStable => "ComposableStable",
            Self::MetaStable => "MetaStable",
            Self::Linear => "Linear",
            Self::AaveLinear => "AaveLinear",
            Self::Erc4626Linear => "ERC4626Linear",
            Self::Element => "Element",
        }
    }
}

impl FromStr for PoolType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Weighted" => Ok(Self::Weighted),
            "Investment" => Ok(Self::Investment),
            "LiquidityBootstrapping" => Ok(Self::LiquidityBootstrapping),
            "Stable" => Ok(Self::Stable),
            "StablePhantom" => Ok(Self::StablePhantom),
            "ComposableStable" => Ok(Self::ComposableStable),
            "MetaStable" => Ok(Self::MetaStable),
            "Linear" => Ok(Self::Linear),
            "AaveLinear" => Ok(Self::AaveLinear),
            "ERC4626Linear" => Ok(Self::Erc4626Linear),
            "Element" => Ok(Self::Element),
            other => Err(DomainError::UnknownPoolType(other.to_string())),
        }
    }
}

impl TryFrom<String> for PoolType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PoolType> for String {
    fn from(pool_type: PoolType) -> Self {
        pool_type.as_str().to_string()
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
