use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ETHERSCAN_API_URL: &str = "https://api.etherscan.io/api";
pub const BSCSCAN_API_URL: &str = "https://api.bscscan.io/api";

/// Chains the explorer can query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Eth,
    Bsc,
}

/// Networks in menu order
pub const NETWORKS: [Network; 2] = [Network::Eth, Network::Bsc];

impl Network {
    /// Identifier persisted in the config (`network_name`)
    pub fn id(&self) -> &'static str {
        match self {
            Self::Eth => "eth",
            Self::Bsc => "bsc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Eth => "Ethereum",
            Self::Bsc => "Binance Smart Chain",
        }
    }

    /// Native coin symbol
    pub fn coin(&self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Bsc => "BNB",
        }
    }

    /// Default explorer API endpoint
    pub fn api_url(&self) -> &'static str {
        match self {
            Self::Eth => ETHERSCAN_API_URL,
            Self::Bsc => BSCSCAN_API_URL,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "eth" => Some(Self::Eth),
            "bsc" => Some(Self::Bsc),
            _ => None,
        }
    }

    /// Resolve a possibly missing or unknown identifier, falling back to Ethereum
    pub fn resolve(id: Option<&str>) -> Self {
        id.and_then(Self::from_id).unwrap_or_default()
    }

    /// Position in [`NETWORKS`]
    pub fn index(&self) -> usize {
        NETWORKS.iter().position(|n| n == self).unwrap_or(0)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("Unknown network '{s}' (expected eth or bsc)"))
    }
}
