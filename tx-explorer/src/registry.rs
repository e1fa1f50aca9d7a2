use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static description of one network
///
/// The resolver reads `rpc_url`, `name` and `currency`; `icon` and `theme` are
/// passed through to whatever renders the search form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Display name, e.g. "Ethereum"
    pub name: String,

    /// JSON-RPC endpoint URL
    pub rpc_url: String,

    /// Base currency symbol, e.g. "ETH"
    pub currency: String,

    /// Icon asset reference
    #[serde(default)]
    pub icon: String,

    /// Display theme key
    #[serde(default)]
    pub theme: String,
}

/// Immutable table of the networks the explorer can query
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRegistry {
    networks: BTreeMap<String, NetworkConfig>,
}

impl NetworkRegistry {
    pub fn new(networks: BTreeMap<String, NetworkConfig>) -> Self {
        Self { networks }
    }

    /// Look up a network by id
    pub fn get(&self, network_id: &str) -> Option<&NetworkConfig> {
        self.networks.get(network_id)
    }

    pub fn contains(&self, network_id: &str) -> bool {
        self.networks.contains_key(network_id)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Networks ordered by id
    pub fn iter(&self) -> impl Iterator<Item = (&String, &NetworkConfig)> {
        self.networks.iter()
    }
}

impl FromIterator<(String, NetworkConfig)> for NetworkRegistry {
    fn from_iter<I: IntoIterator<Item = (String, NetworkConfig)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
