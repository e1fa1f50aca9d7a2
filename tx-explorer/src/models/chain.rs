use serde::{Deserialize, Serialize};

/// Transaction receipt as returned by `eth_getTransactionReceipt`
///
/// Only the fields the explorer reads are modeled; quantities stay in their
/// hex encoding until derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// `"0x1"` on success, `"0x0"` on failure; absent on pre-Byzantium chains
    #[serde(default)]
    pub status: Option<String>,
    pub block_number: String,
    pub block_hash: String,
    pub gas_used: String,
    pub from: String,
    /// `None` for contract creations
    #[serde(default)]
    pub to: Option<String>,
    /// Address of the deployed contract when `to` is `None`
    #[serde(default)]
    pub contract_address: Option<String>,
}

/// Submitted transaction as returned by `eth_getTransactionByHash`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    /// Value transferred, in wei
    pub value: String,
    /// Gas price in wei (the effective price for EIP-1559 transactions)
    pub gas_price: String,
}

/// Containing block as returned by `eth_getBlockByHash`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Seconds since the Unix epoch
    pub timestamp: String,
}
