use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::{
    error::ExplorerError,
    models::{
        chain::{Block, Receipt, TransactionDetails},
        jsonrpc::{parse_hex_f64, parse_hex_u64},
    },
    registry::NetworkConfig,
};

/// Wei per base currency unit (ETH, POL, BNB, ...)
pub const WEI_PER_UNIT: f64 = 1e18;

/// Wei per gwei
pub const WEI_PER_GWEI: f64 = 1e9;

/// Gwei per base currency unit
pub const GWEI_PER_UNIT: f64 = 1e9;

/// Receipt status value marking a successful execution
pub const SUCCESS_STATUS: &str = "0x1";

/// Display format for block timestamps, e.g. `3/3/1973, 9:46:40 AM`
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Display-ready view of a resolved transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTransactionView {
    pub network: String,
    pub network_name: String,
    pub currency: String,
    pub hash: String,
    /// `"Success"` or `"Failure"`
    pub status: String,
    pub block_number: u64,
    /// Block time in the host's local time zone
    pub timestamp: String,
    pub timestamp_ms: i64,
    pub from: String,
    pub to: Option<String>,
    /// Deployed contract, set only for contract creations
    pub contract_address: Option<String>,
    /// Value transferred, in the network's base currency unit
    pub value: f64,
    /// Fee paid, in the network's base currency unit
    pub transaction_fee: f64,
    pub gas_price_gwei: f64,
    pub gas_used: u64,
}

impl ResolvedTransactionView {
    /// Combine the three records fetched for one transaction into a view.
    ///
    /// Fails with `ExplorerError::Remote` when the endpoint returned a
    /// quantity that is not valid hex.
    pub fn derive(
        network_id: &str,
        network: &NetworkConfig,
        hash: &str,
        receipt: &Receipt,
        transaction: &TransactionDetails,
        block: &Block,
    ) -> Result<Self, ExplorerError> {
        let block_number = parse_hex_u64(&receipt.block_number)
            .map_err(|e| malformed("receipt block number", e))?;
        let gas_used =
            parse_hex_u64(&receipt.gas_used).map_err(|e| malformed("receipt gas used", e))?;
        let block_seconds =
            parse_hex_u64(&block.timestamp).map_err(|e| malformed("block timestamp", e))?;
        let value_wei =
            parse_hex_f64(&transaction.value).map_err(|e| malformed("transaction value", e))?;
        let gas_price_wei = parse_hex_f64(&transaction.gas_price)
            .map_err(|e| malformed("transaction gas price", e))?;

        let timestamp_ms = timestamp_millis(block_seconds)?;
        let gas_price_gwei = gas_price_wei / WEI_PER_GWEI;

        Ok(Self {
            network: network_id.to_string(),
            network_name: network.name.clone(),
            currency: network.currency.clone(),
            hash: hash.to_string(),
            status: status_label(receipt.status.as_deref()).to_string(),
            block_number,
            timestamp: format_local_timestamp(timestamp_ms)?,
            timestamp_ms,
            from: receipt.from.clone(),
            to: receipt.to.clone(),
            contract_address: receipt.contract_address.clone(),
            value: value_wei / WEI_PER_UNIT,
            transaction_fee: transaction_fee(gas_used, gas_price_gwei),
            gas_price_gwei,
            gas_used,
        })
    }
}

/// Map a receipt status to its display label.
pub fn status_label(status: Option<&str>) -> &'static str {
    if status == Some(SUCCESS_STATUS) {
        "Success"
    } else {
        "Failure"
    }
}

/// Fee in base units from the gas used and the gas price in gwei.
pub fn transaction_fee(gas_used: u64, gas_price_gwei: f64) -> f64 {
    (gas_used as f64 * gas_price_gwei) / GWEI_PER_UNIT
}

/// Chain timestamps are seconds; the view works in epoch milliseconds.
pub fn timestamp_millis(seconds: u64) -> Result<i64, ExplorerError> {
    seconds
        .checked_mul(1000)
        .and_then(|ms| i64::try_from(ms).ok())
        .ok_or_else(|| ExplorerError::Remote(format!("block timestamp out of range: {seconds}")))
}

/// Format epoch milliseconds in the local time zone.
pub fn format_local_timestamp(millis: i64) -> Result<String, ExplorerError> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|time| time.format(TIMESTAMP_FORMAT).to_string())
        .ok_or_else(|| ExplorerError::Remote(format!("block timestamp out of range: {millis}ms")))
}

fn malformed(field: &str, cause: String) -> ExplorerError {
    ExplorerError::Remote(format!("malformed {field} returned by endpoint: {cause}"))
}
