//! Input checks run before any remote call is issued.

use crate::{
    error::ExplorerError,
    registry::{NetworkConfig, NetworkRegistry},
};

/// Length of a transaction hash including the `0x` prefix
pub const TX_HASH_LEN: usize = 66;

/// Check that `hash` is `0x` followed by exactly 64 hex digits.
pub fn validate_hash(hash: &str) -> Result<(), ExplorerError> {
    let well_formed = hash.len() == TX_HASH_LEN
        && hash
            .strip_prefix("0x")
            .is_some_and(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()));

    if well_formed {
        Ok(())
    } else {
        Err(ExplorerError::Validation("malformed transaction hash".to_string()))
    }
}

/// Check that `network_id` is a key of the registry and return its entry.
pub fn validate_network<'a>(
    network_id: &str,
    registry: &'a NetworkRegistry,
) -> Result<&'a NetworkConfig, ExplorerError> {
    registry
        .get(network_id)
        .ok_or_else(|| ExplorerError::Validation("unknown network".to_string()))
}
