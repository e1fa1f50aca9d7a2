use crate::{
    error::ExplorerError,
    models::{
        chain::{Block, Receipt, TransactionDetails},
        jsonrpc::JsonRpcRequest,
        view::ResolvedTransactionView,
    },
    registry::{NetworkConfig, NetworkRegistry},
    rpc::RpcTransport,
    validation::{validate_hash, validate_network},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

/// One of the three remote lookups of a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Receipt,
    Transaction,
    Block,
}

impl Stage {
    /// JSON-RPC method issued by this stage
    pub fn method(self) -> &'static str {
        match self {
            Stage::Receipt => "eth_getTransactionReceipt",
            Stage::Transaction => "eth_getTransactionByHash",
            Stage::Block => "eth_getBlockByHash",
        }
    }

    /// Request id; increases with each stage of a resolution
    pub fn request_id(self) -> u64 {
        match self {
            Stage::Receipt => 1,
            Stage::Transaction => 2,
            Stage::Block => 3,
        }
    }

    fn transport_failure(self) -> &'static str {
        match self {
            Stage::Receipt => "Failed to fetch transaction receipt",
            Stage::Transaction => "Failed to fetch transaction details",
            Stage::Block => "Failed to fetch block details",
        }
    }

    fn remote_default(self) -> &'static str {
        match self {
            Stage::Receipt => "Transaction receipt not found",
            Stage::Transaction => "Transaction details not found",
            Stage::Block => "Block details not found",
        }
    }

    fn not_found(self) -> &'static str {
        match self {
            Stage::Receipt => "transaction not found on this network",
            Stage::Transaction => "transaction details not found on this network",
            Stage::Block => "block not found on this network",
        }
    }

    fn record(self) -> &'static str {
        match self {
            Stage::Receipt => "receipt",
            Stage::Transaction => "transaction",
            Stage::Block => "block",
        }
    }
}

/// Progress of a single resolution
///
/// `Resolved` and `Failed` are terminal.
#[derive(Debug)]
pub enum Resolution {
    Idle,
    FetchingReceipt,
    FetchingTransaction {
        receipt: Receipt,
    },
    FetchingBlock {
        receipt: Receipt,
        transaction: TransactionDetails,
    },
    Resolved(ResolvedTransactionView),
    Failed(ExplorerError),
}

impl Resolution {
    fn name(&self) -> &'static str {
        match self {
            Resolution::Idle => "Idle",
            Resolution::FetchingReceipt => "FetchingReceipt",
            Resolution::FetchingTransaction { .. } => "FetchingTransaction",
            Resolution::FetchingBlock { .. } => "FetchingBlock",
            Resolution::Resolved(_) => "Resolved",
            Resolution::Failed(_) => "Failed",
        }
    }
}

/// Resolves a transaction hash into a display-ready view
///
/// Holds only immutable state, so a single instance serves concurrent
/// lookups. Dropping the future returned by [`Resolver::resolve`] abandons any
/// in-flight call; no remote state is ever mutated.
#[derive(Clone)]
pub struct Resolver {
    registry: Arc<NetworkRegistry>,
    transport: Arc<dyn RpcTransport>,
}

impl Resolver {
    pub fn new(registry: Arc<NetworkRegistry>, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Look up `hash` on `network_id`
    ///
    /// Validates both inputs, then fetches the receipt, the transaction and the
    /// block containing it, strictly in that order. The first failure ends the
    /// resolution.
    #[instrument(skip(self), err)]
    pub async fn resolve(
        &self,
        network_id: &str,
        hash: &str,
    ) -> Result<ResolvedTransactionView, ExplorerError> {
        let mut state = Resolution::Idle;
        let mut network: Option<&NetworkConfig> = None;

        loop {
            let next = match state {
                Resolution::Idle => match validate_network(network_id, &self.registry)
                    .and_then(|config| validate_hash(hash).map(|_| config))
                {
                    Ok(config) => {
                        network = Some(config);
                        Resolution::FetchingReceipt
                    }
                    Err(e) => Resolution::Failed(e),
                },
                Resolution::FetchingReceipt => {
                    let endpoint = rpc_url(network)?;
                    match self
                        .fetch::<Receipt>(endpoint, Stage::Receipt, vec![json!(hash)])
                        .await
                    {
                        Ok(receipt) => Resolution::FetchingTransaction { receipt },
                        Err(e) => Resolution::Failed(e),
                    }
                }
                Resolution::FetchingTransaction { receipt } => {
                    let endpoint = rpc_url(network)?;
                    match self
                        .fetch::<TransactionDetails>(endpoint, Stage::Transaction, vec![json!(hash)])
                        .await
                    {
                        Ok(transaction) => Resolution::FetchingBlock {
                            receipt,
                            transaction,
                        },
                        Err(e) => Resolution::Failed(e),
                    }
                }
                Resolution::FetchingBlock {
                    receipt,
                    transaction,
                } => {
                    let endpoint = rpc_url(network)?;
                    // Only the header timestamp is read, so skip full transaction bodies
                    let params = vec![json!(receipt.block_hash), json!(false)];
                    match self.fetch::<Block>(endpoint, Stage::Block, params).await {
                        Ok(block) => {
                            let config = network.ok_or_else(missing_network)?;
                            match ResolvedTransactionView::derive(
                                network_id,
                                config,
                                hash,
                                &receipt,
                                &transaction,
                                &block,
                            ) {
                                Ok(view) => Resolution::Resolved(view),
                                Err(e) => Resolution::Failed(e),
                            }
                        }
                        Err(e) => Resolution::Failed(e),
                    }
                }
                Resolution::Resolved(view) => return Ok(view),
                Resolution::Failed(e) => return Err(e),
            };

            debug!(state = next.name(), "Resolution advanced");
            state = next;
        }
    }

    /// Issue one stage's call and decode its result into `T`
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        stage: Stage,
        params: Vec<serde_json::Value>,
    ) -> Result<T, ExplorerError> {
        let request = JsonRpcRequest::new(stage.request_id(), stage.method(), params);

        let response = self
            .transport
            .call(endpoint, &request)
            .await
            .map_err(|e| ExplorerError::Transport(format!("{}: {}", stage.transport_failure(), e)))?;

        if let Some(detail) = response.error {
            let message = if detail.message.is_empty() {
                stage.remote_default().to_string()
            } else {
                detail.message
            };
            return Err(ExplorerError::Remote(message));
        }

        let result = match response.result {
            Some(value) if !value.is_null() => value,
            _ => return Err(ExplorerError::NotFound(stage.not_found().to_string())),
        };

        serde_json::from_value(result).map_err(|e| {
            ExplorerError::Remote(format!(
                "malformed {} returned by endpoint: {}",
                stage.record(),
                e
            ))
        })
    }
}

fn rpc_url(network: Option<&NetworkConfig>) -> Result<&str, ExplorerError> {
    network
        .map(|config| config.rpc_url.as_str())
        .ok_or_else(missing_network)
}

// Only reachable if a fetching state is entered without passing validation.
fn missing_network() -> ExplorerError {
    ExplorerError::Validation("unknown network".to_string())
}
