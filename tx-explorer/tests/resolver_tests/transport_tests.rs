//! HTTP transport behavior against a mock JSON-RPC node.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tx_explorer::{
    error::ExplorerError,
    models::jsonrpc::JsonRpcRequest,
    registry::{NetworkConfig, NetworkRegistry},
    resolver::Resolver,
    rpc::{HttpTransport, RpcTransport, TransportError},
};

use crate::helpers::{receipt_result, spawn_mock_node, zero_hash, Reply};
use crate::init_logger;

fn receipt_request() -> JsonRpcRequest {
    JsonRpcRequest::new(1, "eth_getTransactionReceipt", vec![json!(zero_hash())])
}

fn transport(timeout: Duration) -> HttpTransport {
    HttpTransport::new(timeout).expect("HTTP client builds")
}

#[actix_rt::test]
async fn returns_result_envelope() {
    init_logger();
    let node = spawn_mock_node(vec![(
        "eth_getTransactionReceipt",
        Reply::Result(receipt_result()),
    )]);

    let response = transport(Duration::from_secs(2))
        .call(&node.url, &receipt_request())
        .await
        .expect("call succeeds");

    assert!(response.echoes(1));
    assert_eq!(response.result, Some(receipt_result()));
    assert!(response.error.is_none());
    assert_eq!(node.calls(), vec![receipt_request()]);
    node.stop().await;
}

#[actix_rt::test]
async fn non_success_status_is_reported() {
    let node = spawn_mock_node(vec![("eth_getTransactionReceipt", Reply::Status(429))]);

    let err = transport(Duration::from_secs(2))
        .call(&node.url, &receipt_request())
        .await
        .unwrap_err();

    assert_eq!(err, TransportError::Status(429));
    node.stop().await;
}

#[actix_rt::test]
async fn non_json_body_is_a_decode_failure() {
    let node = spawn_mock_node(vec![(
        "eth_getTransactionReceipt",
        Reply::Raw("<html>rate limited</html>".to_string()),
    )]);

    let err = transport(Duration::from_secs(2))
        .call(&node.url, &receipt_request())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Decode(_)), "{err:?}");
    node.stop().await;
}

#[actix_rt::test]
async fn slow_endpoint_times_out() {
    let node = spawn_mock_node(vec![(
        "eth_getTransactionReceipt",
        Reply::Delayed(Duration::from_secs(3), receipt_result()),
    )]);

    let err = transport(Duration::from_millis(200))
        .call(&node.url, &receipt_request())
        .await
        .unwrap_err();

    assert_eq!(err, TransportError::Timeout);
    node.stop().await;
}

#[actix_rt::test]
async fn refused_connection_is_a_connection_failure() {
    // Reserve a port, then release it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind to port");
    let url = format!("http://{}/", listener.local_addr().expect("bound address"));
    drop(listener);

    let err = transport(Duration::from_secs(2))
        .call(&url, &receipt_request())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Connection(_)), "{err:?}");
}

#[actix_rt::test]
async fn resolver_maps_timeout_to_transport_error() {
    let node = spawn_mock_node(vec![(
        "eth_getTransactionReceipt",
        Reply::Delayed(Duration::from_secs(3), receipt_result()),
    )]);
    let registry: NetworkRegistry = [(
        "ethereum".to_string(),
        NetworkConfig {
            name: "Ethereum".to_string(),
            rpc_url: node.url.clone(),
            currency: "ETH".to_string(),
            icon: String::new(),
            theme: String::new(),
        },
    )]
    .into_iter()
    .collect();
    let resolver = Resolver::new(
        Arc::new(registry),
        Arc::new(transport(Duration::from_millis(200))),
    );

    let err = resolver
        .resolve("ethereum", &zero_hash())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ExplorerError::Transport("Failed to fetch transaction receipt: request timed out".to_string())
    );
    assert_eq!(node.methods(), vec!["eth_getTransactionReceipt"]);
    node.stop().await;
}
