use actix_web::{dev::ServerHandle, web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tx_explorer::models::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

/// How the mock node answers one JSON-RPC method.
#[derive(Clone)]
#[allow(dead_code)]
pub enum Reply {
    /// `{"result": value}`; use `Value::Null` for an unknown entity
    Result(Value),
    /// `{"error": {"code", "message"}}`
    Error(i64, String),
    /// Bare HTTP status with an empty body
    Status(u16),
    /// Non-JSON body with HTTP 200
    Raw(String),
    /// Wait before answering with `{"result": value}`
    Delayed(Duration, Value),
}

#[derive(Clone)]
struct NodeState {
    replies: Arc<HashMap<String, Reply>>,
    calls: Arc<Mutex<Vec<JsonRpcRequest>>>,
}

/// A JSON-RPC node served by a real HTTP server on a free port.
pub struct MockNode {
    pub url: String,
    calls: Arc<Mutex<Vec<JsonRpcRequest>>>,
    handle: ServerHandle,
}

#[allow(dead_code)]
impl MockNode {
    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<JsonRpcRequest> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Methods received so far, in arrival order.
    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.method).collect()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn rpc(state: web::Data<NodeState>, request: web::Json<JsonRpcRequest>) -> HttpResponse {
    let request = request.into_inner();
    state
        .calls
        .lock()
        .expect("calls lock poisoned")
        .push(request.clone());

    match state.replies.get(&request.method) {
        Some(Reply::Result(value)) => {
            HttpResponse::Ok().json(JsonRpcResponse::success(request.id, value.clone()))
        }
        Some(Reply::Error(code, message)) => {
            HttpResponse::Ok().json(JsonRpcResponse::failure(request.id, *code, message.clone()))
        }
        Some(Reply::Status(status)) => HttpResponse::build(
            actix_web::http::StatusCode::from_u16(*status).expect("valid status code"),
        )
        .finish(),
        Some(Reply::Raw(body)) => HttpResponse::Ok()
            .content_type("text/plain")
            .body(body.clone()),
        Some(Reply::Delayed(delay, value)) => {
            actix_rt::time::sleep(*delay).await;
            HttpResponse::Ok().json(JsonRpcResponse::success(request.id, value.clone()))
        }
        None => HttpResponse::Ok().json(JsonRpcResponse::failure(
            request.id,
            -32601,
            format!("the method {} does not exist/is not available", request.method),
        )),
    }
}

/// Spawns a mock JSON-RPC node on a free port answering with `replies`.
///
/// # Panics
///
/// Panics if it fails to bind to a free port. Must be called from within an
/// actix runtime.
pub fn spawn_mock_node(replies: Vec<(&str, Reply)>) -> MockNode {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind to port");
    let port = listener.local_addr().expect("bound address").port();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = web::Data::new(NodeState {
        replies: Arc::new(
            replies
                .into_iter()
                .map(|(method, reply)| (method.to_string(), reply))
                .collect(),
        ),
        calls: calls.clone(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::post().to(rpc))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to start mock node")
    .run();

    let handle = server.handle();
    actix_rt::spawn(server);

    MockNode {
        url: format!("http://127.0.0.1:{}/", port),
        calls,
        handle,
    }
}

/// A transaction hash of 64 zero digits.
pub fn zero_hash() -> String {
    format!("0x{}", "0".repeat(64))
}

/// Block hash returned by [`receipt_result`].
pub fn receipt_block_hash() -> String {
    format!("0x{}", "ab".repeat(32))
}

pub fn receipt_result() -> Value {
    json!({
        "transactionHash": zero_hash(),
        "status": "0x1",
        "blockNumber": "0x12a05f2",
        "blockHash": receipt_block_hash(),
        "gasUsed": "0x5208",
        "cumulativeGasUsed": "0x5208",
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
        "contractAddress": null,
        "logs": [],
        "type": "0x2"
    })
}

pub fn transaction_result() -> Value {
    json!({
        "hash": zero_hash(),
        "value": "0xde0b6b3a7640000",
        "gasPrice": "0x3b9aca00",
        "gas": "0x5208",
        "nonce": "0x0",
        "input": "0x"
    })
}

pub fn block_result() -> Value {
    json!({
        "hash": receipt_block_hash(),
        "number": "0x12a05f2",
        "timestamp": "0x5f5e100",
        "transactions": []
    })
}

/// Replies for a fully mined transaction.
pub fn mined_transaction() -> Vec<(&'static str, Reply)> {
    vec![
        ("eth_getTransactionReceipt", Reply::Result(receipt_result())),
        ("eth_getTransactionByHash", Reply::Result(transaction_result())),
        ("eth_getBlockByHash", Reply::Result(block_result())),
    ]
}
