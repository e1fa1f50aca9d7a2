use crate::{
    error::ExplorerError,
    resolver::Resolver,
    validation::{validate_hash, validate_network},
};
use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Search form submission
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub network: String,
    #[serde(default)]
    pub hash: String,
}

/// Network entry as shown in the search form selector
#[derive(Debug, Serialize)]
struct NetworkSummary<'a> {
    id: &'a str,
    name: &'a str,
    currency: &'a str,
    icon: &'a str,
    theme: &'a str,
}

/// Resolve a transaction and return its display-ready details
#[get("/api/v1/transaction/{network}/{hash}")]
async fn transaction_detail(
    resolver: web::Data<Arc<Resolver>>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ExplorerError> {
    let (network, hash) = path.into_inner();
    info!(network = %network, hash = %hash, "Transaction lookup requested");

    match resolver.resolve(&network, &hash).await {
        Ok(view) => {
            info!(status = %view.status, block = view.block_number, "Transaction resolved");
            Ok(HttpResponse::Ok().json(view))
        }
        Err(e) => {
            error!("Transaction lookup failed: {}", e);
            Err(e)
        }
    }
}

/// Validate a search form submission and return the detail route to open
#[post("/api/v1/search")]
async fn search(
    resolver: web::Data<Arc<Resolver>>,
    request: web::Json<SearchRequest>,
) -> Result<HttpResponse, ExplorerError> {
    let hash = request.hash.as_str();
    debug!(network = %request.network, hash, "Search submitted");

    // Blank input gets its own message; padding around a hash is still malformed
    if hash.trim().is_empty() {
        return Err(ExplorerError::Validation("missing transaction hash".to_string()));
    }
    validate_network(&request.network, resolver.registry())?;
    validate_hash(hash)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "location": format!("/transaction/{}/{}", request.network, hash),
    })))
}

/// List the configured networks
#[get("/api/v1/networks")]
async fn networks(resolver: web::Data<Arc<Resolver>>) -> HttpResponse {
    let summaries: Vec<NetworkSummary<'_>> = resolver
        .registry()
        .iter()
        .map(|(id, network)| NetworkSummary {
            id: id.as_str(),
            name: &network.name,
            currency: &network.currency,
            icon: &network.icon,
            theme: &network.theme,
        })
        .collect();
    HttpResponse::Ok().json(summaries)
}

/// Service health check
#[get("/api/v1/health")]
async fn health_check(resolver: web::Data<Arc<Resolver>>) -> HttpResponse {
    info!("Health check requested");
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "networks": resolver.registry().len(),
    }))
}

/// Configure the API routes for the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(transaction_detail)
        .service(search)
        .service(networks)
        .service(health_check);
}
