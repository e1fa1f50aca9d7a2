use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;
use tx_explorer::{api, config::Config, resolver::Resolver, rpc::HttpTransport};

/// Application entry point
///
/// Sets up logging, loads configuration and the network registry, then starts
/// the HTTP server with all endpoints.
#[actix_web::main]
async fn main() -> eyre::Result<()> {
    // Debug level for our service, lower levels for dependencies
    let filter = EnvFilter::from_default_env()
        .add_directive("tx_explorer=info".parse()?)
        .add_directive("actix_web=error".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    let registry = Arc::new(config.registry());
    info!(networks = registry.len(), "Loaded network registry");

    let transport = HttpTransport::new(config.request_timeout())?;

    // Shared between workers; holds no mutable state
    let resolver = Arc::new(Resolver::new(registry, Arc::new(transport)));

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(resolver.clone()))
            .configure(api::configure)
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
