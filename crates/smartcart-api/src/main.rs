//! SmartCart API server binary.

use async_trait::async_trait;
use clap::Parser;
use smartcart_ai::{
    AiConfig, AiError, CompletionBackend, CompletionRequest, HttpCompletionClient, TextGenerator,
};
use smartcart_api::auth::{Role, SessionStore, User};
use smartcart_api::{server, AppContext, ServerConfig};
use smartcart_commerce::UserId;
use smartcart_store::Shop;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "smartcart-server", about = "SmartCart storefront API server")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = smartcart_api::config::DEFAULT_PORT)]
    port: u16,

    /// Seed a demo catalog on startup.
    #[arg(long)]
    seed: bool,
}

/// Backend used when no API key is configured; every call fails with a
/// configuration error instead of a confusing upstream 401.
struct DisabledBackend;

#[async_trait]
impl CompletionBackend for DisabledBackend {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, AiError> {
        Err(AiError::NotConfigured)
    }

    fn model(&self) -> &str {
        "disabled"
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
    };

    let backend: Arc<dyn CompletionBackend> = match AiConfig::from_env() {
        Ok(ai_config) => {
            info!(model = %ai_config.model, "AI backend configured");
            Arc::new(HttpCompletionClient::new(ai_config))
        }
        Err(_) => {
            warn!("SMARTCART_AI_API_KEY not set; AI endpoints will return errors");
            Arc::new(DisabledBackend)
        }
    };

    let shop = Shop::new();
    if cli.seed {
        server::seed_demo_catalog(&shop)?;
    }

    let sessions = SessionStore::new();
    let customer_token = sessions.issue(User {
        id: UserId::new("demo-customer"),
        name: "Demo Customer".to_string(),
        email: "customer@example.com".to_string(),
        role: Role::Customer,
    })?;
    let admin_token = sessions.issue(User {
        id: UserId::new("demo-admin"),
        name: "Demo Admin".to_string(),
        email: "admin@example.com".to_string(),
        role: Role::Admin,
    })?;
    info!(token = %customer_token, "demo customer session");
    info!(token = %admin_token, "demo admin session");

    let ctx = AppContext::new(shop, sessions, TextGenerator::new(backend));
    let api = server::routes(ctx);

    info!(addr = %config.addr(), "listening");
    warp::serve(api).run(config.addr()).await;
    Ok(())
}
