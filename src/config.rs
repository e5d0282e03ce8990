use dotenvy::dotenv;
use tracing::{info, warn};

/// Default HTTP listen port
const DEFAULT_PORT: u16 = 3000;

/// Fallback admin secret for local development only
const DEV_ADMIN_TOKEN: &str = "dev-admin-token";

#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    /// HTTP listen port
    port: u16,

    /// Shared secret gating privileged request transitions
    admin_token: String,

    /// Optional path to an item catalog JSON file
    catalog_path: Option<String>,
}

impl ServerConfig {
    pub(crate) fn new() -> Self {
        dotenv().ok(); // Load `.env` file if present

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let admin_token = std::env::var("ADMIN_API_TOKEN").unwrap_or_else(|_| {
            warn!("ADMIN_API_TOKEN not set, using the development default");
            DEV_ADMIN_TOKEN.to_string()
        });

        let catalog_path = std::env::var("ITEM_CATALOG_PATH").ok();

        info!(%port, catalog_path = ?catalog_path, "Loaded server config:");

        ServerConfig {
            port,
            admin_token,
            catalog_path,
        }
    }

    /// Getter for `port`
    pub(crate) fn port(&self) -> u16 {
        self.port
    }

    /// Getter for `admin_token`
    pub(crate) fn admin_token(&self) -> &str {
        &self.admin_token
    }

    /// Getter for `catalog_path`
    pub(crate) fn catalog_path(&self) -> Option<&str> {
        self.catalog_path.as_deref()
    }
}
