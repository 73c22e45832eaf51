//! # Application State
//!
//! Shared state for the Axum application: the payment provider, the
//! payment repository it persists through, and server configuration.

use pay_core::{BoxedPaymentProvider, BoxedPaymentRepository, MemoryRepository};
use pay_razorpay::RazorpayProvider;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for callbacks
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider (Razorpay)
    pub provider: BoxedPaymentProvider,
    /// Payment record repository, shared with the provider
    pub store: BoxedPaymentRepository,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Razorpay provider and an
    /// in-memory repository
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let store: BoxedPaymentRepository = Arc::new(MemoryRepository::new());

        let provider = RazorpayProvider::from_env(store.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize Razorpay: {}", e))?;

        Ok(Self {
            provider: Arc::new(provider),
            store,
            config,
        })
    }
}
