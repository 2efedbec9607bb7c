#![allow(dead_code)]

use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use user_service::config::{MongoConfig, StoreBackend, UserServiceConfig};
use user_service::services::{InMemoryUserStore, UserStore};
use user_service::startup::{build_router, AppState, Application};

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn UserStore>,
}

pub fn test_config(store: StoreBackend) -> UserServiceConfig {
    UserServiceConfig {
        common: CoreConfig {
            port: 0,
            log_level: "debug".to_string(),
        },
        mongodb: MongoConfig::default(),
        store,
        otlp_endpoint: None,
    }
}

/// Router over a fresh in-memory store, for `oneshot` tests.
pub fn test_router() -> axum::Router {
    router_with_store(Arc::new(InMemoryUserStore::new()))
}

pub fn router_with_store(store: Arc<dyn UserStore>) -> axum::Router {
    build_router(AppState { store })
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let app = Application::with_store(test_config(StoreBackend::Memory), store.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}
