//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - An in-memory test server with handles to its stores
//! - Custom assertion macros

#![allow(dead_code)]

#[macro_use]
pub mod assertions;

use std::time::Duration;

use axum_test::TestServer;
use orcax::backend::routes::create_router;
use orcax::backend::server::{memory_state, AppState, MemoryStores, ServerConfig};
use orcax::shared::{AssetDefaults, ResolverConfig};

/// Server configuration used by the tests: `/api` prefix, short ledger timeout
pub fn test_config() -> ServerConfig {
    ServerConfig {
        resolver: ResolverConfig::builder()
            .ledger_timeout(Duration::from_millis(200))
            .build()
            .expect("valid resolver config"),
        ..ServerConfig::default()
    }
}

/// Same as [`test_config`] but granting `defaults` to new users
pub fn config_with_defaults(defaults: AssetDefaults) -> ServerConfig {
    let mut config = test_config();
    config.resolver.defaults = defaults;
    config
}

/// Test server over in-memory stores
pub struct TestApp {
    pub server: TestServer,
    pub stores: MemoryStores,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let (state, stores) = memory_state(config);
        let server = TestServer::new(create_router(state.clone())).expect("test server");
        Self {
            server,
            stores,
            state,
        }
    }
}
