// src/state.rs
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::message::Agent;
use crate::services::relay::{RelayClient, RelayConfig};
use crate::services::session_store::SessionStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionStore,
    pub relay: RelayClient,
    pub agents: Vec<Agent>,
    pub shared_password: String,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let relay = RelayClient::new(&RelayConfig {
            timeout: config.relay_timeout,
            accept_invalid_certs: config.accept_invalid_certs,
        })?;

        Ok(Self {
            sessions: SessionStore::new(config.session_ttl),
            relay,
            agents: config.agents,
            shared_password: config.shared_password,
        })
    }
}
