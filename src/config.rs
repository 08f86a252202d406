// src/config.rs
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::message::Agent;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub shared_password: String,
    pub session_ttl: Duration,
    pub relay_timeout: Duration,
    pub accept_invalid_certs: bool,
    pub agents: Vec<Agent>,
}

impl Config {
    /// Read the full configuration from environment variables. `dotenvy`
    /// is expected to have populated the environment already.
    pub fn from_env() -> Result<Self> {
        let bind_addr = env_or("BIND_ADDR", "0.0.0.0:3000")
            .parse()
            .context("BIND_ADDR is not a valid socket address")?;

        let shared_password =
            env::var("SHARED_PASSWORD").context("SHARED_PASSWORD must be set")?;

        let session_ttl = Duration::from_secs(
            env_or("SESSION_TTL_SECS", "28800")
                .parse()
                .context("SESSION_TTL_SECS is not a number")?,
        );

        let relay_timeout = Duration::from_secs(
            env_or("RELAY_TIMEOUT_SECS", "120")
                .parse()
                .context("RELAY_TIMEOUT_SECS is not a number")?,
        );

        Ok(Self {
            bind_addr,
            shared_password,
            session_ttl,
            relay_timeout,
            accept_invalid_certs: env_bool("RELAY_ACCEPT_INVALID_CERTS"),
            agents: agent_roster(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_bool(key: &str) -> bool {
    matches!(
        env::var(key).unwrap_or_default().to_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Known agents. Each joins the roster only when its webhook URL is
/// configured, so a deployment can expose a subset.
fn agent_roster() -> Vec<Agent> {
    [
        (
            "material",
            "Material AI",
            "Inventory & Materials Expert",
            "MATERIAL_WEBHOOK_URL",
        ),
        (
            "logistics",
            "Logistics AI",
            "Shipping & Routing Expert",
            "LOGISTICS_WEBHOOK_URL",
        ),
    ]
    .into_iter()
    .filter_map(|(id, name, description, var)| {
        env::var(var)
            .ok()
            .filter(|url| !url.is_empty())
            .map(|webhook_url| Agent {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                webhook_url,
            })
    })
    .collect()
}
