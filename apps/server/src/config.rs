use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use voltmarket_core::{capabilities::CapabilitySet, events::DEFAULT_FEED_CAPACITY};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    /// Root directory holding one sub-directory per document bucket.
    pub storage_dir: String,
    /// Base URL used to build public document links.
    pub public_url: String,
    pub mapbox_token: Option<String>,
    pub capabilities: CapabilitySet,
    pub event_bus_capacity: usize,
    /// Number of recent events kept for `/realtime/{table}/recent`.
    pub realtime_history: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/voltmarket.db".to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            static_dir: "dist".to_string(),
            storage_dir: "./storage".to_string(),
            public_url: "http://localhost:8080".to_string(),
            mapbox_token: None,
            capabilities: CapabilitySet::default(),
            event_bus_capacity: 256,
            realtime_history: DEFAULT_FEED_CAPACITY,
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Loads `.env` (when present) and reads the `VM_*` variables on top of
    /// the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match env_var("VM_LISTEN_ADDR") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .with_context(|| format!("Invalid VM_LISTEN_ADDR '{}'", raw))?,
            None => defaults.listen_addr,
        };
        let cors_allow = env_var("VM_CORS_ALLOW_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allow);
        let timeout_ms: u64 = env_var("VM_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30_000);
        let capabilities = match env_var("VM_ENABLED_FEATURES") {
            Some(raw) => CapabilitySet::parse_list(&raw)
                .map_err(|e| anyhow::anyhow!("Invalid VM_ENABLED_FEATURES: {}", e))?,
            None => defaults.capabilities,
        };
        let event_bus_capacity = env_var("VM_EVENT_BUS_CAPACITY")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|c| *c > 0)
            .unwrap_or(defaults.event_bus_capacity);
        let realtime_history = env_var("VM_REALTIME_HISTORY")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|c| *c > 0)
            .unwrap_or(defaults.realtime_history);

        Ok(Self {
            listen_addr,
            db_path: env_var("VM_DB_PATH").unwrap_or(defaults.db_path),
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir: env_var("VM_STATIC_DIR").unwrap_or(defaults.static_dir),
            storage_dir: env_var("VM_STORAGE_DIR").unwrap_or(defaults.storage_dir),
            public_url: env_var("VM_PUBLIC_URL").unwrap_or(defaults.public_url),
            mapbox_token: env_var("MAPBOX_PUBLIC_TOKEN"),
            capabilities,
            event_bus_capacity,
            realtime_history,
        })
    }
}
