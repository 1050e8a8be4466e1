use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Environment variable holding the listen port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable holding the store connection string.
pub const ENV_STORE_URI: &str = "STORE_URI";
/// Legacy name for [`ENV_STORE_URI`], read when the primary is unset.
pub const ENV_STORE_URI_LEGACY: &str = "MONGO_URI";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub store_uri: Option<String>,
    pub max_body_bytes: usize,
    /// Pause between the shutdown signal and the start of draining.
    pub shutdown_grace_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            store_uri: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            shutdown_grace_ms: 0,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Overlay values from a variable lookup, normally the process
    /// environment. Empty values count as unset.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> ServerResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("invalid {ENV_PORT}: {port:?}")))?;
        }
        if let Some(uri) = get(ENV_STORE_URI).or_else(|| get(ENV_STORE_URI_LEGACY)) {
            self.store_uri = Some(uri);
        }
        Ok(())
    }
}
