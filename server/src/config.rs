use std::env;
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    /// Front-end build served at `/` when set.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads `CONNECT4_ADDR` and `CONNECT4_STATIC_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let addr = lookup("CONNECT4_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.addr);
        let static_dir = lookup("CONNECT4_STATIC_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self { addr, static_dir }
    }
}
