use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;

use crate::utils::hash_ip::DEFAULT_IP_SALT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Jsonl { dir: PathBuf },
    Sqlite { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub port: u16,
    pub landing_url: Option<String>, // Missing only fails the click endpoint
    pub store: StoreBackend,
    pub ip_salt: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(p) => p
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {}", p))?,
            None => 8080,
        };

        let data_dir = PathBuf::from(get("DATA_DIR").unwrap_or_else(|| String::from("./data")));
        let store = match get("STORE_BACKEND").as_deref().unwrap_or("jsonl") {
            "jsonl" => StoreBackend::Jsonl { dir: data_dir },
            "sqlite" => StoreBackend::Sqlite {
                path: get("DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| data_dir.join("tracking.db")),
            },
            other => bail!("Unknown STORE_BACKEND '{}', expected 'jsonl' or 'sqlite'", other),
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| String::from("127.0.0.1")),
            port,
            landing_url: get("LANDING_URL"),
            store,
            ip_salt: get("IP_HASH_SALT").unwrap_or_else(|| DEFAULT_IP_SALT.to_string()),
        })
    }
}
