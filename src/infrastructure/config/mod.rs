use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::Result;

/// Runtime settings for the local backend.
///
/// Values come from defaults, then `inventario.toml` next to the binary,
/// then `INVENTARIO_*` environment variables, later sources winning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("inventario.toml"))
            .merge(Env::prefixed("INVENTARIO_"))
            .extract()?;
        Ok(settings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
