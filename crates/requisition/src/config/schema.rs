use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::db::{default_database_path, DatabaseLocation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            table: TableConfig::default(),
            form: FormConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path. `:memory:` selects an in-memory database.
    #[serde(default)]
    pub path: Option<String>,
}

impl DatabaseConfig {
    /// Resolves where the request store lives, falling back to
    /// `~/.requisition/data/requisition.db`.
    pub fn location(&self) -> DatabaseLocation {
        match self.path.as_deref() {
            Some(":memory:") => DatabaseLocation::Memory,
            Some(path) => DatabaseLocation::File(PathBuf::from(path)),
            None => default_database_path()
                .map(DatabaseLocation::File)
                .unwrap_or(DatabaseLocation::File(PathBuf::from("requisition.db"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    15
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    #[serde(default = "default_banner_dismiss_secs")]
    pub banner_dismiss_secs: u64,
    #[serde(default = "default_details")]
    pub default_details: String,
    #[serde(default = "default_signatory_people")]
    pub signatory_people: Vec<String>,
}

fn default_banner_dismiss_secs() -> u64 {
    3
}

fn default_details() -> String {
    "We would like to request".to_string()
}

fn default_signatory_people() -> Vec<String> {
    ["Juan Dela Cruz", "Maria Santos", "Pedro Reyes", "Ana Lopez"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            banner_dismiss_secs: default_banner_dismiss_secs(),
            default_details: default_details(),
            signatory_people: default_signatory_people(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
