pub mod loader;
pub mod schema;

pub use loader::{apply_env_overrides, load_config, load_config_from_str, load_or_default};
pub use schema::{AppConfig, ClientConfig, DatabaseConfig, FormConfig, ServerConfig, TableConfig};
