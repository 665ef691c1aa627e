use std::path::Path;

use crate::config::schema::AppConfig;
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../../../schema/config-v1.json");

pub const ENV_LISTEN: &str = "REQUISITION_LISTEN";
pub const ENV_DATABASE_PATH: &str = "REQUISITION_DATABASE_PATH";
pub const ENV_BASE_URL: &str = "REQUISITION_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "REQUISITION_PAGE_SIZE";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<AppConfig, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: AppConfig = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the file when given, otherwise starts from defaults; then applies
/// environment overrides.
pub fn load_or_default(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    validate_config(&config)?;
    Ok(config)
}

/// Overrides config values from `REQUISITION_*` environment variables.
/// Empty variables are ignored.
pub fn apply_env_overrides(config: &mut AppConfig) -> Result<(), ConfigError> {
    if let Some(listen) = env_value(ENV_LISTEN) {
        config.server.listen = listen;
    }
    if let Some(path) = env_value(ENV_DATABASE_PATH) {
        config.database.path = Some(path);
    }
    if let Some(base_url) = env_value(ENV_BASE_URL) {
        config.client.base_url = base_url;
    }
    if let Some(page_size) = env_value(ENV_PAGE_SIZE) {
        config.table.page_size = page_size.parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::InvalidEnv {
                name: ENV_PAGE_SIZE.to_string(),
                reason: e.to_string(),
            }
        })?;
    }
    Ok(())
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.table.page_size == 0 {
        return Err(ConfigError::Validation {
            message: "table.pageSize must be at least 1".to_string(),
        });
    }

    if config.form.signatory_people.is_empty() {
        return Err(ConfigError::Validation {
            message: "form.signatoryPeople must list at least one person".to_string(),
        });
    }

    let mut people = std::collections::HashSet::new();
    for person in &config.form.signatory_people {
        if !people.insert(person.as_str()) {
            return Err(ConfigError::Validation {
                message: format!("Duplicate signatory person: {}", person),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_load_minimal_config() {
        let config = load_config_from_str(r#"{"version": "1.0"}"#).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_full_config() {
        let config_json = r#"
        {
            "version": "1.0",
            "server": { "listen": "0.0.0.0:8080" },
            "database": { "path": "/tmp/requisition.db" },
            "table": { "pageSize": 10 },
            "form": {
                "bannerDismissSecs": 5,
                "defaultDetails": "Please provide",
                "signatoryPeople": ["A. Reyes", "B. Cruz"]
            },
            "client": { "baseUrl": "http://intranet:3000", "timeoutSecs": 3 }
        }
        "#;

        let config = load_config_from_str(config_json).unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.database.path.as_deref(), Some("/tmp/requisition.db"));
        assert_eq!(config.table.page_size, 10);
        assert_eq!(config.form.banner_dismiss_secs, 5);
        assert_eq!(config.form.signatory_people, vec!["A. Reyes", "B. Cruz"]);
        assert_eq!(config.client.base_url, "http://intranet:3000");
        assert_eq!(config.client.timeout_secs, 3);
    }

    #[test]
    fn test_schema_rejects_unknown_field() {
        let result = load_config_from_str(r#"{"version": "1.0", "workers": 4}"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_schema_rejects_zero_page_size() {
        let result = load_config_from_str(r#"{"version": "1.0", "table": {"pageSize": 0}}"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_unsupported_version() {
        let result = load_config_from_str(r#"{"version": "2.0"}"#);
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_duplicate_signatory_rejected() {
        let result = load_config_from_str(
            r#"{"version": "1.0", "form": {"signatoryPeople": ["Ana Lopez", "Ana Lopez"]}}"#,
        );
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_empty_signatories_rejected() {
        let result = load_config_from_str(r#"{"version": "1.0", "form": {"signatoryPeople": []}}"#);
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let result = load_config_from_str("{ not json");
        assert!(matches!(result, Err(ConfigError::ParseJson(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"version": "1.0", "table": {{"pageSize": 20}}}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.table.page_size, 20);
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/requisition.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var(ENV_LISTEN, "0.0.0.0:9000");
        std::env::set_var(ENV_DATABASE_PATH, ":memory:");
        std::env::set_var(ENV_PAGE_SIZE, "25");

        let config = load_or_default(None).unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:9000");
        assert_eq!(config.database.path.as_deref(), Some(":memory:"));
        assert_eq!(config.table.page_size, 25);

        std::env::remove_var(ENV_LISTEN);
        std::env::remove_var(ENV_DATABASE_PATH);
        std::env::remove_var(ENV_PAGE_SIZE);
    }

    #[test]
    #[serial]
    fn test_invalid_env_page_size() {
        std::env::set_var(ENV_PAGE_SIZE, "many");
        let result = load_or_default(None);
        std::env::remove_var(ENV_PAGE_SIZE);
        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
    }

    #[test]
    #[serial]
    fn test_empty_env_ignored() {
        std::env::set_var(ENV_LISTEN, "  ");
        let config = load_or_default(None).unwrap();
        std::env::remove_var(ENV_LISTEN);
        assert_eq!(config.server.listen, "127.0.0.1:3000");
    }
}
