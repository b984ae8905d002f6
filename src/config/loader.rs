//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DomekeeperConfig, StoreTarget};
use crate::config::secret_string;
use crate::domain::errors::DomekeeperError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_VAR: &str = "DOMEKEEPER_CONFIG";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`DomekeeperConfig`]
/// 4. Applies environment variable overrides (`DOMEKEEPER_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced variable is
/// unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use domekeeper::config::loader::load_config;
///
/// let config = load_config("domekeeper.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DomekeeperConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DomekeeperError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DomekeeperError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<DomekeeperConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: DomekeeperConfig = toml::from_str(&contents)
        .map_err(|e| DomekeeperError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        DomekeeperError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DomekeeperError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(DomekeeperError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(val) => val.parse().map(Some).map_err(|_| {
            DomekeeperError::Configuration(format!("Invalid value for {name}: '{val}'"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using the `DOMEKEEPER_*` prefix
///
/// Variables follow the pattern `DOMEKEEPER_<SECTION>_<KEY>`, for example
/// `DOMEKEEPER_RECONCILE_CHUNK_SIZE` or `DOMEKEEPER_POSTGREST_API_KEY`.
fn apply_env_overrides(config: &mut DomekeeperConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("DOMEKEEPER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(dry_run) = env_parse("DOMEKEEPER_APPLICATION_DRY_RUN")? {
        config.application.dry_run = dry_run;
    }

    if let Ok(val) = std::env::var("DOMEKEEPER_STORE_TARGET") {
        config.store_target = match val.to_lowercase().as_str() {
            "postgresql" => StoreTarget::PostgreSQL,
            "postgrest" => StoreTarget::PostgREST,
            "memory" => StoreTarget::Memory,
            other => {
                return Err(DomekeeperError::Configuration(format!(
                    "Invalid DOMEKEEPER_STORE_TARGET '{other}'. Must be one of: postgresql, postgrest, memory"
                )))
            }
        };
    }

    // Ingest overrides
    if let Ok(val) = std::env::var("DOMEKEEPER_INGEST_SHEET_NAME") {
        config.ingest.sheet_name = Some(val);
    }

    // Reconcile overrides
    if let Some(size) = env_parse("DOMEKEEPER_RECONCILE_CHUNK_SIZE")? {
        config.reconcile.chunk_size = size;
    }
    if let Some(batches) = env_parse("DOMEKEEPER_RECONCILE_MAX_CONCURRENT_BATCHES")? {
        config.reconcile.max_concurrent_batches = batches;
    }

    // Store overrides (only for configured sections)
    if let Some(ref mut pg) = config.postgresql {
        if let Ok(val) = std::env::var("DOMEKEEPER_POSTGRESQL_CONNECTION_STRING") {
            pg.connection_string = secret_string(val);
        }
        if let Some(max) = env_parse("DOMEKEEPER_POSTGRESQL_MAX_CONNECTIONS")? {
            pg.max_connections = max;
        }
    }
    if let Some(ref mut rest) = config.postgrest {
        if let Ok(val) = std::env::var("DOMEKEEPER_POSTGREST_BASE_URL") {
            rest.base_url = val;
        }
        if let Ok(val) = std::env::var("DOMEKEEPER_POSTGREST_API_KEY") {
            rest.api_key = secret_string(val);
        }
        if let Ok(val) = std::env::var("DOMEKEEPER_POSTGREST_TABLE") {
            rest.table = val;
        }
    }

    // Guide overrides
    if let Some(confidence) = env_parse("DOMEKEEPER_GUIDE_MIN_CONFIDENCE")? {
        config.guide.min_confidence = confidence;
    }

    // Logging overrides
    if let Some(enabled) = env_parse("DOMEKEEPER_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = enabled;
    }
    if let Ok(val) = std::env::var("DOMEKEEPER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("DK_LOADER_TEST_VAR", "test_value");
        let input = "api_key = \"${DK_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"test_value\"");
        std::env::remove_var("DK_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# api_key = \"${DK_LOADER_COMMENTED_OUT}\"";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("DK_LOADER_MISSING_VAR");
        let input = "api_key = \"${DK_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("DK_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-domekeeper.toml");
        assert!(matches!(result, Err(DomekeeperError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
store_target = "memory"

[application]
log_level = "debug"

[ingest]
sheet_name = "Inventory"

[reconcile]
chunk_size = 50
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.ingest.sheet_name.as_deref(), Some("Inventory"));
        assert_eq!(config.reconcile.chunk_size, 50);
        assert_eq!(config.reconcile.max_concurrent_batches, 1);
        assert_eq!(config.store_target, StoreTarget::Memory);
    }

    #[test]
    fn test_invalid_chunk_size_rejected() {
        let result = parse_config("[reconcile]\nchunk_size = 0\n");
        assert!(result.is_err());
    }
}
