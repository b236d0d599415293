use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use super::{ConfigFile, ConfigOverrides, KpiConfig};
use crate::error::{common, ErrorCode, KpiError, Result};

/// Parse configuration text. Relative paths resolve against `base_dir`.
pub fn parse_config_str(content: &str, base_dir: &Path) -> Result<ConfigFile> {
    let mut file: ConfigFile = toml::from_str(content).map_err(|e| {
        KpiError::config_with_code(ErrorCode::CONFIG_PARSE_ERROR, "invalid TOML", None)
            .with_source(e)
    })?;
    file.resolve_paths(base_dir);
    Ok(file)
}

/// Load the configuration file at `path`, merge the environment and the
/// command-line overrides, and validate.
pub fn load_config(path: &Path, overrides: &ConfigOverrides) -> Result<KpiConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        let err = if e.kind() == ErrorKind::NotFound {
            common::config_not_found(path)
        } else {
            KpiError::config_with_code(
                ErrorCode::CONFIG_GENERIC,
                "failed to read configuration file",
                Some(path.to_path_buf()),
            )
        };
        err.with_source(e)
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = parse_config_str(&content, base_dir).map_err(|e| e.with_path(path))?;
    file.merge_env_vars().map_err(|e| e.with_path(path))?;
    file.apply_overrides(overrides);

    let config = file.into_config().map_err(|e| e.with_path(path))?;
    debug!(
        "Loaded configuration from {}: {} regions, {} capacity hours",
        path.display(),
        config.regions.len(),
        config.capacity.hours()
    );
    Ok(config)
}
