mod schema;

pub use schema::{Config, ParameterOverrides, ThemeMode};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::catalog::{intervention, InterventionKind};
use crate::scoring::ImplementationLevel;

/// Get the config directory path (~/.config/urban-impact/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("urban-impact"))
}

/// Get the default config file path (~/.config/urban-impact/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                log::debug!("No config at {}, using defaults", default_path.display());
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    log::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

/// Validate a loaded config at startup.
/// Returns all validation errors at once (not just the first).
///
/// Parameter values are not range-checked here; they are clamped when applied.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(level) = config.implementation_level {
        if !(ImplementationLevel::MIN..=ImplementationLevel::MAX).contains(&level) {
            errors.push(format!(
                "implementation_level: {} is outside 0-100",
                level
            ));
        }
    }

    if let Some(ref active) = config.active {
        if let Err(e) = active.parse::<InterventionKind>() {
            errors.push(format!("active: {}", e));
        }
    }

    if let Some(ref parameters) = config.parameters {
        for (intervention_id, values) in parameters {
            let kind = match intervention_id.parse::<InterventionKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    errors.push(format!("parameters.{}: {}", intervention_id, e));
                    continue;
                }
            };
            let entry = intervention(kind);
            for (param_id, value) in values {
                if let Err(e) = entry.require_parameter(param_id) {
                    errors.push(format!("parameters.{}.{}: {}", intervention_id, param_id, e));
                } else if !value.is_finite() {
                    errors.push(format!(
                        "parameters.{}.{}: value must be a finite number",
                        intervention_id, param_id
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
