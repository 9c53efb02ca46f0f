use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overrides keyed by intervention id, then parameter id.
pub type ParameterOverrides = BTreeMap<String, BTreeMap<String, f64>>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Starting implementation level (0-100).
    pub implementation_level: Option<f64>,
    /// Intervention shown first in the TUI.
    pub active: Option<String>,
    pub theme: Option<ThemeMode>,
    pub parameters: Option<ParameterOverrides>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

impl Config {
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.unwrap_or_default()
    }
}
