use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::geo::Feature;

/// One of the three predefined design scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterventionKind {
    Street,
    PublicSpace,
    Campus,
}

impl InterventionKind {
    pub const ALL: [InterventionKind; 3] = [
        InterventionKind::Street,
        InterventionKind::PublicSpace,
        InterventionKind::Campus,
    ];

    /// Stable identifier used in config files and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            InterventionKind::Street => "street",
            InterventionKind::PublicSpace => "publicSpace",
            InterventionKind::Campus => "campus",
        }
    }

    /// Position in [`InterventionKind::ALL`] (tab order).
    pub fn index(self) -> usize {
        match self {
            InterventionKind::Street => 0,
            InterventionKind::PublicSpace => 1,
            InterventionKind::Campus => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for InterventionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for InterventionKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "street" => Ok(InterventionKind::Street),
            "publicspace" => Ok(InterventionKind::PublicSpace),
            "campus" => Ok(InterventionKind::Campus),
            _ => Err(ConfigurationError::UnknownIntervention(s.to_string())),
        }
    }
}

/// Base map tiles used by every intervention.
pub const BASE_MAP_STYLE: &str = "mapbox://styles/mapbox/light-v11";

/// Initial viewport for an intervention's map; also the "reset view" target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapSettings {
    /// `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    /// Style URL
    pub style: &'static str,
}

/// A user-adjustable numeric knob.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub id: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub unit: &'static str,
    pub description: &'static str,
}

impl Parameter {
    /// Clamp into `[min, max]`, the way a range input does.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Clamp, then snap onto the `min + k * step` grid.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }

    /// Move `steps` grid positions from `value` (negative moves down).
    /// An off-grid value counts its nearest grid point in the direction of
    /// travel as the first step.
    pub fn step_from(&self, value: f64, steps: i32) -> f64 {
        if steps == 0 || self.step <= 0.0 {
            return self.snap(value);
        }
        let position = (self.clamp(value) - self.min) / self.step;
        let target = if steps > 0 {
            (position + GRID_EPSILON).floor() + steps as f64
        } else {
            (position - GRID_EPSILON).ceil() + steps as f64
        };
        self.clamp(self.min + target * self.step)
    }

    /// Display form used next to sliders: `40%`, `150m`, `3`.
    pub fn format_value(&self, value: f64) -> String {
        format!("{}{}", format_number(value), self.unit)
    }
}

/// Tolerance for float noise when locating a value on the step grid.
const GRID_EPSILON: f64 = 1e-9;

/// Render whole numbers without a fractional part (`4`), others with one decimal (`4.5`).
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// A named, colored indicator scored by the metric engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub id: &'static str,
    pub label: &'static str,
    pub base_value: f64,
    pub unit: &'static str,
    /// `#RRGGBB`
    pub color: &'static str,
}

impl Metric {
    /// `42.5` for unitless metrics, `42.5 sqm` otherwise.
    pub fn format_value(&self, value: f64) -> String {
        if self.unit.is_empty() {
            format!("{:.1}", value)
        } else {
            format!("{:.1} {}", value, self.unit)
        }
    }

    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(self.color)
    }
}

/// Parse `#RRGGBB` into components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Ties the visible count of one feature type to a parameter value
/// (e.g. how many plazas are drawn follows `plaza-count`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureFilter {
    pub type_tag: &'static str,
    pub parameter_id: &'static str,
}

pub const DEFAULT_FEATURE_COLOR: &str = "#888888";

#[derive(Debug, Clone)]
pub struct Intervention {
    pub kind: InterventionKind,
    pub title: &'static str,
    pub description: &'static str,
    pub map: MapSettings,
    pub parameters: &'static [Parameter],
    pub metrics: &'static [Metric],
    pub features: &'static [Feature],
    pub feature_filter: Option<FeatureFilter>,
    /// Per-type multipliers applied to the scaled point radius.
    pub radius_multipliers: &'static [(&'static str, f64)],
    /// Per-type feature colors; unlisted types fall back to [`DEFAULT_FEATURE_COLOR`].
    pub palette: &'static [(&'static str, &'static str)],
}

impl Intervention {
    pub fn parameter(&self, id: &str) -> Option<&'static Parameter> {
        self.parameters.iter().find(|p| p.id == id)
    }

    pub fn metric(&self, id: &str) -> Option<&'static Metric> {
        self.metrics.iter().find(|m| m.id == id)
    }

    pub fn require_parameter(&self, id: &str) -> Result<&'static Parameter, ConfigurationError> {
        self.parameter(id)
            .ok_or_else(|| ConfigurationError::UnknownParameter {
                intervention: self.kind,
                parameter: id.to_string(),
            })
    }

    pub fn require_metric(&self, id: &str) -> Result<&'static Metric, ConfigurationError> {
        self.metric(id).ok_or_else(|| ConfigurationError::UnknownMetric {
            intervention: self.kind,
            metric: id.to_string(),
        })
    }

    pub fn feature(&self, id: &str) -> Option<&'static Feature> {
        self.features.iter().find(|f| f.properties.id == id)
    }

    pub fn radius_multiplier(&self, type_tag: &str) -> f64 {
        self.radius_multipliers
            .iter()
            .find(|(tag, _)| *tag == type_tag)
            .map(|(_, m)| *m)
            .unwrap_or(1.0)
    }

    pub fn feature_color(&self, type_tag: &str) -> &'static str {
        self.palette
            .iter()
            .find(|(tag, _)| *tag == type_tag)
            .map(|(_, color)| *color)
            .unwrap_or(DEFAULT_FEATURE_COLOR)
    }
}
