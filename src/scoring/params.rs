use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{Intervention, InterventionKind};
use crate::error::ConfigurationError;

/// Current parameter values for one intervention, keyed by parameter id.
///
/// Supplied by the rendering layer; the engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterValues(BTreeMap<String, f64>);

impl ParameterValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every parameter of `intervention` at its declared default.
    pub fn defaults_for(intervention: &Intervention) -> Self {
        intervention
            .parameters
            .iter()
            .map(|p| (p.id, p.default))
            .collect()
    }

    /// Every parameter of `intervention` at zero, regardless of its bounds.
    pub fn zeroed_for(intervention: &Intervention) -> Self {
        intervention.parameters.iter().map(|p| (p.id, 0.0)).collect()
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.0.get(id).copied()
    }

    pub fn require(&self, intervention: InterventionKind, id: &str) -> Result<f64, ConfigurationError> {
        self.get(id)
            .ok_or_else(|| ConfigurationError::MissingParameterValue {
                intervention,
                parameter: id.to_string(),
            })
    }

    pub fn set(&mut self, id: impl Into<String>, value: f64) {
        self.0.insert(id.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ParameterValues {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::intervention;

    #[test]
    fn test_defaults_for_street() {
        let values = ParameterValues::defaults_for(intervention(InterventionKind::Street));
        assert_eq!(values.len(), 3);
        assert_eq!(values.get("facade-transparency"), Some(40.0));
        assert_eq!(values.get("entrance-count"), Some(3.0));
        assert_eq!(values.get("signage-lighting"), Some(2.0));
    }

    #[test]
    fn test_zeroed_for_campus() {
        let values = ParameterValues::zeroed_for(intervention(InterventionKind::Campus));
        assert!(values.iter().all(|(_, v)| v == 0.0));
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_require_missing() {
        let values = ParameterValues::new();
        let err = values.require(InterventionKind::Street, "entrance-count").unwrap_err();
        assert_eq!(
            err.to_string(),
            "street: no value supplied for parameter 'entrance-count'"
        );
    }

    #[test]
    fn test_set_overwrites() {
        let mut values: ParameterValues = [("plaza-count", 2.0)].into_iter().collect();
        values.set("plaza-count", 4.0);
        assert_eq!(values.get("plaza-count"), Some(4.0));
    }
}
