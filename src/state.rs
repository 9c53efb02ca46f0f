//! Application state shared by the CLI and the TUI.

use std::collections::BTreeMap;

use crate::catalog::{all, intervention, Intervention, InterventionKind};
use crate::config::Config;
use crate::error::ConfigurationError;
use crate::evaluate::{evaluate, Evaluation};
use crate::scoring::{ImplementationLevel, ParameterValues};

#[derive(Debug, Clone)]
pub struct AppState {
    implementation_level: ImplementationLevel,
    active: InterventionKind,
    values: BTreeMap<InterventionKind, ParameterValues>,
    active_features: BTreeMap<InterventionKind, Vec<String>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Street scenario, default level, every parameter at its default.
    pub fn new() -> Self {
        let values = all()
            .iter()
            .map(|i| (i.kind, ParameterValues::defaults_for(i)))
            .collect();
        Self {
            implementation_level: ImplementationLevel::default(),
            active: InterventionKind::Street,
            values,
            active_features: BTreeMap::new(),
        }
    }

    /// Defaults overlaid with a validated config. Parameter values off their
    /// step grid or outside their range are snapped with a warning.
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        let mut state = Self::new();

        if let Some(level) = config.implementation_level {
            state.set_level(level);
        }
        if let Some(ref active) = config.active {
            state.active = active.parse()?;
        }

        if let Some(ref parameters) = config.parameters {
            for (intervention_id, overrides) in parameters {
                let kind: InterventionKind = intervention_id.parse()?;
                let entry = intervention(kind);
                for (param_id, &value) in overrides {
                    let param = entry.require_parameter(param_id)?;
                    let snapped = param.snap(value);
                    if snapped != value {
                        log::warn!(
                            "{}.{}: {} is not a step of {} in [{}, {}], using {}",
                            kind,
                            param_id,
                            value,
                            param.step,
                            param.min,
                            param.max,
                            snapped
                        );
                    }
                    state.values_mut(kind).set(param.id, snapped);
                }
            }
        }

        Ok(state)
    }

    pub fn level(&self) -> ImplementationLevel {
        self.implementation_level
    }

    pub fn set_level(&mut self, level: f64) {
        self.implementation_level = ImplementationLevel::new(level);
    }

    pub fn adjust_level(&mut self, delta: f64) {
        self.implementation_level = self.implementation_level.adjusted(delta);
    }

    pub fn active(&self) -> InterventionKind {
        self.active
    }

    pub fn active_intervention(&self) -> &'static Intervention {
        intervention(self.active)
    }

    pub fn switch_to(&mut self, kind: InterventionKind) {
        if self.active != kind {
            log::debug!("Switching to {}", kind);
        }
        self.active = kind;
    }

    pub fn next_intervention(&mut self) {
        self.switch_to(self.active.next());
    }

    pub fn previous_intervention(&mut self) {
        self.switch_to(self.active.previous());
    }

    pub fn parameter_values(&self, kind: InterventionKind) -> &ParameterValues {
        // Every kind is seeded in new(); the entry always exists.
        &self.values[&kind]
    }

    fn values_mut(&mut self, kind: InterventionKind) -> &mut ParameterValues {
        self.values
            .entry(kind)
            .or_insert_with(|| ParameterValues::defaults_for(intervention(kind)))
    }

    /// Set a parameter of `kind`, clamped to its bounds and snapped to its step.
    /// Returns the value actually stored.
    pub fn set_parameter(
        &mut self,
        kind: InterventionKind,
        param_id: &str,
        value: f64,
    ) -> Result<f64, ConfigurationError> {
        let param = intervention(kind).require_parameter(param_id)?;
        let snapped = param.snap(value);
        self.values_mut(kind).set(param.id, snapped);
        Ok(snapped)
    }

    /// Move a parameter of the active intervention by `steps` grid positions.
    pub fn step_parameter(&mut self, param_id: &str, steps: i32) -> Result<f64, ConfigurationError> {
        let kind = self.active;
        let param = intervention(kind).require_parameter(param_id)?;
        let current = self.parameter_values(kind).get(param.id).unwrap_or(param.default);
        let next = param.step_from(current, steps);
        self.values_mut(kind).set(param.id, next);
        Ok(next)
    }

    pub fn reset_parameters(&mut self, kind: InterventionKind) {
        self.values
            .insert(kind, ParameterValues::defaults_for(intervention(kind)));
    }

    /// Add `feature_id` to the active set of `kind`, or remove it if already there.
    /// Returns whether the feature is active afterwards.
    pub fn toggle_active_feature(&mut self, kind: InterventionKind, feature_id: &str) -> bool {
        let active = self.active_features.entry(kind).or_default();
        if let Some(pos) = active.iter().position(|id| id == feature_id) {
            active.remove(pos);
            false
        } else {
            active.push(feature_id.to_string());
            true
        }
    }

    /// Drop active ids of `kind` that are not in `visible`.
    pub fn retain_active_features(&mut self, kind: InterventionKind, visible: &[&str]) {
        if let Some(active) = self.active_features.get_mut(&kind) {
            active.retain(|id| visible.contains(&id.as_str()));
        }
    }

    pub fn is_feature_active(&self, kind: InterventionKind, feature_id: &str) -> bool {
        self.active_features
            .get(&kind)
            .is_some_and(|ids| ids.iter().any(|id| id == feature_id))
    }

    pub fn active_features(&self, kind: InterventionKind) -> &[String] {
        self.active_features
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn evaluate(&self, kind: InterventionKind) -> Result<Evaluation, ConfigurationError> {
        evaluate(intervention(kind), self.implementation_level, self.parameter_values(kind))
    }

    pub fn evaluate_active(&self) -> Result<Evaluation, ConfigurationError> {
        self.evaluate(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParameterOverrides;

    #[test]
    fn test_new_uses_defaults() {
        let state = AppState::new();
        assert_eq!(state.active(), InterventionKind::Street);
        assert_eq!(state.level().value(), 50.0);
        assert_eq!(
            state.parameter_values(InterventionKind::Street).get("facade-transparency"),
            Some(40.0)
        );
    }

    #[test]
    fn test_level_is_clamped() {
        let mut state = AppState::new();
        state.set_level(140.0);
        assert_eq!(state.level().value(), 100.0);
        state.adjust_level(-250.0);
        assert_eq!(state.level().value(), 0.0);
    }

    #[test]
    fn test_cycle_interventions() {
        let mut state = AppState::new();
        state.next_intervention();
        assert_eq!(state.active(), InterventionKind::PublicSpace);
        state.next_intervention();
        state.next_intervention();
        assert_eq!(state.active(), InterventionKind::Street);
        state.previous_intervention();
        assert_eq!(state.active(), InterventionKind::Campus);
    }

    #[test]
    fn test_set_parameter_clamps_and_snaps() {
        let mut state = AppState::new();
        let stored = state
            .set_parameter(InterventionKind::Campus, "pathway-width", 5.3)
            .unwrap();
        assert_eq!(stored, 5.5);
        let stored = state
            .set_parameter(InterventionKind::Campus, "pathway-width", 99.0)
            .unwrap();
        assert_eq!(stored, 8.0);

        let err = state
            .set_parameter(InterventionKind::Campus, "facade-transparency", 10.0)
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownParameter { .. }));
    }

    #[test]
    fn test_step_and_reset() {
        let mut state = AppState::new();
        state.switch_to(InterventionKind::PublicSpace);
        let before = state
            .parameter_values(InterventionKind::PublicSpace)
            .get("plaza-count")
            .unwrap();
        let after = state.step_parameter("plaza-count", 1).unwrap();
        assert_eq!(after, before + 1.0);

        state.reset_parameters(InterventionKind::PublicSpace);
        assert_eq!(
            state.parameter_values(InterventionKind::PublicSpace).get("plaza-count"),
            Some(before)
        );
    }

    #[test]
    fn test_toggle_active_feature() {
        let mut state = AppState::new();
        assert!(state.toggle_active_feature(InterventionKind::Street, "sf1"));
        assert!(state.toggle_active_feature(InterventionKind::Street, "sf2"));
        assert!(state.is_feature_active(InterventionKind::Street, "sf1"));
        assert!(!state.toggle_active_feature(InterventionKind::Street, "sf1"));
        assert!(!state.is_feature_active(InterventionKind::Street, "sf1"));
        assert_eq!(state.active_features(InterventionKind::Street), ["sf2".to_string()]);
        assert!(state.active_features(InterventionKind::Campus).is_empty());
    }

    #[test]
    fn test_retain_active_features() {
        let mut state = AppState::new();
        state.toggle_active_feature(InterventionKind::PublicSpace, "ps1");
        state.toggle_active_feature(InterventionKind::PublicSpace, "ps6");
        state.toggle_active_feature(InterventionKind::Street, "sf1");
        state.retain_active_features(InterventionKind::PublicSpace, &["ps1", "ps2"]);
        assert_eq!(state.active_features(InterventionKind::PublicSpace), ["ps1".to_string()]);
        assert!(state.is_feature_active(InterventionKind::Street, "sf1"));
    }

    #[test]
    fn test_from_config_applies_and_clamps() {
        let mut parameters = ParameterOverrides::new();
        parameters.insert(
            "street".to_string(),
            [("facade-transparency".to_string(), 500.0)].into_iter().collect(),
        );
        let config = Config {
            implementation_level: Some(40.0),
            active: Some("campus".to_string()),
            theme: None,
            parameters: Some(parameters),
        };

        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.level().value(), 40.0);
        assert_eq!(state.active(), InterventionKind::Campus);
        let max = intervention(InterventionKind::Street)
            .parameter("facade-transparency")
            .unwrap()
            .max;
        assert_eq!(
            state.parameter_values(InterventionKind::Street).get("facade-transparency"),
            Some(max)
        );
    }

    #[test]
    fn test_from_config_snaps_off_grid_value() {
        let mut parameters = ParameterOverrides::new();
        parameters.insert(
            "street".to_string(),
            [("facade-transparency".to_string(), 43.0)].into_iter().collect(),
        );
        let config = Config {
            implementation_level: None,
            active: None,
            theme: None,
            parameters: Some(parameters),
        };

        let mut state = AppState::from_config(&config).unwrap();
        assert_eq!(
            state.parameter_values(InterventionKind::Street).get("facade-transparency"),
            Some(45.0)
        );

        // One step up from the configured value lands on the next grid point
        state.step_parameter("facade-transparency", 1).unwrap();
        assert_eq!(
            state.parameter_values(InterventionKind::Street).get("facade-transparency"),
            Some(50.0)
        );
        state.step_parameter("facade-transparency", -2).unwrap();
        assert_eq!(
            state.parameter_values(InterventionKind::Street).get("facade-transparency"),
            Some(40.0)
        );
    }

    #[test]
    fn test_evaluate_active() {
        let mut state = AppState::new();
        state.set_level(40.0);
        let eval = state.evaluate_active().unwrap();
        assert!((eval.score("pedestrian-activity").unwrap() - 53.0).abs() < 1e-9);
    }
}
