use serde::Serialize;

use crate::catalog::{impact_descriptions, ImpactDimension, Intervention, InterventionKind, MapSettings};
use crate::error::ConfigurationError;
use crate::geo::{visible_features, Feature};
use crate::scoring::{
    after_image_opacity, map_visual_scaling, score_intervention, ImpactLevel, ImplementationLevel,
    MetricScore, ParameterValues, VisualScaling,
};

/// Everything a rendering layer needs to draw one intervention at one level.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub kind: InterventionKind,
    pub level: ImplementationLevel,
    pub map: MapSettings,
    pub scores: Vec<MetricScore>,
    pub impact_level: ImpactLevel,
    pub impacts: Vec<(ImpactDimension, &'static str)>,
    pub scaling: VisualScaling,
    pub after_image_opacity: f64,
    pub features: Vec<Feature>,
}

pub fn evaluate(
    intervention: &Intervention,
    level: ImplementationLevel,
    values: &ParameterValues,
) -> Result<Evaluation, ConfigurationError> {
    let scores = score_intervention(intervention, level, values)?;
    let features = visible_features(intervention, values)?;
    let impact_level = level.classify();

    Ok(Evaluation {
        kind: intervention.kind,
        level,
        map: intervention.map,
        scores,
        impact_level,
        impacts: impact_descriptions(intervention.kind, impact_level),
        scaling: map_visual_scaling(intervention.kind, level),
        after_image_opacity: after_image_opacity(level),
        features,
    })
}

impl Evaluation {
    pub fn score(&self, metric_id: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.metric.id == metric_id)
            .map(|s| s.value)
    }

    /// Radius for `feature`, or `None` when the intervention draws lines only.
    pub fn feature_radius(&self, feature: &Feature) -> Option<f64> {
        if !feature.is_point() {
            return None;
        }
        self.scaling.point_radius(self.kind, feature.type_tag())
    }

    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            intervention: self.kind,
            implementation_level: self.level,
            impact_level: self.impact_level,
            metrics: self
                .scores
                .iter()
                .map(|s| MetricSummary {
                    id: s.metric.id,
                    label: s.metric.label,
                    value: s.value,
                    unit: s.metric.unit,
                })
                .collect(),
            map: self.map,
            scaling: self.scaling,
            after_image_opacity: self.after_image_opacity,
        }
    }
}

/// Serializable view of an [`Evaluation`] for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub intervention: InterventionKind,
    pub implementation_level: ImplementationLevel,
    pub impact_level: ImpactLevel,
    pub metrics: Vec<MetricSummary>,
    pub map: MapSettings,
    pub scaling: VisualScaling,
    pub after_image_opacity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricSummary {
    pub id: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}
