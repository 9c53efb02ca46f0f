use super::level::ImplementationLevel;
use super::params::ParameterValues;
use super::weights::formula_for;
use crate::catalog::{self, Intervention, InterventionKind, Metric};
use crate::error::ConfigurationError;

/// Metric scores never exceed this; there is no lower bound.
pub const METRIC_CAP: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Implementation", "Facade Transparency"
    pub description: String, // e.g. "40% of base", "40 x 0.3"
    pub before: f64,         // Score before this factor
    pub after: f64,          // Score after this factor
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub base_value: f64,
    pub factors: Vec<FactorContribution>,
    /// Uncapped total; differs from the score only when the cap applied.
    pub raw_value: f64,
}

impl ScoreBreakdown {
    pub fn capped(&self) -> bool {
        self.raw_value > METRIC_CAP
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricScore {
    pub metric: &'static Metric,
    pub value: f64,
    pub breakdown: ScoreBreakdown,
}

/// Score one metric of the catalog entry for `intervention`, without the breakdown.
pub fn compute_metric(
    metric: &'static Metric,
    level: ImplementationLevel,
    values: &ParameterValues,
    intervention: InterventionKind,
) -> Result<f64, ConfigurationError> {
    score_metric(catalog::intervention(intervention), metric, level, values).map(|s| s.value)
}

/// Score one metric: level-scaled base value plus the weighted parameter terms,
/// capped at [`METRIC_CAP`], with a step-by-step account of how it was reached.
pub fn score_metric(
    intervention: &Intervention,
    metric: &'static Metric,
    level: ImplementationLevel,
    values: &ParameterValues,
) -> Result<MetricScore, ConfigurationError> {
    let kind = intervention.kind;
    let formula = formula_for(kind, metric.id).ok_or_else(|| ConfigurationError::MissingFormula {
        intervention: kind,
        metric: metric.id.to_string(),
    })?;

    let base_value = metric.base_value;
    let mut score = base_value;
    let mut factors = Vec::with_capacity(formula.terms.len() + 1);

    let before = score;
    score += score * level.fraction();
    factors.push(FactorContribution {
        label: "Implementation".to_string(),
        description: format!("{} of base", level),
        before,
        after: score,
    });

    for term in formula.terms {
        let value = values.require(kind, term.parameter_id)?;
        let label = intervention
            .parameter(term.parameter_id)
            .map(|p| p.label.to_string())
            .unwrap_or_else(|| term.parameter_id.to_string());

        let before = score;
        score += value * term.weight;
        factors.push(FactorContribution {
            label,
            description: format!("{} x {}", value, term.weight),
            before,
            after: score,
        });
    }

    Ok(MetricScore {
        metric,
        value: score.min(METRIC_CAP),
        breakdown: ScoreBreakdown {
            base_value,
            factors,
            raw_value: score,
        },
    })
}

/// Score every metric of `intervention`, in declaration order.
pub fn score_intervention(
    intervention: &Intervention,
    level: ImplementationLevel,
    values: &ParameterValues,
) -> Result<Vec<MetricScore>, ConfigurationError> {
    intervention
        .metrics
        .iter()
        .map(|metric| score_metric(intervention, metric, level, values))
        .collect()
}
