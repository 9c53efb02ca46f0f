use super::weights::{formula_for, FORMULAS};
use crate::catalog::{parse_hex_color, Intervention};

/// Validate the intervention catalog and weight table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_catalog(interventions: &[Intervention]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for intervention in interventions {
        let kind = intervention.kind;

        for (i, param) in intervention.parameters.iter().enumerate() {
            if param.min > param.max {
                errors.push(format!(
                    "{}.parameters[{}] ({}): min {} exceeds max {}",
                    kind, i, param.id, param.min, param.max
                ));
            }
            if param.step <= 0.0 {
                errors.push(format!(
                    "{}.parameters[{}] ({}): step must be positive",
                    kind, i, param.id
                ));
            }
            if param.default < param.min || param.default > param.max {
                errors.push(format!(
                    "{}.parameters[{}] ({}): default {} outside [{}, {}]",
                    kind, i, param.id, param.default, param.min, param.max
                ));
            }
        }

        for metric in intervention.metrics {
            if parse_hex_color(metric.color).is_none() {
                errors.push(format!(
                    "{}.metrics.{}.color: invalid '{}' - expected #RRGGBB",
                    kind, metric.id, metric.color
                ));
            }
            if formula_for(kind, metric.id).is_none() {
                errors.push(format!("{}.metrics.{}: no scoring formula", kind, metric.id));
            }
        }

        for (tag, color) in intervention.palette {
            if parse_hex_color(color).is_none() {
                errors.push(format!(
                    "{}.palette.{}: invalid '{}' - expected #RRGGBB",
                    kind, tag, color
                ));
            }
        }

        if let Some(filter) = intervention.feature_filter {
            if intervention.parameter(filter.parameter_id).is_none() {
                errors.push(format!(
                    "{}.feature_filter: unknown parameter '{}'",
                    kind, filter.parameter_id
                ));
            }
        }
    }

    for formula in FORMULAS {
        let Some(intervention) = interventions.iter().find(|i| i.kind == formula.intervention) else {
            continue;
        };
        if intervention.metric(formula.metric_id).is_none() {
            errors.push(format!(
                "weights.{}.{}: unknown metric",
                formula.intervention, formula.metric_id
            ));
        }
        for term in formula.terms {
            if intervention.parameter(term.parameter_id).is_none() {
                errors.push(format!(
                    "weights.{}.{}: unknown parameter '{}'",
                    formula.intervention, formula.metric_id, term.parameter_id
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{intervention, InterventionKind, Metric, Parameter};

    static BAD_PARAMS: [Parameter; 1] = [Parameter {
        id: "entrance-count",
        label: "Entrance Count",
        min: 10.0,
        max: 1.0,
        step: 0.0,
        default: 20.0,
        unit: "",
        description: "",
    }];

    static BAD_METRICS: [Metric; 1] = [Metric {
        id: "footfall",
        label: "Footfall",
        base_value: 10.0,
        unit: "%",
        color: "blue",
    }];

    #[test]
    fn test_builtin_catalog_is_valid() {
        assert_eq!(validate_catalog(crate::catalog::all()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut broken = intervention(InterventionKind::Street).clone();
        broken.parameters = &BAD_PARAMS;
        broken.metrics = &BAD_METRICS;

        let errors = validate_catalog(&[broken]).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("min 10 exceeds max 1")));
        assert!(errors.iter().any(|e| e.contains("step must be positive")));
        assert!(errors.iter().any(|e| e.contains("default 20 outside")));
        assert!(errors.iter().any(|e| e.contains("metrics.footfall.color")));
        assert!(errors.iter().any(|e| e.contains("metrics.footfall: no scoring formula")));
        // Street formulas now point at metrics and parameters that are gone
        assert!(errors.iter().any(|e| e == "weights.street.pedestrian-activity: unknown metric"));
        assert!(errors
            .iter()
            .any(|e| e == "weights.street.visual-interest: unknown parameter 'signage-lighting'"));
    }

    #[test]
    fn test_filter_parameter_must_exist() {
        let mut broken = intervention(InterventionKind::PublicSpace).clone();
        broken.parameters = &BAD_PARAMS;

        let errors = validate_catalog(&[broken]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e == "publicSpace.feature_filter: unknown parameter 'plaza-count'"));
    }
}
