//! Hand-tuned weight table driving the metric engine.
//!
//! Each entry adds `value * weight` for every listed parameter on top of the
//! level-scaled base value. Adding an intervention means adding rows here, not
//! branches in the engine.

use crate::catalog::InterventionKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub parameter_id: &'static str,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricFormula {
    pub intervention: InterventionKind,
    pub metric_id: &'static str,
    pub terms: &'static [Term],
}

const fn term(parameter_id: &'static str, weight: f64) -> Term {
    Term { parameter_id, weight }
}

pub static FORMULAS: &[MetricFormula] = &[
    MetricFormula {
        intervention: InterventionKind::Street,
        metric_id: "pedestrian-activity",
        terms: &[term("facade-transparency", 0.3), term("entrance-count", 2.0)],
    },
    MetricFormula {
        intervention: InterventionKind::Street,
        metric_id: "economic-vitality",
        terms: &[term("facade-transparency", 0.25), term("signage-lighting", 4.0)],
    },
    MetricFormula {
        intervention: InterventionKind::Street,
        metric_id: "visual-interest",
        terms: &[
            term("facade-transparency", 0.4),
            term("entrance-count", 1.5),
            term("signage-lighting", 5.0),
        ],
    },
    MetricFormula {
        intervention: InterventionKind::PublicSpace,
        metric_id: "green-space",
        terms: &[term("plaza-count", 10.0), term("parklet-length", 0.05)],
    },
    MetricFormula {
        intervention: InterventionKind::PublicSpace,
        metric_id: "social-interaction",
        terms: &[
            term("plaza-count", 8.0),
            term("parklet-length", 0.03),
            term("seating-count", 0.5),
        ],
    },
    MetricFormula {
        intervention: InterventionKind::PublicSpace,
        metric_id: "public-accessibility",
        terms: &[term("plaza-count", 5.0), term("seating-count", 0.7)],
    },
    MetricFormula {
        intervention: InterventionKind::Campus,
        metric_id: "collaboration",
        terms: &[term("learning-spaces", 10.0), term("amenity-level", 5.0)],
    },
    MetricFormula {
        intervention: InterventionKind::Campus,
        metric_id: "education-industry",
        terms: &[
            term("pathway-width", 3.0),
            term("learning-spaces", 7.0),
            term("amenity-level", 4.0),
        ],
    },
    MetricFormula {
        intervention: InterventionKind::Campus,
        metric_id: "innovation-potential",
        terms: &[term("learning-spaces", 12.0), term("amenity-level", 6.0)],
    },
];

pub fn formula_for(intervention: InterventionKind, metric_id: &str) -> Option<&'static MetricFormula> {
    FORMULAS
        .iter()
        .find(|f| f.intervention == intervention && f.metric_id == metric_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nine_formulas() {
        assert_eq!(FORMULAS.len(), 9);
        for kind in InterventionKind::ALL {
            assert_eq!(FORMULAS.iter().filter(|f| f.intervention == kind).count(), 3);
        }
    }

    #[test]
    fn test_formula_lookup() {
        let formula = formula_for(InterventionKind::Street, "pedestrian-activity").unwrap();
        assert_eq!(formula.terms.len(), 2);
        assert_eq!(formula.terms[1], term("entrance-count", 2.0));
        assert!(formula_for(InterventionKind::Campus, "pedestrian-activity").is_none());
    }

    #[test]
    fn test_weights_non_negative() {
        assert!(FORMULAS
            .iter()
            .flat_map(|f| f.terms.iter())
            .all(|t| t.weight >= 0.0));
    }
}
