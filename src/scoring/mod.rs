pub mod engine;
pub mod level;
pub mod params;
pub mod validation;
pub mod visual;
pub mod weights;

pub use engine::{compute_metric, score_intervention, score_metric, FactorContribution, MetricScore, ScoreBreakdown, METRIC_CAP};
pub use level::{classify_level, ImpactLevel, ImplementationLevel};
pub use params::ParameterValues;
pub use validation::validate_catalog;
pub use visual::{after_image_opacity, map_visual_scaling, VisualScaling};
pub use weights::{formula_for, MetricFormula, Term, FORMULAS};
