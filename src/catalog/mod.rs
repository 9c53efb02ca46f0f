pub mod data;
pub mod impact;
pub mod types;

pub use data::{all, intervention, INTERVENTIONS};
pub use impact::{describe, impact_descriptions, ImpactDimension};
pub use types::{
    parse_hex_color, FeatureFilter, Intervention, InterventionKind, MapSettings, Metric,
    Parameter, BASE_MAP_STYLE, DEFAULT_FEATURE_COLOR,
};
