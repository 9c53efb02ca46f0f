pub mod formatter;

pub use formatter::{
    format_breakdown, format_feature_popup, format_features, format_geojson, format_impacts,
    format_intervention_list, format_metric_value, format_metrics, format_parameters, format_styling,
    metric_bar, should_use_colors,
};
