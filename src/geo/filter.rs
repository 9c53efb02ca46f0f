use super::feature::Feature;
use crate::catalog::Intervention;
use crate::error::ConfigurationError;
use crate::scoring::ParameterValues;

/// Keep at most `max_count` features tagged `type_tag`, in their original order.
/// Features of any other type pass through untouched and stay in place.
pub fn filter_features_by_count(features: &[Feature], type_tag: &str, max_count: usize) -> Vec<Feature> {
    let mut kept = 0usize;
    features
        .iter()
        .filter(|f| {
            if f.type_tag() != type_tag {
                return true;
            }
            kept += 1;
            kept <= max_count
        })
        .cloned()
        .collect()
}

/// Features the map should draw for the current parameter values.
///
/// Interventions without a feature filter show their whole collection.
pub fn visible_features(
    intervention: &Intervention,
    values: &ParameterValues,
) -> Result<Vec<Feature>, ConfigurationError> {
    let Some(filter) = intervention.feature_filter else {
        return Ok(intervention.features.to_vec());
    };

    let count = values.require(intervention.kind, filter.parameter_id)?;
    let max_count = if count.is_finite() && count > 0.0 {
        count.floor() as usize
    } else {
        0
    };

    log::debug!(
        "{}: showing at most {} '{}' features",
        intervention.kind,
        max_count,
        filter.type_tag
    );
    Ok(filter_features_by_count(intervention.features, filter.type_tag, max_count))
}
