use serde::Serialize;
use std::fmt;

use super::types::InterventionKind;
use crate::scoring::ImpactLevel;

/// Axis along which an intervention's qualitative impact is described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactDimension {
    Economic,
    Social,
    Environmental,
    Accessibility,
}

impl ImpactDimension {
    pub const ALL: [ImpactDimension; 4] = [
        ImpactDimension::Economic,
        ImpactDimension::Social,
        ImpactDimension::Environmental,
        ImpactDimension::Accessibility,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ImpactDimension::Economic => "Economic",
            ImpactDimension::Social => "Social",
            ImpactDimension::Environmental => "Environmental",
            ImpactDimension::Accessibility => "Accessibility",
        }
    }
}

impl fmt::Display for ImpactDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pre-written sentence for one cell of the dimension × level × intervention table.
pub fn describe(dimension: ImpactDimension, level: ImpactLevel, kind: InterventionKind) -> &'static str {
    use ImpactDimension::*;
    use ImpactLevel::*;
    use InterventionKind::*;

    match (dimension, level, kind) {
        (Economic, Low, Street) => "Minimal economic impact with current implementation level.",
        (Economic, Low, PublicSpace) => "Limited economic benefit from public space improvements.",
        (Economic, Low, Campus) => "Basic economic connections between campus and industry.",
        (Economic, Medium, Street) => "Moderate increase in business activity and foot traffic.",
        (Economic, Medium, PublicSpace) => "Growing economic value from enhanced public spaces.",
        (Economic, Medium, Campus) => "Developing ecosystem for innovation and collaboration.",
        (Economic, High, Street) => "Significant economic revitalization and commercial activity.",
        (Economic, High, PublicSpace) => {
            "Substantial economic benefits including increased property values and business formation."
        }
        (Economic, High, Campus) => "Thriving innovation corridor with strong economic indicators.",

        (Social, Low, Street) => "Limited improvement in street life and social interaction.",
        (Social, Low, PublicSpace) => "Basic gathering spaces with minimal programming.",
        (Social, Low, Campus) => "Initial connections between campus and industry communities.",
        (Social, Medium, Street) => "Enhanced street life and pedestrian activity.",
        (Social, Medium, PublicSpace) => "Active community spaces with regular use.",
        (Social, Medium, Campus) => "Regular interaction between students and industry professionals.",
        (Social, High, Street) => "Vibrant street life with diverse activities throughout the day.",
        (Social, High, PublicSpace) => "Thriving public realm with strong community ownership.",
        (Social, High, Campus) => "Strong collaborative culture between educational and industrial users.",

        (Environmental, Low, Street) => "Basic street-level environmental improvements.",
        (Environmental, Low, PublicSpace) => "Small pockets of green space with limited impact.",
        (Environmental, Low, Campus) => "Minimal green infrastructure along pathways.",
        (Environmental, Medium, Street) => "Improved microclimate through street-level amenities.",
        (Environmental, Medium, PublicSpace) => {
            "Growing network of green spaces reducing heat island effect."
        }
        (Environmental, Medium, Campus) => "Green corridor connecting educational and industrial spaces.",
        (Environmental, High, Street) => {
            "Substantial environmental benefits through comprehensive greening."
        }
        (Environmental, High, PublicSpace) => "Significant environmental improvement district-wide.",
        (Environmental, High, Campus) => {
            "Exemplary green infrastructure network with educational components."
        }

        (Accessibility, Low, Street) => "Basic improvements to street accessibility.",
        (Accessibility, Low, PublicSpace) => "Limited access to new public spaces.",
        (Accessibility, Low, Campus) => "Minimal pathway connections established.",
        (Accessibility, Medium, Street) => "Enhanced wayfinding and street-level accessibility.",
        (Accessibility, Medium, PublicSpace) => "Improved access to quality outdoor spaces.",
        (Accessibility, Medium, Campus) => "Improved pedestrian and bicycle connections.",
        (Accessibility, High, Street) => "Universal accessibility with inclusive design throughout.",
        (Accessibility, High, PublicSpace) => "Comprehensive network of accessible public spaces.",
        (Accessibility, High, Campus) => "Seamless connectivity between all areas with universal design.",
    }
}

/// All four descriptions for an intervention at a given level bucket, in display order.
pub fn impact_descriptions(kind: InterventionKind, level: ImpactLevel) -> Vec<(ImpactDimension, &'static str)> {
    ImpactDimension::ALL
        .iter()
        .map(|&dimension| (dimension, describe(dimension, level, kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_picks_bucket() {
        assert_eq!(
            describe(ImpactDimension::Economic, ImpactLevel::Medium, InterventionKind::Street),
            "Moderate increase in business activity and foot traffic."
        );
        assert_eq!(
            describe(ImpactDimension::Accessibility, ImpactLevel::High, InterventionKind::Campus),
            "Seamless connectivity between all areas with universal design."
        );
    }

    #[test]
    fn test_impact_descriptions_order() {
        let descriptions = impact_descriptions(InterventionKind::PublicSpace, ImpactLevel::Low);
        let dimensions: Vec<_> = descriptions.iter().map(|(d, _)| *d).collect();
        assert_eq!(dimensions, ImpactDimension::ALL.to_vec());
        assert_eq!(descriptions[1].1, "Basic gathering spaces with minimal programming.");
    }

    #[test]
    fn test_every_cell_is_distinct_per_dimension() {
        for dimension in ImpactDimension::ALL {
            for kind in InterventionKind::ALL {
                let low = describe(dimension, ImpactLevel::Low, kind);
                let medium = describe(dimension, ImpactLevel::Medium, kind);
                let high = describe(dimension, ImpactLevel::High, kind);
                assert_ne!(low, medium);
                assert_ne!(medium, high);
            }
        }
    }
}
