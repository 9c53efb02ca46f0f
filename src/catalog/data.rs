//! Hand-authored intervention definitions for the Long Island City study area.

use super::types::{
    FeatureFilter, Intervention, InterventionKind, MapSettings, Metric, Parameter, BASE_MAP_STYLE,
};
use crate::geo::{Feature, FeatureProperties, Geometry};

/// Study area center `[longitude, latitude]`.
const LIC_COORDINATES: [f64; 2] = [-73.9400, 40.7450];

pub static INTERVENTIONS: [Intervention; 3] = [STREET, PUBLIC_SPACE, CAMPUS];

/// Catalog entry for `kind`.
pub fn intervention(kind: InterventionKind) -> &'static Intervention {
    &INTERVENTIONS[kind.index()]
}

pub fn all() -> &'static [Intervention] {
    &INTERVENTIONS
}

const STREET: Intervention = Intervention {
    kind: InterventionKind::Street,
    title: "Active Street Frontage Transformation",
    description: "Converting industrial facades to transparent, interactive street frontages",
    map: MapSettings {
        center: LIC_COORDINATES,
        zoom: 16.0,
        style: BASE_MAP_STYLE,
    },
    parameters: &[
        Parameter {
            id: "facade-transparency",
            label: "Facade Transparency",
            min: 20.0,
            max: 80.0,
            step: 5.0,
            default: 40.0,
            unit: "%",
            description: "Percentage of ground floor facades converted to transparent materials",
        },
        Parameter {
            id: "entrance-count",
            label: "New Entrances",
            min: 0.0,
            max: 10.0,
            step: 1.0,
            default: 3.0,
            unit: "",
            description: "Number of new secondary entrances added along primary pedestrian routes",
        },
        Parameter {
            id: "signage-lighting",
            label: "Signage & Lighting",
            min: 0.0,
            max: 5.0,
            step: 1.0,
            default: 2.0,
            unit: "level",
            description: "Level of signage and lighting improvements for pedestrian experience",
        },
    ],
    metrics: &[
        Metric {
            id: "pedestrian-activity",
            label: "Pedestrian Activity",
            base_value: 25.0,
            unit: "",
            color: "#4A90E2",
        },
        Metric {
            id: "economic-vitality",
            label: "Economic Vitality",
            base_value: 30.0,
            unit: "",
            color: "#50E3C2",
        },
        Metric {
            id: "visual-interest",
            label: "Visual Interest",
            base_value: 20.0,
            unit: "",
            color: "#F5A623",
        },
    ],
    features: &[
        Feature {
            properties: FeatureProperties {
                id: "sf1",
                name: "Main Street Frontage",
                description: "Primary street with commercial potential",
                area: None,
                length: Some(250),
                type_tag: "primary",
            },
            geometry: Geometry::LineString(&[[-73.9410, 40.7450], [-73.9390, 40.7455]]),
        },
        Feature {
            properties: FeatureProperties {
                id: "sf2",
                name: "Secondary Street Frontage",
                description: "Mixed-use connection to residential area",
                area: None,
                length: Some(180),
                type_tag: "secondary",
            },
            geometry: Geometry::LineString(&[[-73.9405, 40.7440], [-73.9390, 40.7445]]),
        },
        Feature {
            properties: FeatureProperties {
                id: "sf3",
                name: "Industrial Corridor",
                description: "Opportunity for active manufacturing display",
                area: None,
                length: Some(300),
                type_tag: "industrial",
            },
            geometry: Geometry::LineString(&[[-73.9395, 40.7430], [-73.9375, 40.7435]]),
        },
    ],
    feature_filter: None,
    radius_multipliers: &[],
    palette: &[
        ("primary", "#FF6B6B"),
        ("secondary", "#FFB347"),
        ("industrial", "#4ECB71"),
    ],
};

const PUBLIC_SPACE: Intervention = Intervention {
    kind: InterventionKind::PublicSpace,
    title: "Public Space Network Development",
    description: "Creating interconnected public spaces for workers and visitors",
    map: MapSettings {
        center: [-73.9390, 40.7445],
        zoom: 15.5,
        style: BASE_MAP_STYLE,
    },
    parameters: &[
        Parameter {
            id: "plaza-count",
            label: "Small Plazas",
            min: 0.0,
            max: 5.0,
            step: 1.0,
            default: 2.0,
            unit: "",
            description: "Number of small plazas developed in underutilized spaces",
        },
        Parameter {
            id: "parklet-length",
            label: "Linear Parklets",
            min: 50.0,
            max: 300.0,
            step: 25.0,
            default: 150.0,
            unit: "m",
            description: "Total length of linear parklets along streets",
        },
        Parameter {
            id: "seating-count",
            label: "Seating Options",
            min: 0.0,
            max: 50.0,
            step: 5.0,
            default: 20.0,
            unit: "",
            description: "Number of new seating options added throughout the district",
        },
    ],
    metrics: &[
        Metric {
            id: "green-space",
            label: "Green Space",
            base_value: 15.0,
            unit: "sqm",
            color: "#7ED321",
        },
        Metric {
            id: "social-interaction",
            label: "Social Interaction",
            base_value: 20.0,
            unit: "",
            color: "#BD10E0",
        },
        Metric {
            id: "public-accessibility",
            label: "Public Accessibility",
            base_value: 25.0,
            unit: "",
            color: "#4A90E2",
        },
    ],
    features: &[
        Feature {
            properties: FeatureProperties {
                id: "ps1",
                name: "Central Plaza",
                description: "Main gathering space with seating and greenery",
                area: Some(500),
                length: None,
                type_tag: "plaza",
            },
            geometry: Geometry::Point([-73.9395, 40.7440]),
        },
        Feature {
            properties: FeatureProperties {
                id: "ps2",
                name: "Secondary Plaza",
                description: "Smaller plaza with food vendor space",
                area: Some(300),
                length: None,
                type_tag: "plaza",
            },
            geometry: Geometry::Point([-73.9385, 40.7455]),
        },
        Feature {
            properties: FeatureProperties {
                id: "ps3",
                name: "Main Street Parklet",
                description: "Linear park with seating and planters",
                area: None,
                length: Some(150),
                type_tag: "parklet",
            },
            geometry: Geometry::LineString(&[[-73.9400, 40.7450], [-73.9385, 40.7453]]),
        },
        Feature {
            properties: FeatureProperties {
                id: "ps4",
                name: "Key Intersection Treatment",
                description: "Enhanced crosswalk with seating and planting",
                area: Some(200),
                length: None,
                type_tag: "intersection",
            },
            geometry: Geometry::Point([-73.9390, 40.7445]),
        },
        Feature {
            properties: FeatureProperties {
                id: "ps5",
                name: "Secondary Parklet",
                description: "Narrow parklet with bike parking",
                area: None,
                length: Some(100),
                type_tag: "parklet",
            },
            geometry: Geometry::LineString(&[[-73.9380, 40.7440], [-73.9370, 40.7443]]),
        },
        Feature {
            properties: FeatureProperties {
                id: "ps6",
                name: "Pocket Plaza",
                description: "Corner pocket plaza with shade trees and movable chairs",
                area: Some(150),
                length: None,
                type_tag: "plaza",
            },
            geometry: Geometry::Point([-73.9375, 40.7448]),
        },
    ],
    feature_filter: Some(FeatureFilter {
        type_tag: "plaza",
        parameter_id: "plaza-count",
    }),
    radius_multipliers: &[("plaza", 1.5)],
    palette: &[
        ("plaza", "#4ECB71"),
        ("intersection", "#F7C244"),
        ("parklet", "#4ECB71"),
    ],
};

const CAMPUS: Intervention = Intervention {
    kind: InterventionKind::Campus,
    title: "Multi-Purpose Campus-Industry Corridor",
    description: "Creating connections between educational and industrial spaces",
    map: MapSettings {
        center: [-73.9385, 40.7440],
        zoom: 15.0,
        style: BASE_MAP_STYLE,
    },
    parameters: &[
        Parameter {
            id: "pathway-width",
            label: "Pathway Width",
            min: 3.0,
            max: 8.0,
            step: 0.5,
            default: 4.0,
            unit: "m",
            description: "Width of pedestrian pathways connecting campus and industry",
        },
        Parameter {
            id: "learning-spaces",
            label: "Learning Spaces",
            min: 0.0,
            max: 5.0,
            step: 1.0,
            default: 2.0,
            unit: "",
            description: "Number of flexible outdoor learning/gathering spaces",
        },
        Parameter {
            id: "amenity-level",
            label: "Amenity Level",
            min: 1.0,
            max: 5.0,
            step: 1.0,
            default: 2.0,
            unit: "",
            description: "Level of amenities (food, seating, Wi-Fi, etc.)",
        },
    ],
    metrics: &[
        Metric {
            id: "collaboration",
            label: "Collaboration Potential",
            base_value: 10.0,
            unit: "",
            color: "#4A90E2",
        },
        Metric {
            id: "education-industry",
            label: "Education-Industry Integration",
            base_value: 15.0,
            unit: "",
            color: "#F5A623",
        },
        Metric {
            id: "innovation-potential",
            label: "Innovation Potential",
            base_value: 20.0,
            unit: "",
            color: "#BD10E0",
        },
    ],
    features: &[
        Feature {
            properties: FeatureProperties {
                id: "ci1",
                name: "Main Corridor Pathway",
                description: "Primary pedestrian connection between campus and industry",
                area: None,
                length: Some(400),
                type_tag: "pathway",
            },
            geometry: Geometry::LineString(&[
                [-73.9400, 40.7460],
                [-73.9385, 40.7450],
                [-73.9370, 40.7440],
            ]),
        },
        Feature {
            properties: FeatureProperties {
                id: "ci2",
                name: "Learning Space A",
                description: "Outdoor classroom with demonstration area",
                area: Some(300),
                length: None,
                type_tag: "learning",
            },
            geometry: Geometry::Point([-73.9390, 40.7455]),
        },
        Feature {
            properties: FeatureProperties {
                id: "ci3",
                name: "Learning Space B",
                description: "Flexible meeting area with presentation capabilities",
                area: Some(250),
                length: None,
                type_tag: "learning",
            },
            geometry: Geometry::Point([-73.9380, 40.7445]),
        },
        Feature {
            properties: FeatureProperties {
                id: "ci4",
                name: "Industry Showcase Area",
                description: "Exhibition space for industrial processes and student projects",
                area: Some(400),
                length: None,
                type_tag: "showcase",
            },
            geometry: Geometry::Point([-73.9375, 40.7435]),
        },
        Feature {
            properties: FeatureProperties {
                id: "ci5",
                name: "Secondary Pathway",
                description: "Connection to nearby amenities",
                area: None,
                length: Some(250),
                type_tag: "pathway",
            },
            geometry: Geometry::LineString(&[[-73.9385, 40.7450], [-73.9375, 40.7455]]),
        },
    ],
    feature_filter: Some(FeatureFilter {
        type_tag: "learning",
        parameter_id: "learning-spaces",
    }),
    radius_multipliers: &[("showcase", 1.2)],
    palette: &[
        ("learning", "#4A6DF2"),
        ("showcase", "#BD10E0"),
        ("pathway", "#4A6DF2"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_kind() {
        for kind in InterventionKind::ALL {
            assert_eq!(intervention(kind).kind, kind);
        }
    }

    #[test]
    fn test_three_parameters_and_metrics_each() {
        for entry in all() {
            assert_eq!(entry.parameters.len(), 3, "{}", entry.kind);
            assert_eq!(entry.metrics.len(), 3, "{}", entry.kind);
        }
    }

    #[test]
    fn test_feature_ids_unique() {
        for entry in all() {
            let mut ids: Vec<_> = entry.features.iter().map(|f| f.id()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), entry.features.len(), "{}", entry.kind);
        }
    }

    #[test]
    fn test_palette_and_radius_lookup() {
        let public_space = intervention(InterventionKind::PublicSpace);
        assert_eq!(public_space.feature_color("intersection"), "#F7C244");
        assert_eq!(public_space.feature_color("unknown"), "#888888");
        assert_eq!(public_space.radius_multiplier("plaza"), 1.5);
        assert_eq!(public_space.radius_multiplier("intersection"), 1.0);
    }
}
