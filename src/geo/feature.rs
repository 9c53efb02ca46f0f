//! GeoJSON-shaped feature model.
//!
//! Serializes to standard GeoJSON so `features --json` output can be dropped
//! straight into a map renderer.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// `[longitude, latitude]`
    Point([f64; 2]),
    LineString(&'static [[f64; 2]]),
}

impl Geometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Square meters, for area-like features (plazas, learning spaces).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<u32>,
    /// Meters, for linear features (frontages, parklets, pathways).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(rename = "type")]
    pub type_tag: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

impl Feature {
    pub fn id(&self) -> &'static str {
        self.properties.id
    }

    pub fn type_tag(&self) -> &'static str {
        self.properties.type_tag
    }

    pub fn is_point(&self) -> bool {
        matches!(self.geometry, Geometry::Point(_))
    }

    /// Human-readable size: `500 sqm` or `250 m`.
    pub fn measure(&self) -> Option<String> {
        match (self.properties.area, self.properties.length) {
            (Some(area), _) => Some(format!("{} sqm", area)),
            (None, Some(length)) => Some(format!("{} m", length)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_point() -> Feature {
        Feature {
            properties: FeatureProperties {
                id: "ps1",
                name: "Central Plaza",
                description: "Main gathering space",
                area: Some(500),
                length: None,
                type_tag: "plaza",
            },
            geometry: Geometry::Point([-73.9395, 40.7440]),
        }
    }

    #[test]
    fn test_feature_serializes_as_geojson() {
        let value = serde_json::to_value(sample_point()).unwrap();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Point");
        assert_eq!(value["geometry"]["coordinates"][0], -73.9395);
        assert_eq!(value["properties"]["type"], "plaza");
        assert_eq!(value["properties"]["area"], 500);
        assert!(value["properties"].get("length").is_none());
    }

    #[test]
    fn test_collection_serializes_as_geojson() {
        static LINE: [[f64; 2]; 2] = [[-73.9400, 40.7450], [-73.9385, 40.7453]];
        let line = Feature {
            properties: FeatureProperties {
                id: "ps3",
                name: "Main Street Parklet",
                description: "Linear park",
                area: None,
                length: Some(150),
                type_tag: "parklet",
            },
            geometry: Geometry::LineString(&LINE),
        };
        let value = serde_json::to_value(FeatureCollection::new(vec![sample_point(), line])).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 2);
        assert_eq!(value["features"][1]["geometry"]["type"], "LineString");
        assert_eq!(value["features"][1]["geometry"]["coordinates"][1][1], 40.7453);
    }

    #[test]
    fn test_measure() {
        assert_eq!(sample_point().measure(), Some("500 sqm".to_string()));
    }
}
