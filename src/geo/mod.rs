pub mod feature;
pub mod filter;

pub use feature::{Feature, FeatureCollection, FeatureProperties, Geometry};
pub use filter::{filter_features_by_count, visible_features};
