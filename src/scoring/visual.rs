//! Map-style scaling: how strongly features are drawn as implementation grows.

use serde::Serialize;

use super::level::ImplementationLevel;
use crate::catalog::{intervention, InterventionKind};

const BASE_LINE_WIDTH: f64 = 3.0;
const BASE_OPACITY: f64 = 0.4;
const BASE_RADIUS: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualScaling {
    pub line_width: f64,
    pub opacity: f64,
    /// Point radius before per-type multipliers; `None` for line-only maps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// Styling scalars for an intervention's map layers at `level`.
pub fn map_visual_scaling(kind: InterventionKind, level: ImplementationLevel) -> VisualScaling {
    let level = level.value();
    let line_width = BASE_LINE_WIDTH + level / 20.0;
    let opacity = BASE_OPACITY + level / 200.0;

    let radius = match kind {
        InterventionKind::Street => None,
        InterventionKind::PublicSpace | InterventionKind::Campus => Some(BASE_RADIUS + level / 10.0),
    };

    VisualScaling {
        line_width,
        opacity,
        radius,
    }
}

impl VisualScaling {
    /// Radius for a point feature of `type_tag`, with the intervention's multiplier applied.
    pub fn point_radius(&self, kind: InterventionKind, type_tag: &str) -> Option<f64> {
        self.radius
            .map(|r| r * intervention(kind).radius_multiplier(type_tag))
    }
}

/// Fade-in of the "after" rendering over the "before" imagery.
pub fn after_image_opacity(level: ImplementationLevel) -> f64 {
    0.3 + level.fraction() * 0.7
}
