use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::catalog::{parse_hex_color, Intervention};
use crate::evaluate::Evaluation;
use crate::geo::{Feature, FeatureCollection};
use crate::scoring::{ImplementationLevel, MetricScore, ParameterValues, METRIC_CAP};

const LABEL_WIDTH: usize = 22;
const VALUE_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;
const MIN_BAR_WIDTH: usize = 10;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Bar width that fits next to the label and value columns
fn bar_width() -> usize {
    match get_terminal_width() {
        Some(width) => width
            .saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 4)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH),
        None => MAX_BAR_WIDTH,
    }
}

/// Render a bar filled to `min(100, value)` percent of `width` cells.
/// Negative values draw an empty bar.
pub fn metric_bar(value: f64, width: usize) -> String {
    let pct = value.clamp(0.0, METRIC_CAP) / METRIC_CAP;
    let filled = ((pct * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// One decimal, then the metric's unit
pub fn format_metric_value(score: &MetricScore) -> String {
    score.metric.format_value(score.value)
}

/// Format every metric of an evaluation as `label  value  bar`
pub fn format_metrics(evaluation: &Evaluation, use_colors: bool) -> String {
    let width = bar_width();

    evaluation
        .scores
        .iter()
        .map(|score| {
            let label = format!("{:<width$}", score.metric.label, width = LABEL_WIDTH);
            let value = format!("{:>width$}", format_metric_value(score), width = VALUE_WIDTH);
            let bar = metric_bar(score.value, width);

            match (use_colors, score.metric.rgb()) {
                (true, Some((r, g, b))) => format!(
                    "{}  {}  {}",
                    label,
                    value.bold(),
                    bar.truecolor(r, g, b)
                ),
                _ => format!("{}  {}  {}", label, value, bar),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Step-by-step account of one metric score
pub fn format_breakdown(score: &MetricScore, use_colors: bool) -> String {
    let breakdown = &score.breakdown;
    let mut lines = Vec::with_capacity(breakdown.factors.len() + 3);

    let header = format!("{} = {}", score.metric.label, format_metric_value(score));
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });
    lines.push(format!("  Base value: {:.1}", breakdown.base_value));

    for factor in &breakdown.factors {
        let delta = factor.after - factor.before;
        let line = format!(
            "  {:<22} {:<14} {:+.1}  -> {:.1}",
            factor.label, factor.description, delta, factor.after
        );
        lines.push(if use_colors {
            line.dimmed().to_string()
        } else {
            line
        });
    }

    if breakdown.capped() {
        lines.push(format!(
            "  Capped at {:.0} (raw {:.1})",
            METRIC_CAP, breakdown.raw_value
        ));
    }

    lines.join("\n")
}

/// Impact bucket followed by the four dimension descriptions
pub fn format_impacts(evaluation: &Evaluation, use_colors: bool) -> String {
    let header = format!(
        "Implementation {} - {} impact",
        evaluation.level, evaluation.impact_level
    );
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for (dimension, text) in &evaluation.impacts {
        if use_colors {
            lines.push(format!("  {}: {}", dimension.label().cyan(), text));
        } else {
            lines.push(format!("  {}: {}", dimension.label(), text));
        }
    }

    lines.join("\n")
}

/// Map styling scalars at the evaluation's level
pub fn format_styling(evaluation: &Evaluation) -> String {
    let scaling = &evaluation.scaling;
    let map = &evaluation.map;
    let mut lines = vec![
        format!("center: {:.4}, {:.4}", map.center[0], map.center[1]),
        format!("zoom: {}", map.zoom),
        format!("style: {}", map.style),
        format!("line width: {:.2}", scaling.line_width),
        format!("opacity: {:.3}", scaling.opacity),
    ];
    if let Some(radius) = scaling.radius {
        lines.push(format!("radius: {:.2}", radius));
    }
    lines.push(format!("after image opacity: {:.3}", evaluation.after_image_opacity));
    lines.join("\n")
}

/// Parameters with their bounds and current values
pub fn format_parameters(intervention: &Intervention, values: &ParameterValues, use_colors: bool) -> String {
    intervention
        .parameters
        .iter()
        .map(|param| {
            let current = values
                .get(param.id)
                .map(|v| param.format_value(v))
                .unwrap_or_else(|| "-".to_string());
            let range = format!(
                "[{} - {}]",
                param.format_value(param.min),
                param.format_value(param.max)
            );
            if use_colors {
                format!("  {:<22} {:>8}  {}", param.id, current.bold(), range.dimmed())
            } else {
                format!("  {:<22} {:>8}  {}", param.id, current, range)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Overview of every intervention: title, parameters, metrics
pub fn format_intervention_list(interventions: &[Intervention], use_colors: bool) -> String {
    interventions
        .iter()
        .map(|entry| {
            let defaults = ParameterValues::defaults_for(entry);
            let heading = format!("{} - {}", entry.kind, entry.title);
            let metrics = entry
                .metrics
                .iter()
                .map(|m| m.id)
                .collect::<Vec<_>>()
                .join(", ");

            if use_colors {
                format!(
                    "{}\n  {}\n{}\n  metrics: {}",
                    heading.bold(),
                    entry.description.dimmed(),
                    format_parameters(entry, &defaults, true),
                    metrics
                )
            } else {
                format!(
                    "{}\n  {}\n{}\n  metrics: {}",
                    heading,
                    entry.description,
                    format_parameters(entry, &defaults, false),
                    metrics
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Visible features, one per line, with size and drawn radius
pub fn format_features(evaluation: &Evaluation, intervention: &Intervention, use_colors: bool) -> String {
    if evaluation.features.is_empty() {
        return "No features visible.".to_string();
    }

    evaluation
        .features
        .iter()
        .map(|feature| {
            let mut line = format!(
                "{:<4} {:<30} {:<13}",
                feature.id(),
                feature.properties.name,
                feature.type_tag()
            );
            if let Some(measure) = feature.measure() {
                line.push_str(&format!(" {:>9}", measure));
            }
            if let Some(radius) = evaluation.feature_radius(feature) {
                line.push_str(&format!("  r={:.1}", radius));
            }

            let color = parse_hex_color(intervention.feature_color(feature.type_tag()));
            match (use_colors, color) {
                (true, Some((r, g, b))) => format!("{} {}", "●".truecolor(r, g, b), line),
                _ => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Visible features as a GeoJSON FeatureCollection
pub fn format_geojson(features: &[Feature]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&FeatureCollection::new(features.to_vec()))
}

/// Pop-up text shown for a selected feature
pub fn format_feature_popup(feature: &Feature, level: ImplementationLevel) -> String {
    format!(
        "{}\nImplementation: {}\n{}",
        feature.properties.name, level, feature.properties.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{intervention, InterventionKind};
    use crate::evaluate::evaluate;

    fn street_eval(level: f64) -> Evaluation {
        let street = intervention(InterventionKind::Street);
        evaluate(street, ImplementationLevel::new(level), &ParameterValues::defaults_for(street)).unwrap()
    }

    #[test]
    fn test_metric_bar_widths() {
        assert_eq!(metric_bar(50.0, 10), "█████░░░░░");
        assert_eq!(metric_bar(0.0, 4), "░░░░");
        assert_eq!(metric_bar(150.0, 4), "████");
        assert_eq!(metric_bar(-20.0, 4), "░░░░");
    }

    #[test]
    fn test_format_metrics_plain() {
        let result = format_metrics(&street_eval(40.0), false);
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Pedestrian Activity"));
        assert!(lines[0].contains("53.0"));
    }

    #[test]
    fn test_format_breakdown() {
        let eval = street_eval(40.0);
        let result = format_breakdown(&eval.scores[0], false);
        assert!(result.starts_with("Pedestrian Activity = 53.0"));
        assert!(result.contains("Base value: 25.0"));
        assert!(result.contains("Implementation"));
        assert!(result.contains("40% of base"));
        assert!(result.contains("Facade Transparency"));
        assert!(!result.contains("Capped"));
    }

    #[test]
    fn test_format_impacts() {
        let result = format_impacts(&street_eval(80.0), false);
        assert!(result.starts_with("Implementation 80% - high impact"));
        assert_eq!(result.lines().count(), 5);
    }

    #[test]
    fn test_format_styling_street_has_no_radius() {
        let result = format_styling(&street_eval(40.0));
        assert!(result.contains("line width: 5.00"));
        assert!(result.contains("opacity: 0.600"));
        assert!(!result.contains("radius"));
        assert!(result.contains("after image opacity: 0.580"));
        assert!(result.contains("center: -73.9400, 40.7450"));
        assert!(result.contains("zoom: 16"));
        assert!(result.contains("style: mapbox://styles/mapbox/light-v11"));
    }

    #[test]
    fn test_metric_value_unit_spacing() {
        let public_space = intervention(InterventionKind::PublicSpace);
        let eval = evaluate(
            public_space,
            ImplementationLevel::new(50.0),
            &ParameterValues::defaults_for(public_space),
        )
        .unwrap();
        let green = eval.scores.iter().find(|s| s.metric.id == "green-space").unwrap();
        assert_eq!(format_metric_value(green), "50.0 sqm");
        assert!(format_breakdown(green, false).starts_with("Green Space = 50.0 sqm"));

        // Unitless metrics get no trailing space
        assert_eq!(format_metric_value(&street_eval(40.0).scores[0]), "53.0");
    }

    #[test]
    fn test_format_parameters() {
        let street = intervention(InterventionKind::Street);
        let result = format_parameters(street, &ParameterValues::defaults_for(street), false);
        assert!(result.contains("facade-transparency"));
        assert!(result.contains("40%"));
        assert!(result.contains("[20% - 80%]"));
    }

    #[test]
    fn test_format_intervention_list() {
        let result = format_intervention_list(crate::catalog::all(), false);
        assert!(result.contains("street - Active Street Frontage Transformation"));
        assert!(result.contains("publicSpace - Public Space Network Development"));
        assert!(result.contains("metrics: collaboration, education-industry, innovation-potential"));
    }

    #[test]
    fn test_format_features() {
        let street = intervention(InterventionKind::Street);
        let result = format_features(&street_eval(40.0), street, false);
        assert_eq!(result.lines().count(), 3);
        assert!(result.contains("Main Street Frontage"));
        assert!(result.contains("250 m"));
    }

    #[test]
    fn test_format_geojson() {
        let eval = street_eval(40.0);
        let json = format_geojson(&eval.features).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_format_feature_popup() {
        let eval = street_eval(40.0);
        let popup = format_feature_popup(&eval.features[0], eval.level);
        assert_eq!(
            popup,
            "Main Street Frontage\nImplementation: 40%\nPrimary street with commercial potential"
        );
    }
}
