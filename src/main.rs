use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use urban_impact::catalog::{self, InterventionKind};
use urban_impact::error::ConfigurationError;
use urban_impact::evaluate::Evaluation;
use urban_impact::output;
use urban_impact::state::AppState;

const EXIT_SUCCESS: i32 = 0;
const EXIT_RUNTIME: i32 = 1;
const EXIT_CONFIG: i32 = 2;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List interventions with their parameters and metrics
    List,
    /// Score an intervention's metrics
    Metrics {
        /// street, publicSpace or campus (defaults to the configured one)
        intervention: Option<InterventionKind>,
        /// Override a parameter, e.g. --set plaza-count=4
        #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, f64)>,
        /// Only score this metric, e.g. --metric green-space
        #[arg(short, long, value_name = "ID")]
        metric: Option<String>,
        /// Show how each score was reached
        #[arg(short, long)]
        breakdown: bool,
        /// Print a JSON summary instead of bars
        #[arg(long)]
        json: bool,
    },
    /// Show the impact bucket and descriptions for the current level
    Impact {
        intervention: Option<InterventionKind>,
    },
    /// Show map styling scalars for the current level
    Style {
        intervention: Option<InterventionKind>,
    },
    /// List the features the map would draw
    Features {
        intervention: Option<InterventionKind>,
        #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, f64)>,
        /// Print a GeoJSON FeatureCollection
        #[arg(long)]
        json: bool,
    },
    /// Interactive explorer (default if no subcommand)
    Tui,
}

#[derive(Parser, Debug)]
#[command(name = "urban-impact")]
#[command(about = "Explore the projected impact of urban design interventions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/urban-impact/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Implementation level, 0-100 (overrides the config)
    #[arg(short, long, global = true, value_parser = parse_level)]
    level: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Parse `id=value` from `--set`
fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{}'", s))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing parameter id in '{}'", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{}' for {}", value.trim(), id))?;
    if !value.is_finite() {
        return Err(format!("{} must be a finite number", id));
    }
    Ok((id.to_string(), value))
}

fn parse_level(s: &str) -> Result<f64, String> {
    let level: f64 = s.parse().map_err(|_| format!("invalid level '{}'", s))?;
    if !(0.0..=100.0).contains(&level) {
        return Err(format!("level {} is outside 0-100", level));
    }
    Ok(level)
}

fn apply_assignments(
    state: &mut AppState,
    kind: InterventionKind,
    assignments: &[(String, f64)],
) -> Result<(), ConfigurationError> {
    for (id, value) in assignments {
        let stored = state.set_parameter(kind, id, *value)?;
        if stored != *value {
            log::warn!("{}.{}: {} adjusted to {}", kind, id, value, stored);
        }
    }
    Ok(())
}

/// Narrow `evaluation` to the metric named `id`, if any.
fn select_metric(evaluation: &mut Evaluation, id: Option<&str>) -> Result<(), ConfigurationError> {
    let Some(id) = id else {
        return Ok(());
    };
    let metric = catalog::intervention(evaluation.kind).require_metric(id)?;
    evaluation.scores.retain(|score| score.metric.id == metric.id);
    Ok(())
}

fn print_errors(heading: &str, errors: &[String]) {
    eprintln!("{}", heading);
    for error in errors {
        eprintln!("  - {}", error);
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    urban_impact::stderr_buffer::init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Tui);

    // Validate the built-in catalog before anything reads it
    if let Err(errors) = urban_impact::scoring::validate_catalog(catalog::all()) {
        print_errors("Catalog errors:", &errors);
        std::process::exit(EXIT_CONFIG);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match urban_impact::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = urban_impact::config::validate_config(&config) {
        print_errors("Config errors:", &errors);
        std::process::exit(EXIT_CONFIG);
    }

    let mut state = match AppState::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(level) = cli.level {
        state.set_level(level);
    }
    log::debug!("Starting at {} on {}", state.level(), state.active());

    if let Err(e) = run_command(command, state, &config).await {
        eprintln!("Error: {:#}", e);
        let code = if e.downcast_ref::<ConfigurationError>().is_some() {
            EXIT_CONFIG
        } else {
            EXIT_RUNTIME
        };
        std::process::exit(code);
    }

    std::process::exit(EXIT_SUCCESS);
}

async fn run_command(
    command: Commands,
    mut state: AppState,
    config: &urban_impact::config::Config,
) -> anyhow::Result<()> {
    let use_colors = output::should_use_colors();

    match command {
        Commands::List => {
            println!("{}", output::format_intervention_list(catalog::all(), use_colors));
        }
        Commands::Metrics {
            intervention,
            set,
            metric,
            breakdown,
            json,
        } => {
            let kind = intervention.unwrap_or(state.active());
            apply_assignments(&mut state, kind, &set)?;
            let mut evaluation = state.evaluate(kind)?;
            select_metric(&mut evaluation, metric.as_deref())?;

            if json {
                let summary = serde_json::to_string_pretty(&evaluation.summary())
                    .context("Failed to serialize metrics")?;
                println!("{}", summary);
                return Ok(());
            }

            let entry = catalog::intervention(kind);
            println!("{} at {}", entry.title, evaluation.level);
            println!("{}", output::format_metrics(&evaluation, use_colors));
            if breakdown {
                for score in &evaluation.scores {
                    println!();
                    println!("{}", output::format_breakdown(score, use_colors));
                }
            }
        }
        Commands::Impact { intervention } => {
            let kind = intervention.unwrap_or(state.active());
            let evaluation = state.evaluate(kind)?;
            println!("{}", output::format_impacts(&evaluation, use_colors));
        }
        Commands::Style { intervention } => {
            let kind = intervention.unwrap_or(state.active());
            let evaluation = state.evaluate(kind)?;
            println!("{}", output::format_styling(&evaluation));
        }
        Commands::Features {
            intervention,
            set,
            json,
        } => {
            let kind = intervention.unwrap_or(state.active());
            apply_assignments(&mut state, kind, &set)?;
            let evaluation = state.evaluate(kind)?;

            if json {
                let geojson = output::format_geojson(&evaluation.features)
                    .context("Failed to serialize features")?;
                println!("{}", geojson);
            } else {
                let entry = catalog::intervention(kind);
                println!("{}", output::format_features(&evaluation, entry, use_colors));
            }
        }
        Commands::Tui => {
            let theme = urban_impact::tui::resolve_theme(config.theme_mode());
            let app = urban_impact::tui::App::new(state, theme);
            urban_impact::tui::run_tui(app).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("plaza-count=4"), Ok(("plaza-count".to_string(), 4.0)));
        assert_eq!(
            parse_assignment(" pathway-width = 5.5 "),
            Ok(("pathway-width".to_string(), 5.5))
        );
        assert!(parse_assignment("plaza-count").is_err());
        assert!(parse_assignment("=4").is_err());
        assert!(parse_assignment("plaza-count=lots").is_err());
        assert!(parse_assignment("plaza-count=inf").is_err());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("40"), Ok(40.0));
        assert!(parse_level("101").is_err());
        assert!(parse_level("-1").is_err());
    }

    #[test]
    fn test_cli_parses_metrics() {
        let cli = Cli::try_parse_from([
            "urban-impact",
            "-l",
            "40",
            "metrics",
            "public-space",
            "--set",
            "plaza-count=1",
            "--metric",
            "green-space",
            "--breakdown",
        ])
        .unwrap();
        assert_eq!(cli.level, Some(40.0));
        match cli.command {
            Some(Commands::Metrics {
                intervention,
                set,
                metric,
                breakdown,
                json,
            }) => {
                assert_eq!(intervention, Some(InterventionKind::PublicSpace));
                assert_eq!(set, vec![("plaza-count".to_string(), 1.0)]);
                assert_eq!(metric.as_deref(), Some("green-space"));
                assert!(breakdown);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_select_metric() {
        let state = AppState::new();
        let mut evaluation = state.evaluate(InterventionKind::PublicSpace).unwrap();
        select_metric(&mut evaluation, Some("green-space")).unwrap();
        assert_eq!(evaluation.scores.len(), 1);
        assert_eq!(evaluation.scores[0].metric.id, "green-space");

        let mut evaluation = state.evaluate(InterventionKind::Street).unwrap();
        select_metric(&mut evaluation, None).unwrap();
        assert_eq!(evaluation.scores.len(), 3);
    }

    #[test]
    fn test_select_unknown_metric_is_config_error() {
        let state = AppState::new();
        let mut evaluation = state.evaluate(InterventionKind::Street).unwrap();
        let err = select_metric(&mut evaluation, Some("green-space")).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownMetric {
                intervention: InterventionKind::Street,
                metric: "green-space".to_string(),
            }
        );

        // The error reaches main through anyhow and maps to the config exit code
        let err = anyhow::Error::from(err);
        assert!(err.downcast_ref::<ConfigurationError>().is_some());
    }

    #[test]
    fn test_cli_rejects_unknown_intervention() {
        assert!(Cli::try_parse_from(["urban-impact", "impact", "harbor"]).is_err());
    }

    #[test]
    fn test_apply_assignments_snaps_and_rejects_unknown() {
        let mut state = AppState::new();
        apply_assignments(&mut state, InterventionKind::Campus, &[("pathway-width".to_string(), 5.3)]).unwrap();
        assert_eq!(
            state.parameter_values(InterventionKind::Campus).get("pathway-width"),
            Some(5.5)
        );

        let err = apply_assignments(&mut state, InterventionKind::Campus, &[("seats".to_string(), 1.0)])
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownParameter { .. }));
    }
}
