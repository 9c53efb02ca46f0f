use std::time::Instant;

use crate::catalog::{Intervention, InterventionKind, Parameter};
use crate::error::ConfigurationError;
use crate::evaluate::Evaluation;
use crate::geo::Feature;
use crate::state::AppState;
use crate::tui::theme::ThemeColors;

/// Implementation-level change per h/l press.
pub const LEVEL_STEP: f64 = 5.0;
/// Multiplier for H/L.
pub const BIG_STEP: i32 = 5;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    Breakdown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Controls,
    Features,
}

/// A slider row in the controls panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Level,
    Parameter(&'static Parameter),
}

pub struct App {
    pub state: AppState,
    pub evaluation: Result<Evaluation, ConfigurationError>,
    /// 0 is the implementation level, then parameters in declaration order.
    pub selected_control: usize,
    pub feature_cursor: usize,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(state: AppState, theme: ThemeColors) -> Self {
        let evaluation = state.evaluate_active();
        Self {
            state,
            evaluation,
            selected_control: 0,
            feature_cursor: 0,
            focus: Focus::Controls,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            theme,
        }
    }

    pub fn intervention(&self) -> &'static Intervention {
        self.state.active_intervention()
    }

    /// Re-run the evaluation after any state change. Features hidden by the
    /// count filter are deselected.
    fn recompute(&mut self) {
        self.evaluation = self.state.evaluate_active();
        match self.evaluation {
            Ok(ref eval) => {
                let visible: Vec<&str> = eval.features.iter().map(|f| f.id()).collect();
                self.state.retain_active_features(eval.kind, &visible);
            }
            Err(ref e) => log::warn!("Evaluation failed: {}", e),
        }
        let count = self.visible_features().len();
        if self.feature_cursor >= count {
            self.feature_cursor = count.saturating_sub(1);
        }
    }

    pub fn visible_features(&self) -> &[Feature] {
        match self.evaluation {
            Ok(ref eval) => eval.features.as_slice(),
            Err(_) => &[],
        }
    }

    pub fn selected_feature(&self) -> Option<&Feature> {
        self.visible_features().get(self.feature_cursor)
    }

    pub fn controls(&self) -> Vec<Control> {
        std::iter::once(Control::Level)
            .chain(self.intervention().parameters.iter().map(Control::Parameter))
            .collect()
    }

    pub fn selected(&self) -> Control {
        self.controls()
            .get(self.selected_control)
            .copied()
            .unwrap_or(Control::Level)
    }

    pub fn next_row(&mut self) {
        match self.focus {
            Focus::Controls => {
                let count = self.controls().len();
                self.selected_control = (self.selected_control + 1) % count;
            }
            Focus::Features => {
                let count = self.visible_features().len();
                if count > 0 {
                    self.feature_cursor = (self.feature_cursor + 1) % count;
                }
            }
        }
    }

    pub fn previous_row(&mut self) {
        match self.focus {
            Focus::Controls => {
                let count = self.controls().len();
                self.selected_control = (self.selected_control + count - 1) % count;
            }
            Focus::Features => {
                let count = self.visible_features().len();
                if count > 0 {
                    self.feature_cursor = (self.feature_cursor + count - 1) % count;
                }
            }
        }
    }

    /// Move the selected slider by `steps` (negative moves down).
    pub fn step_selected(&mut self, steps: i32) {
        match self.selected() {
            Control::Level => self.state.adjust_level(LEVEL_STEP * steps as f64),
            Control::Parameter(param) => {
                if let Err(e) = self.state.step_parameter(param.id, steps) {
                    self.show_flash(format!("Error: {}", e));
                }
            }
        }
        self.recompute();
    }

    pub fn switch_to(&mut self, kind: InterventionKind) {
        if self.state.active() == kind {
            return;
        }
        self.state.switch_to(kind);
        self.selected_control = 0;
        self.feature_cursor = 0;
        self.recompute();
    }

    pub fn next_intervention(&mut self) {
        self.switch_to(self.state.active().next());
    }

    pub fn previous_intervention(&mut self) {
        self.switch_to(self.state.active().previous());
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Controls => Focus::Features,
            Focus::Features => Focus::Controls,
        };
    }

    pub fn toggle_selected_feature(&mut self) {
        let Some(feature) = self.selected_feature() else {
            return;
        };
        let (id, name) = (feature.id(), feature.properties.name);
        let kind = self.state.active();
        if self.state.toggle_active_feature(kind, id) {
            self.show_flash(format!("Selected: {}", name));
        } else {
            self.show_flash(format!("Deselected: {}", name));
        }
    }

    pub fn reset_parameters(&mut self) {
        let kind = self.state.active();
        self.state.reset_parameters(kind);
        self.recompute();
        self.show_flash(format!("Reset {} parameters", kind));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = &self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Show score breakdown overlay
    pub fn show_breakdown(&mut self) {
        if self.evaluation.is_ok() {
            self.input_mode = InputMode::Breakdown;
        }
    }

    /// Dismiss score breakdown overlay
    pub fn dismiss_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
