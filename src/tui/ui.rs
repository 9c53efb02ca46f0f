use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph, Tabs, Wrap};

use crate::catalog::InterventionKind;
use crate::evaluate::Evaluation;
use crate::output::format_feature_popup;
use crate::scoring::{ImplementationLevel, METRIC_CAP};
use crate::tui::app::{App, Control, Focus, InputMode};
use crate::tui::theme::{hex_color, ThemeColors};

const SLIDER_WIDTH: usize = 16;
const METRIC_BAR_WIDTH: usize = 24;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 12 || area.width < 60 {
        let msg = Paragraph::new("Terminal too small")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),  // Title bar
        Constraint::Length(1),  // Tab bar
        Constraint::Fill(1),    // Panels
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    render_body(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::Breakdown => render_breakdown_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let left = "Urban Impact";
    let right = app.intervention().title;
    let padding_len = (area.width as usize).saturating_sub(left.len() + right.len());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right, Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn tab_label(kind: InterventionKind) -> &'static str {
    match kind {
        InterventionKind::Street => "1 Street Frontage",
        InterventionKind::PublicSpace => "2 Public Space",
        InterventionKind::Campus => "3 Campus Corridor",
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let titles: Vec<&str> = InterventionKind::ALL.iter().map(|k| tab_label(*k)).collect();

    let tabs = Tabs::new(titles)
        .select(app.state.active().index())
        .style(theme.tab_inactive_style)
        .highlight_style(theme.tab_active_style.reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(area);

    let controls_height = app.controls().len() as u16 * 2 + 2;
    let left = Layout::vertical([Constraint::Length(controls_height), Constraint::Fill(1)]).split(columns[0]);

    render_controls(frame, left[0], app);
    render_features(frame, left[1], app);

    match app.evaluation {
        Ok(ref eval) => {
            let right = Layout::vertical([
                Constraint::Length(eval.scores.len() as u16 + 2),
                Constraint::Fill(1),
                Constraint::Length(7),
            ])
            .split(columns[1]);
            render_metrics(frame, right[0], app, eval);
            render_impacts(frame, right[1], app, eval);
            render_detail(frame, right[2], app, eval);
        }
        Err(ref e) => {
            let msg = Paragraph::new(format!("Error: {}", e))
                .style(Style::default().fg(app.theme.flash_error))
                .wrap(Wrap { trim: true })
                .block(Block::bordered().title(" Metrics "));
            frame.render_widget(msg, columns[1]);
        }
    }
}

fn panel<'a>(title: &'a str, focused: bool, theme: &ThemeColors) -> Block<'a> {
    let border = if focused { theme.focus_border } else { theme.divider_color };
    Block::bordered()
        .title(title)
        .border_style(Style::default().fg(border))
}

fn slider(fraction: f64, width: usize, fill: Color, theme: &ThemeColors) -> Vec<Span<'static>> {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    vec![
        Span::styled("━".repeat(filled), Style::default().fg(fill)),
        Span::styled("●", Style::default().fg(fill).bold()),
        Span::styled("─".repeat(width - filled), Style::default().fg(theme.bar_empty)),
    ]
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Controls;
    let values = app.state.parameter_values(app.state.active());

    let mut lines = Vec::new();
    for (idx, control) in app.controls().into_iter().enumerate() {
        let selected = focused && idx == app.selected_control;
        let (label, value_text, fraction, fill) = match control {
            Control::Level => {
                let level = app.state.level();
                (
                    "Implementation Level",
                    level.to_string(),
                    level.fraction(),
                    theme.impact_color(level.classify()),
                )
            }
            Control::Parameter(param) => {
                let value = values.get(param.id).unwrap_or(param.default);
                let span = param.max - param.min;
                let fraction = if span > 0.0 { (value - param.min) / span } else { 0.0 };
                (param.label, param.format_value(value), fraction, theme.title_color)
            }
        };

        let marker = if selected { "▶ " } else { "  " };
        let label_style = if selected {
            theme.row_selected
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.focus_border)),
            Span::styled(label, label_style),
            Span::raw(" "),
            Span::styled(value_text, Style::default().fg(theme.muted).bold()),
        ]));

        let mut bar = vec![Span::raw("  ")];
        bar.extend(slider(fraction, SLIDER_WIDTH, fill, theme));
        lines.push(Line::from(bar));
    }

    frame.render_widget(
        Paragraph::new(lines).block(panel(" Controls ", focused, theme)),
        area,
    );
}

fn render_features(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Features;
    let kind = app.state.active();
    let intervention = app.intervention();
    let features = app.visible_features();

    let lines: Vec<Line> = if features.is_empty() {
        vec![Line::from(Span::styled("No features visible", Style::default().fg(theme.muted)))]
    } else {
        features
            .iter()
            .enumerate()
            .map(|(idx, feature)| {
                let color = hex_color(intervention.feature_color(feature.type_tag()), theme.muted);
                let active = app.state.is_feature_active(kind, feature.id());
                let glyph = if feature.is_point() { "●" } else { "━" };
                let check = if active { "[x] " } else { "[ ] " };

                let name_style = if focused && idx == app.feature_cursor {
                    theme.row_selected
                } else if active {
                    Style::default().fg(theme.active_marker).bold()
                } else {
                    Style::default().fg(theme.text)
                };

                let mut spans = vec![
                    Span::styled(check, Style::default().fg(theme.active_marker)),
                    Span::styled(format!("{} ", glyph), Style::default().fg(color)),
                    Span::styled(feature.properties.name, name_style),
                ];
                if let Some(measure) = feature.measure() {
                    spans.push(Span::styled(format!("  {}", measure), Style::default().fg(theme.muted)));
                }
                Line::from(spans)
            })
            .collect()
    };

    let title = format!(" Features ({}/{}) ", features.len(), intervention.features.len());
    frame.render_widget(Paragraph::new(lines).block(panel(&title, focused, theme)), area);
}

fn metric_bar(value: f64, width: usize, color: Color, theme: &ThemeColors) -> Vec<Span<'static>> {
    let pct = value.clamp(0.0, METRIC_CAP) / METRIC_CAP;
    let filled = ((pct * width as f64).round() as usize).min(width);
    vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(width - filled), Style::default().fg(theme.bar_empty)),
    ]
}

fn render_metrics(frame: &mut Frame, area: Rect, app: &App, eval: &Evaluation) {
    let theme = &app.theme;
    let lines: Vec<Line> = eval
        .scores
        .iter()
        .map(|score| {
            let color = hex_color(score.metric.color, theme.title_color);
            let mut spans = vec![
                Span::styled(format!("{:<22}", score.metric.label), Style::default().fg(theme.text)),
                Span::styled(
                    format!("{:>9} ", score.metric.format_value(score.value)),
                    Style::default().fg(color).bold(),
                ),
            ];
            spans.extend(metric_bar(score.value, METRIC_BAR_WIDTH, color, theme));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Metrics ")),
        area,
    );
}

fn render_impacts(frame: &mut Frame, area: Rect, app: &App, eval: &Evaluation) {
    let theme = &app.theme;
    let mut lines = vec![Line::from(vec![
        Span::raw("Impact: "),
        Span::styled(
            eval.impact_level.label().to_uppercase(),
            Style::default().fg(theme.impact_color(eval.impact_level)).bold(),
        ),
    ])];

    for (dimension, text) in &eval.impacts {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", dimension.label()), theme.header_style.fg(theme.title_color)),
            Span::styled(*text, Style::default().fg(theme.text)),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" Impact ")),
        area,
    );
}

/// Selected feature pop-up, or the current map styling when nothing is selected.
fn render_detail(frame: &mut Frame, area: Rect, app: &App, eval: &Evaluation) {
    let theme = &app.theme;

    let selected = if app.focus == Focus::Features {
        app.selected_feature()
    } else {
        None
    };

    let (title, lines) = match selected {
        Some(feature) => {
            let text = format_feature_popup(feature, eval.level);
            let mut lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
            if let Some(first) = lines.first_mut() {
                *first = Line::from(Span::styled(feature.properties.name, theme.title_style));
            }
            if let Some(radius) = eval.feature_radius(feature) {
                lines.push(Line::from(Span::styled(
                    format!("radius {:.1}", radius),
                    Style::default().fg(theme.muted),
                )));
            }
            (" Feature ", lines)
        }
        None => {
            let scaling = &eval.scaling;
            let mut parts = vec![
                format!("line width {:.2}", scaling.line_width),
                format!("opacity {:.2}", scaling.opacity),
            ];
            if let Some(radius) = scaling.radius {
                parts.push(format!("radius {:.1}", radius));
            }
            let lines = vec![
                Line::from(Span::styled(parts.join("  "), Style::default().fg(theme.text))),
                Line::from(Span::styled(
                    format!("after image opacity {:.2}", eval.after_image_opacity),
                    Style::default().fg(theme.muted),
                )),
                Line::from(Span::styled(
                    format!(
                        "zoom {}  center {:.4}, {:.4}",
                        eval.map.zoom, eval.map.center[0], eval.map.center[1]
                    ),
                    Style::default().fg(theme.muted),
                )),
            ];
            (" Map Styling ", lines)
        }
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(title)),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        // Show flash message with color based on message type
        let msg_color = if msg.starts_with("Error") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let focus = match app.focus {
            Focus::Controls => "controls",
            Focus::Features => "features",
        };

        let hints = [
            ("j", "/", "k", ":nav "),
            ("h", "/", "l", ":adjust "),
            ("f", "", "", ":focus "),
            ("Space", "", "", ":select "),
            ("b", "", "", ":breakdown "),
            ("?", "", "", ":help "),
            ("q", "", "", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(level_summary(app.state.level()), Style::default().fg(theme.muted)),
            Span::raw(" "),
            Span::styled(focus, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (i, (key1, sep, key2, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key1, Style::default().fg(theme.status_key_color)));
            if !sep.is_empty() {
                spans.push(Span::raw(*sep));
                spans.push(Span::styled(*key2, Style::default().fg(theme.status_key_color)));
            }
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area
    );
}

fn level_summary(level: ImplementationLevel) -> String {
    format!("{} ({})", level, level.classify())
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Ok(ref eval) = app.evaluation else {
        return;
    };
    let theme = &app.theme;

    let mut lines = Vec::new();
    for score in &eval.scores {
        let breakdown = &score.breakdown;
        lines.push(Line::from(vec![
            Span::styled(score.metric.label, theme.popup_title),
            Span::raw(format!("  {}", score.metric.format_value(score.value))),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  base {:.1}", breakdown.base_value),
            Style::default().fg(theme.muted),
        )));
        for factor in &breakdown.factors {
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<20}", factor.label)),
                Span::styled(format!("{:<12}", factor.description), Style::default().fg(theme.muted)),
                Span::raw(format!("{:+7.1}", factor.after - factor.before)),
            ]));
        }
        if breakdown.capped() {
            lines.push(Line::from(Span::styled(
                format!("  capped at {:.0} (raw {:.1})", METRIC_CAP, breakdown.raw_value),
                Style::default().fg(theme.flash_error),
            )));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Esc / b to close",
        Style::default().fg(theme.muted),
    )));

    let height = lines.len() as u16 + 2;
    let popup_area = centered_rect_fixed(56, height, frame.area());

    frame.render_widget(Clear, popup_area);
    let block = Block::bordered()
        .title(" Score Breakdown ")
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 17, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let entries = [
        ("Tab / S-Tab   ", "Next / previous intervention"),
        ("1 2 3         ", "Jump to intervention"),
        ("j / k         ", "Select control or feature"),
        ("h / l  ← / →  ", "Adjust selected control"),
        ("H / L         ", "Adjust in steps of five"),
        ("f             ", "Focus controls / features"),
        ("Space         ", "Select feature"),
        ("b             ", "Score breakdown"),
        ("r             ", "Reset parameters"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(*keys, Style::default().fg(theme.status_key_color).bold()),
                Span::raw(*action),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_centered_rect_fixed() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(50, 10, area), Rect::new(25, 15, 50, 10));
        assert_eq!(centered_rect_fixed(200, 10, area).width, 100);
    }

    #[test]
    fn test_draw_shows_metrics_and_controls() {
        let app = App::new(AppState::new(), ThemeColors::dark());
        let screen = render(&app);
        assert!(screen.contains("Urban Impact"));
        assert!(screen.contains("Pedestrian Activity"));
        assert!(screen.contains("Implementation Level"));
        assert!(screen.contains("Main Street Frontage"));
    }

    #[test]
    fn test_draw_metric_units_and_viewport() {
        let mut state = AppState::new();
        state.set_level(50.0);
        state.switch_to(crate::catalog::InterventionKind::PublicSpace);
        let app = App::new(state, ThemeColors::dark());
        let screen = render(&app);
        assert!(screen.contains("50.0 sqm"));
        assert!(screen.contains("zoom 15.5"));
    }

    #[test]
    fn test_draw_help_overlay() {
        let mut app = App::new(AppState::new(), ThemeColors::dark());
        app.show_help();
        let screen = render(&app);
        assert!(screen.contains("Keyboard Shortcuts"));
    }
}
