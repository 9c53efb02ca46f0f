//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::catalog::parse_hex_color;
use crate::config::ThemeMode;
use crate::scoring::ImpactLevel;

/// Luma above which the terminal background counts as light.
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Impact bucket colors (traffic light pattern, green is good here)
    pub impact_high: Color,
    pub impact_mid: Color,
    pub impact_low: Color,

    pub bar_empty: Color,

    // Styles
    pub title_style: Style,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub text: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Feature list
    pub active_marker: Color,
    pub focus_border: Color,
    pub divider_color: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            impact_high: Color::Green,
            impact_mid: Color::Yellow,
            impact_low: Color::Red,
            bar_empty: Color::DarkGray,
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            text: Color::White,
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            active_marker: Color::Yellow,
            focus_border: Color::Cyan,
            divider_color: Color::Indexed(238),
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            impact_high: Color::Rgb(0, 128, 0),
            impact_mid: Color::Rgb(176, 120, 0),
            impact_low: Color::Rgb(190, 30, 30),
            bar_empty: Color::Indexed(250),
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            text: Color::Black,
            tab_active_style: Style::new().fg(Color::Blue).bold(),
            tab_inactive_style: Style::new().fg(Color::Indexed(245)),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Rgb(190, 30, 30),
            active_marker: Color::Rgb(176, 120, 0),
            focus_border: Color::Blue,
            divider_color: Color::Indexed(252),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn impact_color(&self, level: ImpactLevel) -> Color {
        match level {
            ImpactLevel::High => self.impact_high,
            ImpactLevel::Medium => self.impact_mid,
            ImpactLevel::Low => self.impact_low,
        }
    }
}

/// `#RRGGBB` as a terminal color; unparseable input falls back to `fallback`.
pub fn hex_color(hex: &str, fallback: Color) -> Color {
    parse_hex_color(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(fallback)
}

/// Pick the palette for the configured mode. `Auto` queries the terminal
/// background, so call this before the terminal enters raw mode.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA_THRESHOLD => {
                log::debug!("Terminal luma {:.2}, using light theme", luma);
                ThemeColors::light()
            }
            Ok(luma) => {
                log::debug!("Terminal luma {:.2}, using dark theme", luma);
                ThemeColors::dark()
            }
            Err(e) => {
                log::debug!("Could not detect terminal background ({}), using dark theme", e);
                ThemeColors::dark()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#4A90E2", Color::Reset), Color::Rgb(0x4A, 0x90, 0xE2));
        assert_eq!(hex_color("teal", Color::Gray), Color::Gray);
    }

    #[test]
    fn test_explicit_modes() {
        assert_eq!(resolve_theme(ThemeMode::Light).text, Color::Black);
        assert_eq!(resolve_theme(ThemeMode::Dark).text, Color::White);
    }

    #[test]
    fn test_impact_color() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.impact_color(ImpactLevel::High), Color::Green);
        assert_eq!(theme.impact_color(ImpactLevel::Low), Color::Red);
    }
}
