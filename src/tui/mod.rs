pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::catalog::InterventionKind;

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer log output while the TUI owns the terminal
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered log lines now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Intervention tabs
                KeyCode::Tab => app.next_intervention(),
                KeyCode::BackTab => app.previous_intervention(),
                KeyCode::Char('1') => app.switch_to(InterventionKind::Street),
                KeyCode::Char('2') => app.switch_to(InterventionKind::PublicSpace),
                KeyCode::Char('3') => app.switch_to(InterventionKind::Campus),

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Sliders
                KeyCode::Char('l') | KeyCode::Right => app.step_selected(1),
                KeyCode::Char('h') | KeyCode::Left => app.step_selected(-1),
                KeyCode::Char('L') => app.step_selected(app::BIG_STEP),
                KeyCode::Char('H') => app.step_selected(-app::BIG_STEP),

                // Features
                KeyCode::Char('f') => app.toggle_focus(),
                KeyCode::Char(' ') => {
                    if app.focus == app::Focus::Features {
                        app.toggle_selected_feature();
                    }
                }

                KeyCode::Char('r') => app.reset_parameters(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                // Score breakdown
                KeyCode::Char('b') => app.show_breakdown(),

                _ => {}
            }
        }
        app::InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.dismiss_breakdown(),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        App::new(AppState::new(), ThemeColors::dark())
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_keys_switch_intervention() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.active(), InterventionKind::PublicSpace);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.state.active(), InterventionKind::Street);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.state.active(), InterventionKind::Campus);
    }

    #[test]
    fn test_level_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.state.level().value(), 55.0);
        press(&mut app, KeyCode::Char('H'));
        assert_eq!(app.state.level().value(), 30.0);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.state.level().value(), 25.0);
    }

    #[test]
    fn test_space_only_toggles_with_feature_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.state.active_features(InterventionKind::Street).is_empty());

        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.state.is_feature_active(InterventionKind::Street, "sf1"));
    }

    #[test]
    fn test_overlays() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, app::InputMode::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.input_mode, app::InputMode::Normal);

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.input_mode, app::InputMode::Breakdown);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.input_mode, app::InputMode::Breakdown);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, app::InputMode::Normal);
    }
}
