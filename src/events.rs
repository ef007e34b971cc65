//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Time to wait for input before redrawing.
///
/// Kept short so the solution animation stays smooth while no key is pressed.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. It uses a timeout to avoid blocking the UI.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(POLL_TIMEOUT)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code);
            }
        }
    }

    // Update animation if in-game
    if matches!(app.screen, Screen::InGame) {
        app.animation_manager.update();
    }

    Ok(())
}

/// Dispatches a single key press.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app),
        KeyCode::Char('h') => handle_h_events(app),
        KeyCode::Char('r') => handle_r_events(app),
        _ => {}
    }
}

/// Handles 'j' key press events for downward navigation.
pub(crate) fn handle_j_events(app: &mut App) {
    app.screen = match app.screen {
        Screen::MainMenu(MainMenuItem::Generate) => Screen::MainMenu(MainMenuItem::Options),
        Screen::MainMenu(MainMenuItem::Options | MainMenuItem::Quit) => {
            Screen::MainMenu(MainMenuItem::Quit)
        }
        Screen::OptionsMenu(OptionsMenuItem::Width) => Screen::OptionsMenu(OptionsMenuItem::Height),
        Screen::OptionsMenu(OptionsMenuItem::Height | OptionsMenuItem::Back) => {
            Screen::OptionsMenu(OptionsMenuItem::Back)
        }
        Screen::InGame => Screen::InGame,
    };
}

/// Handles 'k' key press events for upward navigation.
pub(crate) fn handle_k_events(app: &mut App) {
    app.screen = match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => Screen::MainMenu(MainMenuItem::Options),
        Screen::MainMenu(MainMenuItem::Options | MainMenuItem::Generate) => {
            Screen::MainMenu(MainMenuItem::Generate)
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => Screen::OptionsMenu(OptionsMenuItem::Height),
        Screen::OptionsMenu(OptionsMenuItem::Height | OptionsMenuItem::Width) => {
            Screen::OptionsMenu(OptionsMenuItem::Width)
        }
        Screen::InGame => Screen::InGame,
    };
}

/// Handles 'l' key press events for selection and increments.
///
/// Entering the in-game screen always generates a new maze. On the dimension items of the options
/// menu the key grows the selected dimension by one.
pub(crate) fn handle_l_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Generate) => {
            app.screen = Screen::InGame;
            app.regenerate();
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Width);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Width) => app.resize(1, 0),
        Screen::OptionsMenu(OptionsMenuItem::Height) => app.resize(0, 1),
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::InGame => {}
    }
}

/// Handles 'h' key press events for backward navigation and decrements.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => {
            // Reset animation state and return to main menu
            app.animation_manager.clear();
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::OptionsMenu(OptionsMenuItem::Width) => app.resize(-1, 0),
        Screen::OptionsMenu(OptionsMenuItem::Height) => app.resize(0, -1),
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(_) => {}
    }
}

/// Handles 'r' key press events, which regenerate the maze while in game.
pub(crate) fn handle_r_events(app: &mut App) {
    if app.screen == Screen::InGame {
        app.regenerate();
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;
    use crate::config::MazeConfig;

    /// Creates a small seeded app for testing.
    fn create_test_app() -> App {
        App::new(
            MazeConfig::new(14, 12).expect("14x12 is a valid size"),
            Some(3),
            Color::White,
            Color::Red,
        )
    }

    #[test]
    fn test_main_menu_navigation() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));
        handle_key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));
        handle_key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));
        handle_key(&mut app, KeyCode::Char('k'));
        handle_key(&mut app, KeyCode::Char('k'));
        handle_key(&mut app, KeyCode::Char('k'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));
    }

    #[test]
    fn test_quit_from_menu_and_shortcut() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Quit);
        handle_key(&mut app, KeyCode::Char('l'));
        assert!(app.exit);

        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Char('q'));
        assert!(app.exit);
    }

    #[test]
    fn test_generate_enters_game_with_maze() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('l'));

        assert_eq!(app.screen, Screen::InGame);
        assert!(app.maze.is_some());
    }

    #[test]
    fn test_regenerate_in_game_replaces_maze() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Char('l'));
        let first = app.maze.clone();

        handle_key(&mut app, KeyCode::Char('r'));

        assert!(app.maze.is_some());
        assert_ne!(app.maze, first, "next maze in the seeded sequence should differ");
    }

    #[test]
    fn test_regenerate_outside_game_is_ignored() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('r'));

        assert!(app.maze.is_none());
    }

    #[test]
    fn test_return_from_game_clears_animation() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Char('l'));
        app.animation_manager.advance(5);

        handle_key(&mut app, KeyCode::Char('h'));

        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));
        assert!(app.animation_manager.steps.is_empty());
        assert_eq!(app.animation_manager.current_index, 0);
    }

    #[test]
    fn test_options_adjust_dimensions() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Options);

        handle_key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.screen, Screen::OptionsMenu(OptionsMenuItem::Width));

        handle_key(&mut app, KeyCode::Char('l'));
        handle_key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.config.width(), 16);

        handle_key(&mut app, KeyCode::Char('j'));
        handle_key(&mut app, KeyCode::Char('h'));
        assert_eq!(app.config.height(), 11);

        handle_key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.screen, Screen::OptionsMenu(OptionsMenuItem::Back));
        handle_key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('x'));

        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));
        assert!(!app.exit);
    }
}
