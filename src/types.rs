//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the viewer. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen.
    MainMenu(MainMenuItem),
    /// Options screen where the maze dimensions are adjusted.
    OptionsMenu(OptionsMenuItem),
    /// In-game maze visualization screen.
    ///
    /// This variant represents the screen where the generated maze is displayed and its solution
    /// is animated.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "Generate" menu option.
    Generate,
    /// "Options" menu option.
    Options,
    /// "Quit" menu option.
    Quit,
}

/// Options menu navigation choices.
///
/// The first two items are adjusted in place with `h` and `l` rather than selected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum OptionsMenuItem {
    /// Maze width setting.
    Width,
    /// Maze height setting.
    Height,
    /// "Back" navigation option.
    Back,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration.
    MainMenu(u8),
    /// Options menu configuration.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the hint shown at the bottom of the menu's border.
    pub(crate) const fn hint(&self) -> &str {
        match self {
            Self::MainMenu(_) => "(j) down / (k) up / (l) select",
            Self::OptionsMenu(_) => "(j) down / (k) up / (h) less / (l) more",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu items for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::Generate);
        let options_menu = Screen::OptionsMenu(OptionsMenuItem::Width);
        let in_game = Screen::InGame;

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::Generate));
        assert_eq!(options_menu, Screen::OptionsMenu(OptionsMenuItem::Width));
        assert_ne!(main_menu, in_game);
        assert_ne!(options_menu, Screen::OptionsMenu(OptionsMenuItem::Back));
    }

    #[test]
    fn test_menu_type_repr() {
        assert_eq!(MenuType::MainMenu(3).repr(), "Main Menu");
        assert_eq!(MenuType::OptionsMenu(3).repr(), "Options Menu");
    }

    #[test]
    fn test_menu_type_hint() {
        assert!(MenuType::MainMenu(3).hint().contains("select"));
        assert!(MenuType::OptionsMenu(3).hint().contains("(h) less"));
    }

    #[test]
    fn test_menu_type_value() {
        assert_eq!(MenuType::MainMenu(3).value(), 3);
        assert_eq!(MenuType::OptionsMenu(5).value(), 5);
    }

    #[test]
    fn test_debug_implementations() {
        assert_eq!(format!("{:?}", Screen::InGame), "InGame");
        assert_eq!(format!("{:?}", MainMenuItem::Generate), "Generate");
        assert_eq!(format!("{:?}", OptionsMenuItem::Height), "Height");
    }
}
