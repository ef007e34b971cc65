//! Core application state and logic for the maze viewer.

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng as _};
use ratatui::{style::Color, DefaultTerminal};
use tracing::warn;

use crate::{
    config::{Args, MazeConfig},
    errors::MazeError,
    events,
    pathfinding::AnimationManager,
    types::{MainMenuItem, Screen},
    ui,
    validator::{self, ValidMaze},
};

/// Largest width or height the options menu lets the user pick.
pub(crate) const MAX_VIEW_DIMENSION: usize = 200;

/// Application state container for the maze viewer.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the interface and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Settings used for the next generated maze.
    pub(crate) config: MazeConfig,
    /// Random number generator shared by every generation request.
    ///
    /// When a seed is given the sequence of mazes produced by repeated regeneration is
    /// reproducible.
    pub(crate) rng: StdRng,
    /// Colour of the maze walls.
    pub(crate) wall_color: Color,
    /// Colour of the solution path.
    pub(crate) path_color: Color,
    /// Maze currently on display.
    ///
    /// This is [`None`] before the first generation and after a failed one.
    pub(crate) maze: Option<ValidMaze>,
    /// Message shown in place of the maze when generation failed.
    pub(crate) status: Option<String>,
    /// Animation manager for pathfinding visualization.
    ///
    /// This field manages the animation state including timing, current step tracking, and the
    /// cells displayed during the animated maze solving.
    pub(crate) animation_manager: AnimationManager,
}

impl Default for App {
    fn default() -> Self {
        Self::new(
            MazeConfig::default(),
            None,
            Color::from_u32(0x00fe_e9fe),
            Color::from_u32(0x00a5_35f9),
        )
    }
}

impl App {
    /// Creates a new instance of the App structure.
    ///
    /// Without a seed the random number generator is seeded from the operating system.
    pub fn new(
        config: MazeConfig,
        seed: Option<u64>,
        wall_color: Color,
        path_color: Color,
    ) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::Generate),
            config,
            rng,
            wall_color,
            path_color,
            maze: None,
            status: None,
            animation_manager: AnimationManager::new(),
        }
    }

    /// Creates an application configured from the command line.
    ///
    /// # Errors
    ///
    /// Returns the [`MazeError`] raised while validating the generation settings.
    pub fn from_args(args: &Args) -> Result<Self, MazeError> {
        Ok(Self::new(
            args.maze_config()?,
            args.seed,
            args.wall_color,
            args.path_color,
        ))
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Replaces the displayed maze with a freshly generated one.
    ///
    /// A failed generation clears the maze and leaves a message for the in-game screen instead of
    /// aborting the application.
    pub(crate) fn regenerate(&mut self) {
        self.animation_manager.clear();

        match validator::generate_valid_maze(self.config, &mut self.rng) {
            Ok(maze) => {
                self.maze = Some(maze);
                self.status = None;
            }
            Err(err) => {
                warn!(%err, "maze generation failed");
                self.maze = None;
                self.status = Some(err.to_string());
            }
        }
    }

    /// Changes the maze dimensions by the given signed amounts.
    ///
    /// Values are kept between the smallest valid size and [`MAX_VIEW_DIMENSION`]. The displayed
    /// maze is left alone until the next generation.
    pub(crate) fn resize(&mut self, dw: isize, dh: isize) {
        let width = self
            .config
            .width()
            .saturating_add_signed(dw)
            .min(MAX_VIEW_DIMENSION);
        let height = self
            .config
            .height()
            .saturating_add_signed(dh)
            .min(MAX_VIEW_DIMENSION);

        if let Ok(config) = self.config.with_dimensions(width, height) {
            self.config = config;
        }
    }
}
