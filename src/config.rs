//! Generation settings and command line arguments.
//!
//! [`MazeConfig`] is the immutable value every generation call receives. [`Args`] is the clap
//! front end that produces one, together with the cosmetic settings only the viewer cares about.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ratatui::style::Color;

use crate::{errors::MazeError, grid};

/// Width used when none is given.
pub const DEFAULT_WIDTH: usize = 50;

/// Height used when none is given.
pub const DEFAULT_HEIGHT: usize = 50;

/// Number of mazes the retry loop may generate before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Treatment of the end cell once carving has finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EndPolicy {
    /// Open the end cell and, if it touches no corridor, open one bridging cell next to it.
    #[default]
    Connect,
    /// Open the end cell and nothing else, even if that leaves it cut off.
    Force,
}

/// Immutable settings for one generation request.
///
/// This structure replaces any process-wide state: the generator, the path finder and the retry
/// loop only ever see the dimensions through the config they are handed.
///
/// A config is checked once on construction and then copied into every call, so an accepted maze
/// always carries the exact settings it was produced with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Upper bound on regeneration attempts.
    max_attempts: usize,
    /// Handling of the end cell after carving.
    end_policy: EndPolicy,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            end_policy: EndPolicy::default(),
        }
    }
}

impl MazeConfig {
    /// Builds a config for the given dimensions with default attempt budget and end policy.
    ///
    /// This function is the only way to obtain a config with custom dimensions, so every config in
    /// circulation already satisfies the bounds the generator and the threshold arithmetic rely on.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if either dimension is below
    /// [`MIN_DIMENSION`](grid::MIN_DIMENSION) or above [`MAX_DIMENSION`](grid::MAX_DIMENSION).
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        grid::check_dimensions(width, height)?;

        Ok(Self {
            width,
            height,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            end_policy: EndPolicy::Connect,
        })
    }

    /// Replaces the attempt budget.
    ///
    /// This function bounds how many mazes the retry loop generates before reporting
    /// [`MazeError::ValidationExhausted`].
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::ZeroAttempts`] if `max_attempts` is zero.
    pub fn with_max_attempts(self, max_attempts: usize) -> Result<Self, MazeError> {
        if max_attempts == 0 {
            return Err(MazeError::ZeroAttempts);
        }

        Ok(Self {
            max_attempts,
            ..self
        })
    }

    /// Replaces the dimensions while keeping the other settings.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] under the same bounds as [`MazeConfig::new`].
    pub fn with_dimensions(self, width: usize, height: usize) -> Result<Self, MazeError> {
        Ok(Self::new(width, height)?
            .with_max_attempts(self.max_attempts)?
            .with_end_policy(self.end_policy))
    }

    /// Replaces the end cell policy.
    #[must_use]
    pub const fn with_end_policy(self, end_policy: EndPolicy) -> Self {
        Self { end_policy, ..self }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Upper bound on regeneration attempts.
    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Handling of the end cell after carving.
    #[must_use]
    pub const fn end_policy(&self) -> EndPolicy {
        self.end_policy
    }

    /// Shortest acceptable solution length, counted in cells.
    ///
    /// This function applies [`min_movements`] to the configured dimensions. A maze whose solution
    /// has fewer cells than this is rejected and regenerated.
    #[must_use]
    pub const fn min_movements(&self) -> usize {
        min_movements(self.width, self.height)
    }
}

/// Shortest acceptable solution length for a maze of the given size: `floor((width + height) / 2)`.
#[must_use]
pub const fn min_movements(width: usize, height: usize) -> usize {
    (width + height) / 2
}

/// Parses a `#rrggbb` or `0xrrggbb` colour.
///
/// # Errors
///
/// Returns [`MazeError::InvalidColor`] if the input is not six hexadecimal digits after the prefix.
pub fn parse_color(input: &str) -> Result<Color, MazeError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .unwrap_or(trimmed);

    if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(MazeError::InvalidColor(input.to_owned()));
    }

    u32::from_str_radix(digits, 16)
        .map(Color::from_u32)
        .map_err(|_err| MazeError::InvalidColor(input.to_owned()))
}

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Number of columns in the maze.
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,
    /// Number of rows in the maze.
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,
    /// Seed for the random number generator; a fresh one is drawn when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Number of mazes to generate before giving up on finding a long enough solution.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
    /// How to treat the end cell after carving.
    #[arg(long, value_enum, default_value_t = EndPolicy::Connect)]
    pub end_policy: EndPolicy,
    /// Colour of the maze walls.
    #[arg(long, value_parser = parse_color, default_value = "#fee9fe")]
    pub wall_color: Color,
    /// Colour of the solution path.
    #[arg(long, value_parser = parse_color, default_value = "#a535f9")]
    pub path_color: Color,
    /// Print the maze as text instead of starting the terminal interface.
    #[arg(long)]
    pub print: bool,
    /// Write logs to this file; without it the interface discards them.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Builds the generation config described by these arguments.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] or [`MazeError::ZeroAttempts`] for out of range
    /// values.
    pub fn maze_config(&self) -> Result<MazeConfig, MazeError> {
        Ok(MazeConfig::new(self.width, self.height)?
            .with_max_attempts(self.max_attempts)?
            .with_end_policy(self.end_policy))
    }
}
