//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear, Paragraph, Wrap,
    },
    Frame,
};

use crate::{
    grid::Cell,
    pathfinding,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Colour of the cells the search explored but did not keep.
const EXPLORED_COLOR: Color = Color::DarkGray;

/// Colour of the start and end markers.
const ENDPOINT_COLOR: Color = Color::Yellow;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(app, frame, *item),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom(menu.hint())
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders a list of menu entries, highlighting the one at `selected`.
fn render_entries(frame: &mut Frame, areas: &[Rect], entries: Vec<String>, selected: usize) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (idx, (entry, area)) in entries.into_iter().zip(areas).enumerate() {
        let style = if idx == selected {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(entry).centered().style(style), *area);
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Generate", "Options", and "Quit". It
/// highlights the currently selected option and provides visual feedback for user navigation.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));
    let selected = match item {
        MainMenuItem::Generate => 0,
        MainMenuItem::Options => 1,
        MainMenuItem::Quit => 2,
    };

    render_entries(
        frame,
        &inner_layout,
        vec!["Generate".to_owned(), "Options".to_owned(), "Quit".to_owned()],
        selected,
    );
}

/// Renders the options menu screen with the current maze dimensions.
///
/// This function displays the width and height that the next generated maze will use, plus a
/// "Return" entry, with the same highlighting as the main menu.
pub(crate) fn options_menu(app: &App, frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(3));
    let selected = match item {
        OptionsMenuItem::Width => 0,
        OptionsMenuItem::Height => 1,
        OptionsMenuItem::Back => 2,
    };

    render_entries(
        frame,
        &inner_layout,
        vec![
            format!("Width: {}", app.config.width()),
            format!("Height: {}", app.config.height()),
            "Return".to_owned(),
        ],
        selected,
    );
}

/// Canvas bounds centred on the origin and matching the size of `space` in terminal cells.
fn canvas_bounds(space: Rect) -> ([f64; 2], [f64; 2]) {
    let half_width = rounded_div::i32(space.width.into(), 2);
    let half_height = rounded_div::i32(space.height.into(), 2);

    (
        [(-half_width).into(), half_width.into()],
        [(-half_height).into(), half_height.into()],
    )
}

/// Renders the in-game screen with maze visualization and pathfinding solution.
///
/// This function displays the generated maze and replays the search that solved it: explored
/// cells first, then the solution path. All layers are painted on a single [`Canvas`] for
/// coordinate-based drawing. When generation failed the error is shown instead.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
pub(crate) fn in_game(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    // Create overall layout: maze area + tooltip at bottom
    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(3), // Tooltip block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let Some(maze) = app.maze.as_ref() else {
        let (title, message) = app.status.clone().map_or_else(
            || ("No maze", "Press (r) to generate one.".to_owned()),
            |status| ("Generation failed", status),
        );
        let notice = Paragraph::new(message)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red))
            .block(
                Block::bordered()
                    .title(title)
                    .title_alignment(Alignment::Center)
                    .border_type(BorderType::Rounded),
            );
        let area = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .split(maze_content_area)
            .first()
            .copied()
            .ok_or_eyre("failed to get notice area from layout")?;
        frame.render_widget(notice, area);
        render_tooltip(frame, tooltip_area, None);

        return Ok(());
    };

    // Initialize animation steps if not already done
    if app.animation_manager.steps.is_empty() {
        app.animation_manager.steps =
            pathfinding::record_search_steps(&maze.grid, maze.start, maze.end);
        app.animation_manager.reset();
    }

    // Create maze layout within the content area
    let maze_area = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(maze.grid.height())?),
        Constraint::Min(1),
    ])
    .split(maze_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;

    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(maze.grid.width())?),
        Constraint::Min(1),
    ])
    .split(maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Pre-compute screen coordinates to handle errors before closures
    let wall_coords: Vec<_> = maze
        .grid
        .enumerate_cells()
        .filter_map(|(coord, cell)| (cell == Cell::Wall).then_some(coord))
        .collect();
    let wall_screen_coords =
        pathfinding::transform_maze_to_screen_coords(&wall_coords, &maze.grid)?;
    let explored_screen_coords = pathfinding::transform_maze_to_screen_coords(
        &app.animation_manager.explored,
        &maze.grid,
    )?;
    let path_screen_coords = pathfinding::transform_maze_to_screen_coords(
        &app.animation_manager.current_path,
        &maze.grid,
    )?;
    let endpoint_screen_coords =
        pathfinding::transform_maze_to_screen_coords(&[maze.start, maze.end], &maze.grid)?;

    let (x_bounds, y_bounds) = canvas_bounds(space);
    let canvas = Canvas::default()
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_screen_coords,
                color: app.wall_color,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &explored_screen_coords,
                color: EXPLORED_COLOR,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &path_screen_coords,
                color: app.path_color,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &endpoint_screen_coords,
                color: ENDPOINT_COLOR,
            });
        });

    frame.render_widget(canvas, space);

    let summary = format!(
        "{}x{} | {} steps | {} attempt(s)",
        maze.config.width(),
        maze.config.height(),
        maze.steps(),
        maze.attempts
    );
    render_tooltip(frame, tooltip_area, Some(summary));

    Ok(())
}

/// Renders the key hints at the bottom of the in-game screen, with an optional maze summary.
fn render_tooltip(frame: &mut Frame, area: Rect, summary: Option<String>) {
    let mut tooltip_block = Block::bordered()
        .title("(r) regenerate / (h) return to menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    if let Some(summary) = summary {
        tooltip_block = tooltip_block.title_bottom(Line::raw(summary).centered());
    }

    frame.render_widget(tooltip_block, area);
}
