//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout.

pub mod account;
pub mod browser;
pub mod detail;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};

use crate::app::{App, AppState, InputMode, Tab};
use crate::models::CatalogType;

/// Main render function - dispatches to view-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    if app.state == AppState::Login {
        account::render_login(frame, area, &app.login);
    } else {
        // Main layout: header, content, status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        render_header(frame, chunks[0], app);
        render_content(frame, chunks[1], app);
        render_status_bar(frame, chunks[2], app);
    }

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

/// Rect of `width` x `height` centered in `area`, clamped to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Logo plus the tab strip
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(Span::styled("CinemApp", Theme::title())))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border()),
        );
    frame.render_widget(logo, header_chunks[0]);

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
        .select(app.tab.index())
        .style(Theme::dimmed())
        .highlight_style(Theme::tab_active())
        .divider(Span::styled("│", Theme::dimmed()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border()),
        );
    frame.render_widget(tabs, header_chunks[1]);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    match app.state {
        AppState::Detail => {
            let favorite = app
                .detail
                .as_ref()
                .is_some_and(|d| app.is_favorite(d.id));
            detail::render(frame, area, app.detail.as_ref(), favorite, &app.image_base_url);
        }
        AppState::Browse | AppState::Login => match app.tab {
            Tab::Movies => {
                browser::render_feed(frame, area, app.feed_screen(CatalogType::Movie), editing)
            }
            Tab::TvShows => {
                browser::render_feed(frame, area, app.feed_screen(CatalogType::Tv), editing)
            }
            Tab::MyList => browser::render_my_list(
                frame,
                area,
                &app.my_list_items(),
                &app.my_list,
                &app.my_list_search,
                editing,
            ),
            Tab::Profile => account::render_profile(
                frame,
                area,
                &app.profile,
                app.user.as_deref(),
                app.favorites().len(),
            ),
        },
    }
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::TEXT).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " SEARCH ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let user = Span::styled(
        format!(" {} ", app.user.as_deref().unwrap_or("guest")),
        Theme::dimmed(),
    );

    let help = match (app.state, app.tab, &app.input_mode) {
        (_, _, InputMode::Editing) => " type to filter  ↵/ESC:done ",
        (AppState::Detail, _, _) => " f:my list  r:reload  ESC:back  q:quit ",
        (_, Tab::MyList, _) => " ↵:open  d:remove  /:search  ←→:tabs  q:quit ",
        (_, Tab::Profile, _) => " o:log out  ←→:tabs  q:quit ",
        _ => " ↵:open  /:search  n:more  r:refresh  ←→:tabs  q:quit ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        user,
        Span::raw("│"),
        Span::styled(help, Theme::dimmed()),
    ]);

    frame.render_widget(Paragraph::new(status_line).style(Theme::status_bar()), area);
}

/// Render error popup overlay
fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_area = centered(area, 60.min(area.width.saturating_sub(4)), 5);
    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error.to_string(), Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}
