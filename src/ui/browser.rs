//! Catalog browser view
//!
//! Draws a feed (or My List) as a selectable list under a search box, with
//! a footer line while another page is loading.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::{FeedScreen, ListState, LoadingState};
use crate::catalog::SearchOverlay;
use crate::models::{CatalogItem, CatalogType, DetailRecord};
use crate::ui::Theme;

/// Trait for items that can be displayed in the browser
pub trait BrowserItem {
    fn title(&self) -> &str;
    fn year(&self) -> Option<u16>;
    fn kind(&self) -> CatalogType;
    fn rating(&self) -> f32;
}

impl BrowserItem for CatalogItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> Option<u16> {
        self.year
    }

    fn kind(&self) -> CatalogType {
        self.kind
    }

    fn rating(&self) -> f32 {
        self.vote_average
    }
}

impl BrowserItem for DetailRecord {
    fn title(&self) -> &str {
        &self.item.title
    }

    fn year(&self) -> Option<u16> {
        self.item.year
    }

    fn kind(&self) -> CatalogType {
        self.item.kind
    }

    fn rating(&self) -> f32 {
        self.item.vote_average
    }
}

/// Render a popular feed tab
pub fn render_feed(frame: &mut Frame, area: Rect, screen: &FeedScreen, editing: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    render_search_box(frame, chunks[0], &screen.search, editing);

    let title = screen.kind().plural();
    let items = screen.visible();

    if items.is_empty() {
        let message = match &screen.status {
            LoadingState::Loading(_) => format!("⟳ Loading {}...", title),
            LoadingState::Error(msg) => msg.clone(),
            LoadingState::Idle if screen.search.is_active() => {
                format!("No matches for \"{}\"", screen.search.query().trim())
            }
            LoadingState::Idle => "No data".to_string(),
        };
        let style = if screen.status.is_error() {
            Theme::error()
        } else if screen.status.is_loading() {
            Theme::loading()
        } else {
            Theme::dimmed()
        };
        render_empty(frame, chunks[1], title, message, style);
        return;
    }

    let footer = match &screen.status {
        LoadingState::Loading(msg) => Some(Line::from(Span::styled(
            format!("⟳ {}", msg.as_deref().unwrap_or("Loading more...")),
            Theme::loading(),
        ))),
        LoadingState::Error(msg) => Some(Line::from(Span::styled(
            format!("✗ {}  (n to retry)", msg),
            Theme::error(),
        ))),
        LoadingState::Idle => None,
    };

    render_list(frame, chunks[1], title, &*items, &screen.list, footer);
}

/// Render the My List tab
pub fn render_my_list(
    frame: &mut Frame,
    area: Rect,
    items: &[DetailRecord],
    list: &ListState,
    search: &SearchOverlay,
    editing: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    render_search_box(frame, chunks[0], search, editing);

    if items.is_empty() {
        let message = if search.is_active() {
            format!("No matches for \"{}\"", search.query().trim())
        } else {
            "Your list is empty. Press f on a title to add it.".to_string()
        };
        render_empty(frame, chunks[1], "My List", message, Theme::dimmed());
        return;
    }

    render_list(frame, chunks[1], "My List", items, list, None);
}

/// Search box shared by the list tabs
fn render_search_box(frame: &mut Frame, area: Rect, search: &SearchOverlay, editing: bool) {
    let text = if editing {
        format!("⌕ {}│", search.query())
    } else if search.query().is_empty() {
        "⌕ Type / to search...".to_string()
    } else {
        format!("⌕ {}", search.query())
    };

    let border_style = if editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let search_box = Paragraph::new(text).style(Theme::input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(" SEARCH ", Theme::title())),
    );
    frame.render_widget(search_box, area);
}

fn render_list<T: BrowserItem>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[T],
    list: &ListState,
    footer: Option<Line<'static>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(
            format!(" {} ({}/{}) ", title, list.selected + 1, items.len()),
            Theme::title(),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (list_area, footer_area) = match footer {
        Some(_) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(inner);
            (chunks[0], Some(chunks[1]))
        }
        None => (inner, None),
    };

    let height = list_area.height as usize;
    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .skip(list.window_start(height))
        .take(height)
        .map(|(i, item)| render_row(item, i == list.selected))
        .collect();
    frame.render_widget(List::new(rows).style(Theme::text()), list_area);

    if let (Some(line), Some(area)) = (footer, footer_area) {
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

/// Format: ▸ Title (Year) [MOVIE] ★ 8.5
fn render_row<T: BrowserItem>(item: &T, is_selected: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let year = item.year().map(|y| format!(" ({})", y)).unwrap_or_default();
    let badge = match item.kind() {
        CatalogType::Movie => "[MOVIE]",
        CatalogType::Tv => "[TV]",
    };

    let line = Line::from(vec![
        Span::styled(
            marker,
            if is_selected { Theme::accent() } else { Theme::dimmed() },
        ),
        Span::styled(
            item.title().to_string(),
            if is_selected { Theme::highlighted() } else { Theme::text() },
        ),
        Span::styled(year, Theme::year()),
        Span::raw(" "),
        Span::styled(badge, Theme::badge()),
        Span::raw(" "),
        Span::styled(format!("★ {:.1}", item.rating()), Theme::rating(item.rating())),
    ]);

    ListItem::new(line)
}

fn render_empty(frame: &mut Frame, area: Rect, title: &str, message: String, style: Style) {
    let empty = Paragraph::new(message)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border())
                .title(Span::styled(format!(" {} ", title), Theme::title())),
        );
    frame.render_widget(empty, area);
}
