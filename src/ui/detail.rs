//! Detail view for movies and TV shows
//!
//! Title, rating, genres, overview and up to five cast members, with the
//! My List state and the image URLs the posters would load from.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{DetailScreen, LoadingState};
use crate::models::{image_url, DetailRecord};
use crate::ui::Theme;

/// Render the detail screen
pub fn render(
    frame: &mut Frame,
    area: Rect,
    screen: Option<&DetailScreen>,
    is_favorite: bool,
    image_base: &str,
) {
    let title = screen
        .and_then(|s| s.record.as_ref())
        .map(|r| r.title().to_string())
        .unwrap_or_else(|| "DETAIL".to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(format!(" {} ", title), Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(screen) = screen else {
        return;
    };

    let body = match (&screen.status, &screen.record) {
        (LoadingState::Loading(msg), _) => {
            let msg = msg.as_deref().unwrap_or("Loading...");
            Paragraph::new(Line::from(Span::styled(format!("⟳ {}", msg), Theme::loading())))
                .alignment(Alignment::Center)
        }
        (LoadingState::Error(msg), _) => Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(format!("✗ {}", msg), Theme::error())),
            Line::from(""),
            Line::from(vec![
                Span::styled(" r ", Theme::keybind()),
                Span::styled("Retry  ", Theme::dimmed()),
                Span::styled(" ESC ", Theme::keybind()),
                Span::styled("Go back", Theme::dimmed()),
            ]),
        ])
        .alignment(Alignment::Center),
        (LoadingState::Idle, Some(record)) => Paragraph::new(detail_lines(record, is_favorite, image_base))
            .wrap(Wrap { trim: true })
            .scroll((screen.scroll, 0)),
        (LoadingState::Idle, None) => Paragraph::new("No details").style(Theme::dimmed()),
    };

    frame.render_widget(body, inner);
}

/// Body lines for a resolved record
pub fn detail_lines(record: &DetailRecord, is_favorite: bool, image_base: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let year = record.item.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    lines.push(Line::from(vec![
        Span::styled(record.title().to_string(), Theme::title()),
        Span::styled(year, Theme::year()),
        Span::raw("  "),
        Span::styled(format!("[{}]", record.item.kind), Theme::badge()),
    ]));

    lines.push(if is_favorite {
        Line::from(Span::styled("♥ In My List", Theme::title()))
    } else {
        Line::from(vec![
            Span::styled("♡ ", Theme::dimmed()),
            Span::styled("f", Theme::keybind()),
            Span::styled(" to add to My List", Theme::dimmed()),
        ])
    });
    lines.push(Line::from(""));

    let rating = match record.rating() {
        Some(score) => Span::styled(
            format!("★ {:.1} / 10 ({} votes)", score, record.vote_count),
            Theme::rating(score),
        ),
        None => Span::styled("★ N/A", Theme::dimmed()),
    };
    lines.push(Line::from(vec![Span::styled("Rating: ", Theme::dimmed()), rating]));
    lines.push(Line::from(vec![
        Span::styled("Genre:  ", Theme::dimmed()),
        Span::styled(record.genre_line(), Theme::text()),
    ]));
    lines.push(Line::from(""));

    if record.overview.is_empty() {
        lines.push(Line::from(Span::styled("No overview available.", Theme::dimmed())));
    } else {
        lines.push(Line::from(Span::styled(record.overview.clone(), Theme::text())));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Actors", Theme::accent())));
    if record.cast.is_empty() {
        lines.push(Line::from(Span::styled(
            "No actors information available.",
            Theme::dimmed(),
        )));
    }
    for actor in &record.cast {
        let mut spans = vec![Span::styled(format!("  {}", actor.name), Theme::text())];
        if let Some(path) = actor.profile_path.as_deref() {
            spans.push(Span::styled(format!("  {}", image_url(image_base, path)), Theme::dimmed()));
        }
        lines.push(Line::from(spans));
    }

    if let Some(path) = record.item.poster_path.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Poster: ", Theme::dimmed()),
            Span::styled(image_url(image_base, path), Theme::dimmed()),
        ]));
    }

    lines
}
