//! Login and profile screens

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{LoadingState, LoginField, LoginForm};
use crate::models::Profile;
use crate::ui::{centered, Theme};

/// Render the login form centered on screen
pub fn render_login(frame: &mut Frame, area: Rect, form: &LoginForm) {
    let popup = centered(area, 52, 13);
    frame.render_widget(Clear, popup);

    let field = |label: &'static str, value: String, focused: bool| {
        let marker = if focused { "▸ " } else { "  " };
        let cursor = if focused { "│" } else { "" };
        Line::from(vec![
            Span::styled(marker, Theme::accent()),
            Span::styled(format!("{:<10}", label), Theme::dimmed()),
            Span::styled(
                format!("{}{}", value, cursor),
                if focused { Theme::input().add_modifier(Modifier::BOLD) } else { Theme::input() },
            ),
        ])
    };

    let status = match &form.status {
        LoadingState::Loading(msg) => Line::from(Span::styled(
            format!("⟳ {}", msg.as_deref().unwrap_or("Signing in...")),
            Theme::loading(),
        )),
        LoadingState::Error(msg) => Line::from(Span::styled(format!("✗ {}", msg), Theme::error())),
        LoadingState::Idle => Line::from(""),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("CinemApp", Theme::title())).alignment(Alignment::Center),
        Line::from(Span::styled("Sign in to continue", Theme::dimmed())).alignment(Alignment::Center),
        Line::from(""),
        field("Email", form.email.clone(), form.field == LoginField::Email),
        field("Password", form.masked_password(), form.field == LoginField::Password),
        Line::from(""),
        status.alignment(Alignment::Center),
        Line::from(""),
        Line::from(vec![
            Span::styled(" TAB ", Theme::keybind()),
            Span::styled("Switch  ", Theme::dimmed()),
            Span::styled(" ↵ ", Theme::keybind()),
            Span::styled("Sign in  ", Theme::dimmed()),
            Span::styled(" ESC ", Theme::keybind()),
            Span::styled("Quit", Theme::dimmed()),
        ])
        .alignment(Alignment::Center),
    ];

    let login = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_focused())
            .title(Span::styled(" LOGIN ", Theme::title()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );
    frame.render_widget(login, popup);
}

/// Render the static profile plus a logout hint
pub fn render_profile(
    frame: &mut Frame,
    area: Rect,
    profile: &Profile,
    user: Option<&str>,
    favorites: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(" Profile ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(profile.name.clone(), Theme::title())),
        Line::from(Span::styled(profile.email.clone(), Theme::text())),
    ];
    if let Some(photo) = profile.photo_url.as_deref() {
        lines.push(Line::from(Span::styled(photo.to_string(), Theme::dimmed())));
    }
    lines.push(Line::from(""));
    if let Some(user) = user {
        lines.push(Line::from(Span::styled(format!("Signed in as {}", user), Theme::dimmed())));
    }
    lines.push(Line::from(Span::styled(
        format!("{} title(s) in My List", favorites),
        Theme::dimmed(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" o ", Theme::keybind()),
        Span::styled("Log out", Theme::dimmed()),
    ]));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
