//! UI rendering tests
//!
//! Renders the whole app into a TestBackend and checks what reached the buffer.

mod common;

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::future::join_all;
use ratatui::{backend::TestBackend, Terminal};
use cinemapp::app::App;
use cinemapp::auth::{Account, LoginService};
use cinemapp::catalog::FavoritesStore;
use cinemapp::models::{CatalogType, Profile};
use cinemapp::ui;
use common::FakeCatalog;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn new_app() -> App {
    let auth = Arc::new(LoginService::local(vec![Account {
        email: "demo@cinemapp.local".to_string(),
        first_name: "Demo".to_string(),
    }]));
    App::new(
        Arc::new(FakeCatalog::new()),
        FavoritesStore::new(),
        auth,
        Profile::default(),
    )
    .with_image_base_url("http://img.test/w500")
}

async fn drain(app: &mut App) {
    loop {
        let tasks = app.take_tasks();
        if tasks.is_empty() {
            break;
        }
        for event in join_all(tasks).await {
            app.on_event(event);
        }
    }
    app.sync_favorites();
}

async fn logged_in() -> App {
    let mut app = new_app();
    for c in "demo@cinemapp.local".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Tab));
    for c in "demo".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));
    drain(&mut app).await;
    app
}

/// Render at the given size and return the buffer as one string per row
fn render(app: &App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let symbols: Vec<&str> = buffer.content.iter().map(|c| c.symbol()).collect();
    symbols
        .chunks(width as usize)
        .map(|row| row.concat())
        .collect()
}

fn contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

#[test]
fn test_login_screen_renders() {
    let mut app = new_app();
    app.handle_key(key(KeyCode::Tab));
    for c in "secret".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    let rows = render(&app, 80, 24);

    assert!(contains(&rows, "LOGIN"));
    assert!(contains(&rows, "Sign in to continue"));
    // Password is masked
    assert!(contains(&rows, "••••••"));
    assert!(!contains(&rows, "secret"));
}

#[tokio::test]
async fn test_browse_renders_tabs_and_items() {
    let app = logged_in().await;
    let rows = render(&app, 100, 30);

    assert!(contains(&rows, "CinemApp"));
    assert!(contains(&rows, "TV Shows"));
    assert!(contains(&rows, "My List"));
    assert!(contains(&rows, "Movies (1/20)"));
    assert!(contains(&rows, "▸ Movie 1 "));
    assert!(contains(&rows, "[MOVIE]"));
    assert!(contains(&rows, "Demo"));
}

#[tokio::test]
async fn test_browse_fits_minimum_terminal() {
    let app = logged_in().await;
    // Must not panic on a small terminal
    let rows = render(&app, 40, 10);
    assert_eq!(rows.len(), 10);
}

#[tokio::test]
async fn test_loading_footer_while_next_page_in_flight() {
    let mut app = logged_in().await;
    app.handle_key(key(KeyCode::Char('n')));
    let rows = render(&app, 100, 30);

    assert!(contains(&rows, "Loading more..."));
}

#[tokio::test]
async fn test_unmounted_tab_shows_loading() {
    let mut app = logged_in().await;
    app.handle_key(key(KeyCode::Right));
    let rows = render(&app, 100, 30);

    assert!(contains(&rows, "Loading TV Shows..."));
}

#[tokio::test]
async fn test_search_no_matches() {
    let mut app = logged_in().await;
    app.handle_key(key(KeyCode::Char('/')));
    for c in "zzz".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    let rows = render(&app, 100, 30);

    assert!(contains(&rows, "No matches for \"zzz\""));
    assert!(contains(&rows, "⌕ zzz│"));
}

#[tokio::test]
async fn test_detail_screen_renders_record() {
    let mut app = logged_in().await;
    app.handle_key(key(KeyCode::Enter));
    drain(&mut app).await;
    let rows = render(&app, 100, 30);

    assert!(contains(&rows, "Movie 1"));
    assert!(contains(&rows, "Overview of Movie 1"));
    assert!(contains(&rows, "Lead Actor"));
    assert!(contains(&rows, "Poster: http://img.test/w500/poster1.jpg"));
    assert!(contains(&rows, "to add to My List"));

    app.handle_key(key(KeyCode::Char('f')));
    let rows = render(&app, 100, 30);
    assert!(contains(&rows, "In My List"));
}

#[tokio::test]
async fn test_empty_my_list_message() {
    let mut app = logged_in().await;
    app.handle_key(key(KeyCode::Char('3')));
    let rows = render(&app, 100, 30);

    assert!(contains(&rows, "Your list is empty"));
}

#[tokio::test]
async fn test_my_list_shows_favorites() {
    let mut app = logged_in().await;
    app.favorites()
        .add(common::record(CatalogType::Tv, 1396, "Breaking Bad"));
    app.sync_favorites();
    app.handle_key(key(KeyCode::Char('3')));
    let rows = render(&app, 100, 30);

    assert!(contains(&rows, "My List (1/1)"));
    assert!(contains(&rows, "Breaking Bad"));
    assert!(contains(&rows, "[TV]"));
}

#[tokio::test]
async fn test_profile_screen() {
    let mut app = logged_in().await;
    app.handle_key(key(KeyCode::Char('4')));
    let rows = render(&app, 100, 30);

    assert!(contains(&rows, "Demo User"));
    assert!(contains(&rows, "demo@cinemapp.local"));
    assert!(contains(&rows, "Log out"));
}
