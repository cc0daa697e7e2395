//! App state and core application logic
//!
//! Manages the screen state machine (login, tabbed browser, detail), routes
//! key presses, and turns user intents into async tasks. Tasks are spawned
//! by the event loop and come back as [`AppEvent`]s through [`App::on_event`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::api::CatalogClient;
use crate::auth::{LoginError, LoginService, LoginSuccess};
use crate::catalog::{
    search, CatalogFeed, DetailResolver, FavoriteSet, FavoritesStore, LoadOutcome, PageResponse,
    SearchOverlay,
};
use crate::error::CatalogError;
use crate::models::{CatalogItem, CatalogType, DetailRecord, Profile, DEFAULT_IMAGE_BASE_URL};

/// Rows from the end of a feed at which the next page is requested
pub const LOAD_MORE_THRESHOLD: usize = 5;

/// Work handed to the event loop for spawning
pub type Task = Pin<Box<dyn Future<Output = AppEvent> + Send + 'static>>;

/// Completed async work, routed back into the app
#[derive(Debug)]
pub enum AppEvent {
    Page {
        kind: CatalogType,
        response: PageResponse<CatalogItem>,
    },
    Detail {
        kind: CatalogType,
        id: u64,
        result: Result<DetailRecord, CatalogError>,
    },
    Login(Result<LoginSuccess, LoginError>),
}

// =============================================================================
// App State Enum
// =============================================================================

/// Application state enum representing current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Email/password form
    #[default]
    Login,
    /// Tabbed browser (movies, shows, my list, profile)
    Browse,
    /// Detail view for a movie or TV show
    Detail,
}

/// Tabs of the browse screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Movies,
    TvShows,
    MyList,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Movies, Tab::TvShows, Tab::MyList, Tab::Profile];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Movies => "Movies",
            Tab::TvShows => "TV Shows",
            Tab::MyList => "My List",
            Tab::Profile => "Profile",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Movies => 0,
            Tab::TvShows => 1,
            Tab::MyList => 2,
            Tab::Profile => 3,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Catalog shown by this tab, if it is a feed tab
    pub fn catalog(&self) -> Option<CatalogType> {
        match self {
            Tab::Movies => Some(CatalogType::Movie),
            Tab::TvShows => Some(CatalogType::Tv),
            Tab::MyList | Tab::Profile => None,
        }
    }
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
    /// Error with message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Move selection up
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up by a page
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    /// Move selection down by a page
    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Reset selection
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// First row to draw so the selection stays inside `height` rows
    pub fn window_start(&self, height: usize) -> usize {
        if height == 0 || self.selected < height {
            0
        } else {
            self.selected + 1 - height
        }
    }
}

// =============================================================================
// View-Specific State
// =============================================================================

/// Which login field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Login form state
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub field: LoginField,
    pub status: LoadingState,
}

impl LoginForm {
    /// Insert character into the focused field
    pub fn input(&mut self, c: char) {
        match self.field {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    /// Delete last character of the focused field
    pub fn backspace(&mut self) {
        match self.field {
            LoginField::Email => self.email.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    pub fn switch_field(&mut self) {
        self.field = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One mounted catalog feed plus its search overlay and selection
pub struct FeedScreen {
    pub feed: CatalogFeed,
    pub search: SearchOverlay,
    pub list: ListState,
    pub status: LoadingState,
    mounted: bool,
}

impl FeedScreen {
    pub fn new(client: Arc<dyn CatalogClient>, kind: CatalogType) -> Self {
        Self {
            feed: CatalogFeed::catalog(client, kind),
            search: SearchOverlay::new(),
            list: ListState::default(),
            status: LoadingState::Idle,
            mounted: false,
        }
    }

    pub fn kind(&self) -> CatalogType {
        self.feed.kind()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Display sequence (feed items through the search overlay)
    pub fn visible(&self) -> Cow<'_, [CatalogItem]> {
        self.search.apply(self.feed.items())
    }

    pub fn selected_item(&self) -> Option<CatalogItem> {
        self.visible().get(self.list.selected).cloned()
    }

    /// Selection is close enough to the end to ask for another page
    pub fn near_end(&self) -> bool {
        !self.search.is_active()
            && self.list.len > 0
            && self.list.selected + LOAD_MORE_THRESHOLD >= self.list.len
    }

    fn sync_len(&mut self) {
        let len = self.visible().len();
        self.list.set_len(len);
    }

    /// First visit triggers the initial load
    fn mount(&mut self) -> Option<Task> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        self.load_next()
    }

    fn load_next(&mut self) -> Option<Task> {
        let request = self.feed.begin_load_next()?;
        self.status = LoadingState::Loading(None);
        let kind = self.kind();
        let fetch = self.feed.fetch(request);
        Some(Box::pin(async move {
            AppEvent::Page {
                kind,
                response: fetch.await,
            }
        }))
    }

    fn refresh(&mut self) -> Task {
        let request = self.feed.begin_refresh();
        self.status = LoadingState::Loading(Some("Refreshing...".into()));
        let kind = self.kind();
        let fetch = self.feed.fetch(request);
        Box::pin(async move {
            AppEvent::Page {
                kind,
                response: fetch.await,
            }
        })
    }

    fn on_page(&mut self, response: PageResponse<CatalogItem>) {
        match self.feed.complete(response) {
            Ok(LoadOutcome::Replaced { .. }) => {
                self.status = LoadingState::Idle;
                self.list.reset();
                self.sync_len();
            }
            Ok(LoadOutcome::Appended { .. }) | Ok(LoadOutcome::Skipped) => {
                self.status = LoadingState::Idle;
                self.sync_len();
            }
            Ok(LoadOutcome::Discarded) => {}
            Err(e) => {
                self.status = LoadingState::Error(format!(
                    "Failed to load {}: {}",
                    self.kind().plural(),
                    e
                ));
            }
        }
    }

    fn search_changed(&mut self) {
        self.list.reset();
        self.sync_len();
    }
}

/// Detail screen state
#[derive(Debug, Clone)]
pub struct DetailScreen {
    pub kind: CatalogType,
    pub id: u64,
    pub record: Option<DetailRecord>,
    pub status: LoadingState,
    /// Vertical scroll offset of the body
    pub scroll: u16,
}

impl DetailScreen {
    fn loading(kind: CatalogType, id: u64) -> Self {
        Self {
            kind,
            id,
            record: None,
            status: LoadingState::Loading(Some("Loading details...".into())),
            scroll: 0,
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
pub struct App {
    /// Current state/screen
    pub state: AppState,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Selected browse tab
    pub tab: Tab,
    /// Global error message
    pub error: Option<String>,
    /// Signed-in user's first name
    pub user: Option<String>,

    // View-specific states
    pub login: LoginForm,
    pub movies: FeedScreen,
    pub tv: FeedScreen,
    pub my_list: ListState,
    pub my_list_search: SearchOverlay,
    pub detail: Option<DetailScreen>,

    // Injected configuration
    pub profile: Profile,
    pub image_base_url: String,

    resolver: DetailResolver,
    favorites: FavoritesStore,
    favorites_rx: watch::Receiver<FavoriteSet>,
    auth: Arc<LoginService>,
    tasks: Vec<Task>,
}

impl App {
    /// Create a new App instance
    pub fn new(
        client: Arc<dyn CatalogClient>,
        favorites: FavoritesStore,
        auth: Arc<LoginService>,
        profile: Profile,
    ) -> Self {
        Self {
            state: AppState::Login,
            running: true,
            input_mode: InputMode::Normal,
            tab: Tab::Movies,
            error: None,
            user: None,

            login: LoginForm::default(),
            movies: FeedScreen::new(Arc::clone(&client), CatalogType::Movie),
            tv: FeedScreen::new(Arc::clone(&client), CatalogType::Tv),
            my_list: ListState::default(),
            my_list_search: SearchOverlay::new(),
            detail: None,

            profile,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),

            resolver: DetailResolver::new(client, favorites.clone()),
            favorites_rx: favorites.subscribe(),
            favorites,
            auth,
            tasks: Vec::new(),
        }
    }

    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    /// Drain tasks queued since the last call
    pub fn take_tasks(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn feed_screen(&self, kind: CatalogType) -> &FeedScreen {
        match kind {
            CatalogType::Movie => &self.movies,
            CatalogType::Tv => &self.tv,
        }
    }

    pub fn feed_screen_mut(&mut self, kind: CatalogType) -> &mut FeedScreen {
        match kind {
            CatalogType::Movie => &mut self.movies,
            CatalogType::Tv => &mut self.tv,
        }
    }

    /// My List entries through its search overlay
    pub fn my_list_items(&self) -> Vec<DetailRecord> {
        let all = self.favorites.list();
        search::apply(&all, self.my_list_search.query()).into_owned()
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.resolver.is_favorite(id)
    }

    /// Pick up favorites changes made anywhere. Returns true if the list changed.
    pub fn sync_favorites(&mut self) -> bool {
        if !self.favorites_rx.has_changed().unwrap_or(false) {
            return false;
        }
        self.favorites_rx.borrow_and_update();
        let len = self.my_list_items().len();
        self.my_list.set_len(len);
        true
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Switch tab, mounting its feed on first visit
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.input_mode = InputMode::Normal;
        if let Some(kind) = tab.catalog() {
            if let Some(task) = self.feed_screen_mut(kind).mount() {
                self.tasks.push(task);
            }
        }
    }

    /// Open the detail screen and start resolving `id`
    pub fn open_detail(&mut self, kind: CatalogType, id: Option<u64>) {
        let screen_id = id.unwrap_or(0);
        self.detail = Some(DetailScreen::loading(kind, screen_id));
        self.state = AppState::Detail;
        self.input_mode = InputMode::Normal;

        let resolver = self.resolver.clone();
        self.tasks.push(Box::pin(async move {
            AppEvent::Detail {
                kind,
                id: screen_id,
                result: resolver.resolve(kind, id).await,
            }
        }));
    }

    /// Leave the detail screen. A load still in flight is ignored on arrival.
    pub fn close_detail(&mut self) {
        self.detail = None;
        self.state = AppState::Browse;
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.login.clear();
        self.detail = None;
        self.input_mode = InputMode::Normal;
        self.state = AppState::Login;
    }

    // -------------------------------------------------------------------------
    // Async results
    // -------------------------------------------------------------------------

    pub fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Page { kind, response } => {
                self.feed_screen_mut(kind).on_page(response);
            }
            AppEvent::Detail { kind, id, result } => match self.detail.as_mut() {
                Some(screen) if screen.kind == kind && screen.id == id && screen.status.is_loading() => {
                    match result {
                        Ok(record) => {
                            screen.record = Some(record);
                            screen.status = LoadingState::Idle;
                        }
                        Err(e) => {
                            screen.status = LoadingState::Error(format!("Failed to load details: {}", e));
                        }
                    }
                }
                _ => debug!(%kind, id, "dropping detail for a closed screen"),
            },
            AppEvent::Login(result) => {
                if self.state != AppState::Login {
                    debug!("dropping login result outside the login screen");
                    return;
                }
                match result {
                    Ok(success) => {
                        self.user = Some(success.first_name);
                        self.login.clear();
                        self.state = AppState::Browse;
                        self.select_tab(Tab::Movies);
                    }
                    Err(e) => {
                        self.login.status = LoadingState::Error(e.to_string());
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        match self.state {
            AppState::Login => self.handle_login_key(key),
            AppState::Browse if self.input_mode == InputMode::Editing => {
                self.handle_editing_key(key)
            }
            AppState::Browse => self.handle_browse_key(key),
            AppState::Detail => self.handle_detail_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.quit();
                true
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.switch_field();
                true
            }
            KeyCode::Enter => {
                self.submit_login();
                true
            }
            KeyCode::Char(c) => {
                self.login.input(c);
                true
            }
            KeyCode::Backspace => {
                self.login.backspace();
                true
            }
            _ => false,
        }
    }

    fn submit_login(&mut self) {
        if self.login.status.is_loading() {
            return;
        }
        if self.login.email.trim().is_empty() || self.login.password.is_empty() {
            self.login.status = LoadingState::Error("Enter your email and password".into());
            return;
        }

        self.login.status = LoadingState::Loading(Some("Signing in...".into()));
        let auth = Arc::clone(&self.auth);
        let email = self.login.email.clone();
        let password = self.login.password.clone();
        self.tasks.push(Box::pin(async move {
            AppEvent::Login(auth.login(&email, &password).await)
        }));
    }

    /// Keys while a search box is focused
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Char(c) => {
                self.edit_search(|overlay| overlay.push(c));
                true
            }
            KeyCode::Backspace => {
                self.edit_search(|overlay| overlay.pop());
                true
            }
            _ => false,
        }
    }

    fn edit_search(&mut self, edit: impl FnOnce(&mut SearchOverlay)) {
        match self.tab.catalog() {
            Some(kind) => {
                let screen = self.feed_screen_mut(kind);
                edit(&mut screen.search);
                screen.search_changed();
            }
            None if self.tab == Tab::MyList => {
                edit(&mut self.my_list_search);
                self.my_list.reset();
                let len = self.my_list_items().len();
                self.my_list.set_len(len);
            }
            None => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Tab | KeyCode::Right => {
                self.select_tab(self.tab.next());
                return true;
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.select_tab(self.tab.prev());
                return true;
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                self.select_tab(Tab::ALL[idx]);
                return true;
            }
            _ => {}
        }

        match self.tab {
            Tab::Movies => self.handle_feed_key(CatalogType::Movie, key),
            Tab::TvShows => self.handle_feed_key(CatalogType::Tv, key),
            Tab::MyList => self.handle_my_list_key(key),
            Tab::Profile => self.handle_profile_key(key),
        }
    }

    fn handle_feed_key(&mut self, kind: CatalogType, key: KeyEvent) -> bool {
        let screen = self.feed_screen_mut(kind);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => screen.list.up(),
            KeyCode::Down | KeyCode::Char('j') => screen.list.down(),
            KeyCode::PageUp => screen.list.page_up(10),
            KeyCode::PageDown => screen.list.page_down(10),
            KeyCode::Home | KeyCode::Char('g') => screen.list.first(),
            KeyCode::End | KeyCode::Char('G') => screen.list.last(),
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Editing;
                return true;
            }
            KeyCode::Esc => {
                if screen.search.is_active() {
                    screen.search.clear();
                    screen.search_changed();
                }
                return true;
            }
            KeyCode::Char('r') => {
                let task = screen.refresh();
                self.tasks.push(task);
                return true;
            }
            KeyCode::Char('n') => {
                if let Some(task) = screen.load_next() {
                    self.tasks.push(task);
                }
                return true;
            }
            KeyCode::Enter => {
                if let Some(item) = screen.selected_item() {
                    self.open_detail(item.kind, Some(item.id));
                }
                return true;
            }
            _ => return false,
        }

        // Movement keys: page in more rows when the selection nears the end
        if screen.near_end() {
            if let Some(task) = screen.load_next() {
                self.tasks.push(task);
            }
        }
        true
    }

    fn handle_my_list_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.my_list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.my_list.down(),
            KeyCode::Home | KeyCode::Char('g') => self.my_list.first(),
            KeyCode::End | KeyCode::Char('G') => self.my_list.last(),
            KeyCode::Char('/') => self.input_mode = InputMode::Editing,
            KeyCode::Esc => {
                self.my_list_search.clear();
                let len = self.my_list_items().len();
                self.my_list.set_len(len);
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(record) = self.my_list_items().get(self.my_list.selected) {
                    self.favorites.remove(record.id());
                }
                self.sync_favorites();
            }
            KeyCode::Enter => {
                if let Some(record) = self.my_list_items().get(self.my_list.selected) {
                    let (kind, id) = (record.item.kind, record.id());
                    self.open_detail(kind, Some(id));
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_profile_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('o') => {
                self.logout();
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.close_detail();
                true
            }
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Char('f') => {
                match self.detail.as_ref().and_then(|d| d.record.clone()) {
                    Some(record) => {
                        self.resolver.toggle_favorite(&record);
                    }
                    None => self.set_error("Details are not loaded yet"),
                }
                self.sync_favorites();
                true
            }
            KeyCode::Char('r') => {
                if let Some((kind, id)) = self.detail.as_ref().map(|d| (d.kind, d.id)) {
                    self.open_detail(kind, Some(id));
                }
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.scroll = detail.scroll.saturating_sub(1);
                }
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.scroll = detail.scroll.saturating_add(1);
                }
                true
            }
            _ => false,
        }
    }
}
