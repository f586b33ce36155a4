//! ChampDex - League of Legends champion browser for the terminal

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use champdex::action::Action;
use champdex::api::{self, FeedConfig};
use champdex::components::{
    theme, ChampionDetail, ChampionDetailProps, ChampionList, ChampionListProps, Component,
    FilterBar, FilterBarProps, Header, HeaderProps,
};
use champdex::counter::{CounterDataSource, ManualCounterDataSource};
use champdex::custom::CustomData;
use champdex::effect::Effect;
use champdex::favorites;
use champdex::reducer::reducer;
use champdex::state::AppState;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Span,
    Frame, Terminal,
};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// ChampDex - browse champions, matchups and favorites
#[derive(Parser, Debug)]
#[command(name = "champdex")]
#[command(about = "Browse League of Legends champions by kana row, lane and nickname")]
struct Args {
    /// Feed locale used for champion names
    #[arg(long, default_value = "ja_JP")]
    lang: String,

    /// Pin a feed version instead of looking up the latest one
    #[arg(long)]
    version: Option<String>,

    /// Curated overlay (nicknames, lanes, damage type) replacing the built-in one
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Curated matchup data replacing the built-in one
    #[arg(long)]
    counters: Option<PathBuf>,

    /// Favorites file
    #[arg(long)]
    favorites: Option<PathBuf>,

    /// Append logs to this file; logging is off otherwise
    #[arg(long, env = "CHAMPDEX_LOG_PATH")]
    log_file: Option<PathBuf>,

    /// Attempts per feed request (1 = no retry)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    retries: u32,

    #[command(flatten)]
    debug: DebugCliArgs,
}

/// Long-lived collaborators the effect handler needs.
struct Services {
    feed: FeedConfig,
    counters: Arc<dyn CounterDataSource>,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ChampComponentId {
    List,
    Search,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ChampContext {
    Main,
    Search,
    Detail,
}

impl EventRoutingState<ChampComponentId, ChampContext> for AppState {
    fn focused(&self) -> Option<ChampComponentId> {
        if self.search.active {
            Some(ChampComponentId::Search)
        } else if self.detail.is_some() {
            Some(ChampComponentId::Detail)
        } else {
            Some(ChampComponentId::List)
        }
    }

    fn modal(&self) -> Option<ChampComponentId> {
        if self.search.active {
            Some(ChampComponentId::Search)
        } else if self.detail.is_some() {
            Some(ChampComponentId::Detail)
        } else {
            None
        }
    }

    fn binding_context(&self, id: ChampComponentId) -> ChampContext {
        match id {
            ChampComponentId::List => ChampContext::Main,
            ChampComponentId::Search => ChampContext::Search,
            ChampComponentId::Detail => ChampContext::Detail,
        }
    }

    fn default_context(&self) -> ChampContext {
        ChampContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        lang,
        version,
        overlay,
        counters,
        favorites: favorites_path,
        log_file,
        retries,
        debug: debug_args,
    } = Args::parse();

    init_logging(log_file.as_deref());

    let custom = Arc::new(match &overlay {
        Some(path) => CustomData::from_path(path).map_err(io::Error::other)?,
        None => CustomData::embedded(),
    });
    let counter_source = match &counters {
        Some(path) => ManualCounterDataSource::from_path(path).map_err(io::Error::other)?,
        None => ManualCounterDataSource::embedded(),
    };
    tracing::info!(
        overlay = custom.len(),
        %lang,
        "starting champdex"
    );
    let services = Services {
        feed: FeedConfig {
            lang,
            attempts: retries,
        },
        counters: Arc::new(counter_source),
    };

    let favorites_path = favorites_path.unwrap_or_else(favorites::default_path);

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let initial_custom = Arc::clone(&custom);
    let initial_favorites = favorites_path.clone();
    let mut state = debug
        .load_state_or_else_async(move || async move {
            let favorites = favorites::load(&initial_favorites).await;
            Ok::<AppState, io::Error>(AppState::new(initial_custom, favorites))
        })
        .await
        .map_err(debug_error)?;
    state.set_overlay(custom);
    state.favorites_path = favorites_path.display().to_string();
    if version.is_some() {
        state.version = version;
    }

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, services).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn init_logging(path: Option<&Path>) {
    // stdout belongs to the UI, so without a file there is no subscriber
    let Some(path) = path else {
        return;
    };
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
        }
        Err(err) => eprintln!("champdex: cannot open log file {}: {err}", path.display()),
    }
}

struct ChampUi {
    header: Header,
    filter_bar: FilterBar,
    list: ChampionList,
    detail: ChampionDetail,
    status_bar: StatusBar,
}

impl ChampUi {
    fn new() -> Self {
        Self {
            header: Header,
            filter_bar: FilterBar,
            list: ChampionList,
            detail: ChampionDetail,
            status_bar: StatusBar::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ChampComponentId>,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Query + filters
            Constraint::Min(1),    // List or detail
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        self.header.render(
            frame,
            chunks[0],
            HeaderProps {
                version: state.version.as_deref(),
                total: state.champions().len(),
                shown: state.results.len(),
                background: state.background_champion(),
            },
        );

        event_ctx.set_component_area(ChampComponentId::Search, chunks[1]);
        self.filter_bar.render(
            frame,
            chunks[1],
            FilterBarProps {
                search: &state.search,
                lanes: &state.lanes,
                favorite_only: state.favorite_only,
                is_focused: render_ctx.is_focused() && state.search.active,
            },
        );

        if state.detail.is_some() {
            event_ctx
                .component_areas
                .remove(&ChampComponentId::List);
            event_ctx.set_component_area(ChampComponentId::Detail, chunks[2]);
            self.detail.render(
                frame,
                chunks[2],
                ChampionDetailProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                },
            );
        } else {
            event_ctx
                .component_areas
                .remove(&ChampComponentId::Detail);
            event_ctx.set_component_area(ChampComponentId::List, chunks[2]);
            self.list.render(
                frame,
                chunks[2],
                ChampionListProps {
                    state,
                    is_focused: render_ctx.is_focused() && !state.search.active,
                },
            );
        }

        self.render_status(frame, chunks[3], state);
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = status_hints(state);
        let message = state.message.clone().unwrap_or_default();
        let message_items = [StatusBarItem::span(Span::styled(
            message.as_str(),
            Style::default().fg(theme::ACCENT_GOLD),
        ))];
        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            area,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints).with_separator("  "),
                right: StatusBarSection::items(&message_items),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }

    fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = ChampionListProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.list.handle_event(event, props).into_iter().collect();
        respond(actions)
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = FilterBarProps {
            search: &state.search,
            lanes: &state.lanes,
            favorite_only: state.favorite_only,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .filter_bar
            .handle_event(event, props)
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = ChampionDetailProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        respond(actions)
    }
}

fn respond(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "apply"),
            StatusBarHint::new("Esc", "clear"),
            StatusBarHint::new("↑↓", "move"),
        ];
    }
    if state.detail.is_some() {
        return vec![
            StatusBarHint::new("Esc", "back"),
            StatusBarHint::new("f", "favorite"),
            StatusBarHint::new("q", "quit"),
        ];
    }
    vec![
        StatusBarHint::new("/", "search"),
        StatusBarHint::new("1-5", "lane"),
        StatusBarHint::new("*", "favorites"),
        StatusBarHint::new("f", "favorite"),
        StatusBarHint::new("Enter", "detail"),
        StatusBarHint::new("b", "shuffle"),
        StatusBarHint::new("q", "quit"),
    ]
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    services: Services,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ChampUi::new()));
    let mut bus: EventBus<AppState, Action, ChampComponentId, ChampContext> = EventBus::new();
    let keybindings: Keybindings<ChampContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(ChampComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(ChampComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(ChampComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key)
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            HandlerResponse::action(Action::Quit)
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &services),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: &Services) {
    match effect {
        Effect::FetchVersion => {
            let feed = services.feed.clone();
            ctx.tasks().spawn(TaskKey::new("version"), async move {
                match api::fetch_latest_version(&feed).await {
                    Ok(version) => Action::VersionDidLoad(version),
                    Err(err) => {
                        tracing::warn!(%err, "version lookup failed");
                        Action::RosterDidError(err.to_string())
                    }
                }
            });
        }
        Effect::FetchRoster { version } => {
            let feed = services.feed.clone();
            ctx.tasks().spawn(TaskKey::new("roster"), async move {
                match api::fetch_champions(&version, &feed).await {
                    Ok(champions) => {
                        tracing::info!(%version, count = champions.len(), "roster loaded");
                        Action::RosterDidLoad { version, champions }
                    }
                    Err(err) => {
                        tracing::warn!(%version, %err, "roster fetch failed");
                        Action::RosterDidError(err.to_string())
                    }
                }
            });
        }
        Effect::LoadCounters { champion_id } => {
            let source = Arc::clone(&services.counters);
            ctx.tasks().spawn(TaskKey::new("counters"), async move {
                let counters = source.counter_data(&champion_id).await;
                Action::DetailCountersDidLoad {
                    champion_id,
                    counters,
                }
            });
        }
        Effect::SaveFavorites { path, ids } => {
            ctx.tasks().spawn(TaskKey::new("favorites"), async move {
                match favorites::save(Path::new(&path), &ids).await {
                    Ok(()) => Action::FavoriteDidSave,
                    Err(err) => {
                        tracing::warn!(%path, %err, "saving favorites failed");
                        Action::FavoriteDidError(err.to_string())
                    }
                }
            });
        }
    }
}
