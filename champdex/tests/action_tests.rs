//! Action and state tests using TestHarness
//!
//! FRAMEWORK PATTERN: TestHarness
//! - Create harness with initial state
//! - Emit actions to simulate user/async events
//! - Drain and assert emitted actions

use champdex::{
    action::Action,
    components::{ChampionList, ChampionListProps, Component},
    custom::Lane,
    effect::Effect,
    reducer::reducer,
    state::{AppState, Champion},
};
use pretty_assertions::assert_eq;
use tui_dispatch::testing::*;
use tui_dispatch::{assert_emitted, assert_not_emitted, EffectStore, NumericComponentId};

fn roster() -> Vec<Champion> {
    vec![
        Champion::new("Zed", "ゼド"),
        Champion::new("Ashe", "アッシュ"),
        Champion::new("Nasus", "ナサス"),
        Champion::new("Lux", "ラックス"),
    ]
}

#[test]
fn test_reducer_startup_flow() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().roster.is_empty());

    let result = store.dispatch(Action::Init);
    assert!(result.changed, "State should change");
    assert!(store.state().roster.is_loading());
    assert_eq!(result.effects, vec![Effect::FetchVersion]);

    let result = store.dispatch(Action::VersionDidLoad("14.3.1".into()));
    assert_eq!(
        result.effects,
        vec![Effect::FetchRoster {
            version: "14.3.1".into()
        }]
    );

    store.dispatch(Action::RosterDidLoad {
        version: "14.3.1".into(),
        champions: roster(),
    });
    assert!(store.state().roster.is_loaded());
    assert_eq!(store.state().results, vec!["Ashe", "Zed", "Nasus", "Lux"]);
}

#[test]
fn test_reducer_lane_filter_any_of() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::VersionDidLoad("14.3.1".into()));
    store.dispatch(Action::RosterDidLoad {
        version: "14.3.1".into(),
        champions: roster(),
    });

    store.dispatch(Action::FilterLaneToggle(Lane::Top));
    assert_eq!(store.state().results, vec!["Nasus"]);

    store.dispatch(Action::FilterLaneToggle(Lane::Mid));
    assert_eq!(store.state().results, vec!["Zed", "Nasus", "Lux"]);

    store.dispatch(Action::FilterLaneClear);
    assert_eq!(store.state().results.len(), 4);
}

#[test]
fn test_component_keyboard_events() {
    // PATTERN: TestHarness for component testing
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = ChampionList;

    let actions = harness.send_keys::<NumericComponentId, _, _>("j k f", |state, event| {
        let props = ChampionListProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(3);
    actions.assert_first(Action::SelectionMove(1));
    assert_emitted!(actions, Action::FavoriteToggle);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = ChampionList;

    let actions = harness.send_keys::<NumericComponentId, _, _>("j q f", |state, event| {
        let props = ChampionListProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::RosterDidLoad {
        version: "14.3.1".into(),
        champions: Vec::new(),
    };
    let resize = Action::UiTerminalResize(80, 24);
    let quit = Action::Quit;

    // Categories are inferred from naming convention
    assert_eq!(did_load.category(), Some("roster_did"));
    assert_eq!(resize.category(), Some("ui"));
    assert_eq!(quit.category(), None);

    assert!(did_load.is_roster_did());
    assert!(resize.is_ui());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::Init);
    harness.emit(Action::SearchInput('a'));
    harness.emit(Action::RosterDidError("oops".into()));

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::FavoriteToggle,
        Action::FavoriteDidError("disk full".into()),
    ];

    assert_emitted!(actions, Action::FavoriteToggle);
    assert_emitted!(actions, Action::FavoriteDidError(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::RosterDidError(_));
}
