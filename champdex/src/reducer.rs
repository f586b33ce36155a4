//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::search;
use crate::state::{AppState, DetailState};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.roster = DataResource::Loading;
            state.message = None;
            match state.version.clone() {
                Some(version) => DispatchResult::changed_with(Effect::FetchRoster { version }),
                None => DispatchResult::changed_with(Effect::FetchVersion),
            }
        }

        Action::VersionDidLoad(version) => {
            state.version = Some(version.clone());
            DispatchResult::changed_with(Effect::FetchRoster { version })
        }

        Action::RosterDidLoad { version, champions } => {
            if state.version.as_deref() != Some(version.as_str()) {
                return DispatchResult::unchanged();
            }
            state.roster = DataResource::Loaded(champions);
            state.selected_index = 0;
            state.rebuild_results();
            refresh_background(state, true);
            DispatchResult::changed()
        }

        Action::RosterDidError(error) => {
            state.roster = DataResource::Failed(error);
            state.results.clear();
            state.selected_index = 0;
            state.background = None;
            DispatchResult::changed()
        }

        Action::SearchStart => {
            state.search.active = true;
            state.search.query.clear();
            refresh(state);
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            refresh(state);
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.selected_index = 0;
            refresh(state);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.selected_index = 0;
            refresh(state);
            DispatchResult::changed()
        }

        Action::FilterLaneToggle(lane) => {
            if let Some(pos) = state.lanes.iter().position(|active| *active == lane) {
                state.lanes.remove(pos);
            } else {
                state.lanes.push(lane);
            }
            state.selected_index = 0;
            refresh(state);
            DispatchResult::changed()
        }

        Action::FilterLaneClear => {
            if state.lanes.is_empty() {
                return DispatchResult::unchanged();
            }
            state.lanes.clear();
            state.selected_index = 0;
            refresh(state);
            DispatchResult::changed()
        }

        Action::FilterFavoriteOnlyToggle => {
            state.favorite_only = !state.favorite_only;
            state.selected_index = 0;
            refresh(state);
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => {
            let next = clamp_index(state.selected_index, state.results.len(), delta);
            if state.set_selected_index(next) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SelectionJumpTop => {
            if state.set_selected_index(0) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SelectionJumpBottom => {
            let last = state.results.len().saturating_sub(1);
            if state.set_selected_index(last) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::FavoriteToggle => {
            let target = match &state.detail {
                Some(detail) => Some(detail.champion_id.clone()),
                None => state.selected_id().map(str::to_string),
            };
            let Some(id) = target else {
                return DispatchResult::unchanged();
            };
            state.favorites.toggle(&id);
            if state.favorite_only {
                refresh(state);
            }
            DispatchResult::changed_with(Effect::SaveFavorites {
                path: state.favorites_path.clone(),
                ids: state.favorites.ids(),
            })
        }

        Action::FavoriteDidSave => DispatchResult::unchanged(),

        Action::FavoriteDidError(error) => {
            state.message = Some(format!("Favorites not saved: {error}"));
            DispatchResult::changed()
        }

        Action::DetailOpen => {
            let Some(id) = state.selected_id().map(str::to_string) else {
                return DispatchResult::unchanged();
            };
            state.detail = Some(DetailState::loading(id.clone()));
            DispatchResult::changed_with(Effect::LoadCounters { champion_id: id })
        }

        Action::DetailClose => {
            if state.detail.take().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::DetailCountersDidLoad {
            champion_id,
            counters,
        } => {
            let Some(detail) = state.detail.as_mut() else {
                return DispatchResult::unchanged();
            };
            if detail.champion_id != champion_id {
                return DispatchResult::unchanged();
            }
            detail.counters = DataResource::Loaded(counters);
            DispatchResult::changed()
        }

        Action::BackgroundShuffle => {
            let before = state.background.clone();
            refresh_background(state, true);
            if state.background == before {
                DispatchResult::unchanged()
            } else {
                DispatchResult::changed()
            }
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn refresh(state: &mut AppState) {
    state.rebuild_results();
    refresh_background(state, false);
}

/// Keep the background while it is still eligible, otherwise (or when
/// `reroll` is set) draw a new one from the pre-favorite candidate pool.
fn refresh_background(state: &mut AppState, reroll: bool) {
    let filter = state.filter_state();
    if !reroll {
        let pool = search::background_pool(state.champions(), &state.custom, &filter);
        let current = state.background.as_deref();
        if current.is_some_and(|id| pool.iter().any(|champion| champion.id == id)) {
            return;
        }
    }
    let roll = next_rand(state);
    let picked = {
        let pool = search::background_pool(state.champions(), &state.custom, &filter);
        search::pick_background(&pool, roll).map(|champion| champion.id.clone())
    };
    state.background = picked;
}

fn next_rand(state: &mut AppState) -> u32 {
    state.rng_seed = state
        .rng_seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1);
    (state.rng_seed >> 32) as u32
}

fn clamp_index(current: usize, len: usize, delta: i16) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as i64 + delta as i64;
    next.clamp(0, len as i64 - 1) as usize
}
