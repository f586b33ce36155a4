//! Actions - intents from the UI and results from async tasks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::counter::ChampionCounterData;
use crate::custom::Lane;
use crate::state::Champion;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    Init,

    // ===== Feed results =====
    /// Result: newest feed version resolved
    VersionDidLoad(String),
    /// Result: roster snapshot for `version` fetched
    RosterDidLoad {
        version: String,
        champions: Vec<Champion>,
    },
    /// Result: either feed request failed
    RosterDidError(String),

    // ===== Search category =====
    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    // ===== Filter category =====
    FilterLaneToggle(Lane),
    FilterLaneClear,
    FilterFavoriteOnlyToggle,

    // ===== Selection category =====
    SelectionMove(i16),
    SelectionJumpTop,
    SelectionJumpBottom,

    // ===== Favorite category =====
    FavoriteToggle,
    FavoriteDidSave,
    FavoriteDidError(String),

    // ===== Detail category =====
    DetailOpen,
    DetailClose,
    /// Result: counter lookup finished; `None` when nothing is curated
    DetailCountersDidLoad {
        champion_id: String,
        counters: Option<ChampionCounterData>,
    },

    // ===== Background category =====
    BackgroundShuffle,

    // ===== UI category =====
    UiTerminalResize(u16, u16),

    Quit,
}
