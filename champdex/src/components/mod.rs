pub mod champion_detail;
pub mod champion_list;
pub mod filter_bar;
pub mod header;
pub mod theme;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use champion_detail::{ChampionDetail, ChampionDetailProps, NOT_FOUND_MESSAGE, NO_COUNTERS_MESSAGE};
pub use champion_list::{ChampionList, ChampionListProps, NO_RESULTS_MESSAGE};
pub use filter_bar::{FilterBar, FilterBarProps};
pub use header::{Header, HeaderProps};
