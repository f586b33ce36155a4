use std::collections::HashMap;

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};

use super::theme;
use super::Component;
use crate::action::Action;
use crate::custom::Lane;
use crate::search::SearchView;
use crate::state::{AppState, Champion};
use crate::tag::compose_tag;

pub const NO_RESULTS_MESSAGE: &str = "該当するチャンピオンが見つかりません";
const PAGE: i16 = 10;

/// Props for ChampionList - read-only view of state
pub struct ChampionListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The browsable roster: kana sections when unfiltered, a flat list otherwise.
#[derive(Default)]
pub struct ChampionList;

impl Component<Action> for ChampionList {
    type Props<'a> = ChampionListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectionMove(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectionMove(-1)),
            KeyCode::PageDown => Some(Action::SelectionMove(PAGE)),
            KeyCode::PageUp => Some(Action::SelectionMove(-PAGE)),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::SelectionJumpTop),
            KeyCode::Char('G') | KeyCode::End => Some(Action::SelectionJumpBottom),
            KeyCode::Enter | KeyCode::Char('l') => Some(Action::DetailOpen),
            KeyCode::Char('f') => Some(Action::FavoriteToggle),
            KeyCode::Char('*') | KeyCode::Char('F') => Some(Action::FilterFavoriteOnlyToggle),
            KeyCode::Char('/') => Some(Action::SearchStart),
            KeyCode::Char('0') => Some(Action::FilterLaneClear),
            KeyCode::Char(ch @ '1'..='5') => {
                let index = ch as usize - '1' as usize;
                Some(Action::FilterLaneToggle(Lane::ALL[index]))
            }
            KeyCode::Char('b') => Some(Action::BackgroundShuffle),
            KeyCode::Char('r') if props.state.roster.is_failed() => Some(Action::Init),
            KeyCode::Esc if !props.state.search.query.is_empty() => Some(Action::SearchCancel),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ChampionListProps<'_>) {
        let state = props.state;
        let border = if props.is_focused {
            Style::default().fg(theme::ACCENT_BLUE)
        } else {
            theme::dim()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" チャンピオン ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (lines, selected_line) = match &state.roster {
            DataResource::Empty | DataResource::Loading => {
                (vec![Line::styled("読み込み中…", theme::dim())], 0)
            }
            DataResource::Failed(error) => (
                vec![
                    Line::styled(
                        "チャンピオン一覧を取得できませんでした",
                        Style::default().fg(theme::UNFAVORABLE),
                    ),
                    Line::styled(error.clone(), theme::dim()),
                    Line::styled("r で再試行", theme::dim()),
                ],
                0,
            ),
            DataResource::Loaded(_) => list_lines(state),
        };

        let height = inner.height as usize;
        let offset = if height > 0 && selected_line >= height {
            selected_line + 1 - height
        } else {
            0
        };
        let paragraph = Paragraph::new(lines).scroll((offset as u16, 0));
        frame.render_widget(paragraph, inner);
    }
}

/// Rendered rows plus the line index of the selected champion.
fn list_lines(state: &AppState) -> (Vec<Line<'static>>, usize) {
    let index: HashMap<&str, &Champion> = state
        .champions()
        .iter()
        .map(|champion| (champion.id.as_str(), champion))
        .collect();
    let result: Vec<&Champion> = state
        .results
        .iter()
        .filter_map(|id| index.get(id.as_str()).copied())
        .collect();
    let view = SearchView::from_results(result, &state.filter_state());

    if view.is_empty() {
        return (vec![Line::styled(NO_RESULTS_MESSAGE, theme::dim())], 0);
    }

    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut position = 0;
    let mut push_row = |lines: &mut Vec<Line<'static>>, champion: &Champion| {
        let selected = position == state.selected_index;
        if selected {
            selected_line = lines.len();
        }
        lines.push(champion_row(state, champion, selected));
        position += 1;
    };

    match &view {
        SearchView::Grouped(groups) => {
            for group in groups {
                lines.push(Line::styled(format!("── {} ──", group.row), theme::heading()));
                for &champion in &group.champions {
                    push_row(&mut lines, champion);
                }
            }
        }
        SearchView::Flat(champions) => {
            for &champion in champions {
                push_row(&mut lines, champion);
            }
        }
    }

    (lines, selected_line)
}

fn champion_row(state: &AppState, champion: &Champion, selected: bool) -> Line<'static> {
    let base = if selected {
        Style::default()
            .fg(theme::TEXT_MAIN)
            .bg(theme::BG_HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::TEXT_MAIN)
    };
    let marker = if selected { "▶ " } else { "  " };
    let star = if state.favorites.contains(&champion.id) {
        "★ "
    } else {
        "  "
    };

    let mut spans = vec![
        Span::styled(marker, base),
        Span::styled(star, Style::default().fg(theme::ACCENT_GOLD)),
        Span::styled(champion.name.clone(), base),
        Span::styled(format!("  {}", champion.id), theme::dim()),
    ];
    if let Some(tag) = compose_tag(champion, state.custom.lookup(&champion.id)) {
        spans.push(Span::styled(format!("  {tag}"), theme::dim()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn squash(output: &str) -> String {
        output.chars().filter(|ch| *ch != ' ').collect()
    }

    fn loaded(champions: Vec<Champion>) -> AppState {
        let mut state = AppState {
            roster: DataResource::Loaded(champions),
            ..Default::default()
        };
        state.rebuild_results();
        state
    }

    fn render(state: &AppState) -> String {
        let mut render = RenderHarness::new(80, 20);
        let mut component = ChampionList;
        render.render_to_string_plain(|frame| {
            let props = ChampionListProps {
                state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        })
    }

    #[test]
    fn test_handle_event_navigation() {
        let mut component = ChampionList;
        let state = AppState::default();
        let props = ChampionListProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("j")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::SelectionMove(1));
    }

    #[test]
    fn test_digit_toggles_lane() {
        let mut component = ChampionList;
        let state = AppState::default();
        let props = ChampionListProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("3")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::FilterLaneToggle(Lane::Mid));
    }

    #[test]
    fn test_retry_only_after_failure() {
        let mut component = ChampionList;
        let state = AppState::default();
        let props = ChampionListProps {
            state: &state,
            is_focused: true,
        };
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("r")), props)
            .into_iter()
            .collect();
        actions.assert_empty();

        let failed = AppState {
            roster: DataResource::Failed("offline".into()),
            ..Default::default()
        };
        let props = ChampionListProps {
            state: &failed,
            is_focused: true,
        };
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("r")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::Init);
    }

    #[test]
    fn test_render_grouped_with_headers() {
        let state = loaded(vec![
            Champion::new("Zed", "ゼド"),
            Champion::new("Ashe", "アッシュ"),
        ]);

        let output = squash(&render(&state));

        assert!(output.contains("あ行"));
        assert!(output.contains("さ行"));
        assert!(output.contains("Ashe"));
    }

    #[test]
    fn test_render_no_results() {
        let mut state = loaded(vec![Champion::new("Zed", "ゼド")]);
        state.search.query = "zzz".into();
        state.rebuild_results();

        let output = squash(&render(&state));

        assert!(output.contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_render_failure() {
        let state = AppState {
            roster: DataResource::Failed("connection refused".into()),
            ..Default::default()
        };

        let output = render(&state);

        assert!(output.contains("connection refused"));
    }
}
