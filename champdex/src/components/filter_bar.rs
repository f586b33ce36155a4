use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;

use super::theme;
use super::Component;
use crate::action::Action;
use crate::custom::Lane;
use crate::state::SearchState;

/// Props for FilterBar - query line plus lane and favorite toggles
pub struct FilterBarProps<'a> {
    pub search: &'a SearchState,
    pub lanes: &'a [Lane],
    pub favorite_only: bool,
    pub is_focused: bool,
}

/// Query input and filter chips. Owns keyboard input while search is active.
#[derive(Default)]
pub struct FilterBar;

impl Component<Action> for FilterBar {
    type Props<'a> = FilterBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.search.active {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Up => Some(Action::SelectionMove(-1)),
            KeyCode::Down => Some(Action::SelectionMove(1)),
            KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: FilterBarProps<'_>) {
        let mut spans = vec![Span::styled("検索: ", theme::heading())];
        if props.search.active {
            spans.push(Span::styled(
                format!("{}▏", props.search.query),
                Style::default().fg(theme::TEXT_MAIN),
            ));
        } else if props.search.query.is_empty() {
            spans.push(Span::styled("/ で検索", theme::dim()));
        } else {
            spans.push(Span::styled(
                props.search.query.clone(),
                Style::default().fg(theme::TEXT_MAIN),
            ));
        }

        spans.push(Span::raw("   "));
        for (index, lane) in Lane::ALL.iter().enumerate() {
            let active = props.lanes.contains(lane);
            let style = if active {
                Style::default()
                    .fg(theme::BG_BASE)
                    .bg(theme::ACCENT_BLUE)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim()
            };
            spans.push(Span::styled(
                format!(" {}:{} ", index + 1, lane.label()),
                style,
            ));
        }

        spans.push(Span::raw(" "));
        let favorite_style = if props.favorite_only {
            Style::default()
                .fg(theme::ACCENT_GOLD)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim()
        };
        spans.push(Span::styled(" ★のみ ", favorite_style));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn props(search: &SearchState) -> FilterBarProps<'_> {
        FilterBarProps {
            search,
            lanes: &[],
            favorite_only: false,
            is_focused: true,
        }
    }

    #[test]
    fn test_typing_emits_input() {
        let mut component = FilterBar;
        let search = SearchState {
            active: true,
            query: String::new(),
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("a")), props(&search))
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchInput('a'));

        let actions: Vec<_> = component
            .handle_event(&press(KeyCode::Esc), props(&search))
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchCancel);
    }

    #[test]
    fn test_inactive_search_ignores_keys() {
        let mut component = FilterBar;
        let search = SearchState::default();

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("a")), props(&search))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_shows_active_lanes() {
        let mut render = RenderHarness::new(80, 1);
        let mut component = FilterBar;
        let search = SearchState {
            active: false,
            query: "ぜ".into(),
        };

        let output = render.render_to_string_plain(|frame| {
            let props = FilterBarProps {
                search: &search,
                lanes: &[Lane::Mid],
                favorite_only: true,
                is_focused: false,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("3:MID"));
        // wide glyphs are followed by a padding cell in the plain dump
        let squashed: String = output.chars().filter(|ch| *ch != ' ').collect();
        assert!(squashed.contains("★のみ"));
    }
}
