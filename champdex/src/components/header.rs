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
use crate::api;
use crate::state::Champion;

pub struct HeaderProps<'a> {
    pub version: Option<&'a str>,
    pub total: usize,
    pub shown: usize,
    pub background: Option<&'a Champion>,
}

/// Title line: feed version, result count and the current background splash.
#[derive(Default)]
pub struct Header;

impl Component<Action> for Header {
    type Props<'a> = HeaderProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: HeaderProps<'_>) {
        let mut spans = vec![
            Span::styled(
                "ChampDex",
                Style::default()
                    .fg(theme::ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
        ];
        if let Some(version) = props.version {
            spans.push(Span::styled(format!("v{version}"), theme::dim()));
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{}/{}", props.shown, props.total),
            Style::default().fg(theme::TEXT_MAIN),
        ));
        if let Some(champion) = props.background {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("背景: {}", champion.name),
                Style::default().fg(theme::ACCENT_BLUE),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(api::splash_url(&champion.id), theme::dim()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
