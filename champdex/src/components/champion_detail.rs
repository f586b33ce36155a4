use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};

use super::theme;
use super::Component;
use crate::action::Action;
use crate::api;
use crate::counter::{ResolvedMatchup, MATCHUP_DISPLAY_LIMIT};
use crate::state::{AppState, Champion};
use crate::tag::compose_tag;

pub const NO_COUNTERS_MESSAGE: &str = "カウンター情報がまだ登録されていません";
pub const NOT_FOUND_MESSAGE: &str = "チャンピオンが見つかりません";

pub struct ChampionDetailProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Profile, links and curated matchups for the opened champion.
#[derive(Default)]
pub struct ChampionDetail;

impl Component<Action> for ChampionDetail {
    type Props<'a> = ChampionDetailProps<'a>;

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
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                Some(Action::DetailClose)
            }
            KeyCode::Char('f') => Some(Action::FavoriteToggle),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ChampionDetailProps<'_>) {
        let state = props.state;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT_BLUE))
            .title(" 詳細 ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(champion) = state.detail_champion() else {
            frame.render_widget(
                Paragraph::new(Line::styled(NOT_FOUND_MESSAGE, theme::dim())),
                inner,
            );
            return;
        };

        let profile = profile_lines(state, champion);
        let chunks = Layout::vertical([
            Constraint::Length(profile.len() as u16 + 1),
            Constraint::Min(1),
        ])
        .split(inner);
        frame.render_widget(Paragraph::new(profile), chunks[0]);

        let Some(detail) = state.detail.as_ref() else {
            return;
        };
        match &detail.counters {
            DataResource::Empty | DataResource::Loading => {
                frame.render_widget(
                    Paragraph::new(Line::styled("読み込み中…", theme::dim())),
                    chunks[1],
                );
            }
            DataResource::Failed(error) => {
                frame.render_widget(
                    Paragraph::new(Line::styled(error.clone(), theme::dim())),
                    chunks[1],
                );
            }
            DataResource::Loaded(None) => {
                frame.render_widget(
                    Paragraph::new(Line::styled(NO_COUNTERS_MESSAGE, theme::dim())),
                    chunks[1],
                );
            }
            DataResource::Loaded(Some(counters)) => {
                let summary = counters.summarize(state.champions(), MATCHUP_DISPLAY_LIMIT);
                let columns =
                    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .split(chunks[1]);
                frame.render_widget(
                    Paragraph::new(matchup_lines(
                        "有利なチャンピオン",
                        &summary.favorable,
                        Style::default().fg(theme::FAVORABLE),
                    )),
                    columns[0],
                );
                frame.render_widget(
                    Paragraph::new(matchup_lines(
                        "不利なチャンピオン",
                        &summary.unfavorable,
                        Style::default().fg(theme::UNFAVORABLE),
                    )),
                    columns[1],
                );
            }
        }
    }
}

fn profile_lines(state: &AppState, champion: &Champion) -> Vec<Line<'static>> {
    let custom = state.custom.lookup(&champion.id);
    let star = if state.favorites.contains(&champion.id) {
        "★ "
    } else {
        "☆ "
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(star, Style::default().fg(theme::ACCENT_GOLD)),
        Span::styled(
            champion.name.clone(),
            Style::default()
                .fg(theme::TEXT_MAIN)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", champion.id), theme::dim()),
    ])];

    if let Some(tag) = compose_tag(champion, custom) {
        lines.push(Line::styled(tag, Style::default().fg(theme::TEXT_MAIN)));
    }
    if let Some(entry) = custom {
        if !entry.lanes.is_empty() {
            let lanes: Vec<&str> = entry.lanes.iter().map(|lane| lane.label()).collect();
            lines.push(Line::from(vec![
                Span::styled("レーン: ", theme::dim()),
                Span::raw(lanes.join(" ")),
            ]));
        }
        if !entry.nicknames.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("別名: ", theme::dim()),
                Span::raw(entry.nicknames.join("、")),
            ]));
        }
    }

    lines.push(Line::raw(""));
    let image = api::champion_image_url(state.version.as_deref(), &champion.image.full);
    if !image.is_empty() {
        lines.push(link_line("Icon", image));
    }
    lines.push(link_line("Splash", api::splash_url(&champion.id)));
    lines.push(link_line("OP.GG", api::opgg_url(&champion.id)));
    lines.push(link_line("U.GG", api::ugg_url(&champion.id)));
    lines
}

fn link_line(label: &'static str, url: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<7}"), theme::dim()),
        Span::styled(url, Style::default().fg(theme::ACCENT_BLUE)),
    ])
}

fn matchup_lines(title: &'static str, matchups: &[ResolvedMatchup<'_>], accent: Style) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(title, accent.add_modifier(Modifier::BOLD))];
    if matchups.is_empty() {
        lines.push(Line::styled("なし", theme::dim()));
        return lines;
    }
    for (rank, matchup) in matchups.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", rank + 1), theme::dim()),
            Span::raw(matchup.display_name().to_string()),
        ]));
    }
    lines
}
