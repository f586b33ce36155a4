//! Shared palette

use ratatui::style::{Color, Modifier, Style};

pub const BG_BASE: Color = Color::Rgb(10, 16, 24);
pub const BG_HIGHLIGHT: Color = Color::Rgb(30, 58, 82);
pub const TEXT_MAIN: Color = Color::Rgb(232, 236, 240);
pub const TEXT_DIM: Color = Color::Rgb(150, 164, 178);
pub const ACCENT_GOLD: Color = Color::Rgb(200, 170, 110);
pub const ACCENT_BLUE: Color = Color::Rgb(10, 200, 185);
pub const FAVORABLE: Color = Color::Rgb(96, 200, 120);
pub const UNFAVORABLE: Color = Color::Rgb(224, 96, 96);

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn heading() -> Style {
    Style::default()
        .fg(ACCENT_GOLD)
        .add_modifier(Modifier::BOLD)
}
