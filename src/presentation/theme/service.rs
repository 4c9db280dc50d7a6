use super::adapter::ColorConverter;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Colours shared by every screen, derived from one accent colour.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub header_style: Style,
    pub selection_style: Style,
    pub focus_style: Style,
    pub dimmed_style: Style,
    pub base_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("#007BFF")
    }
}

impl Theme {
    #[must_use]
    pub fn new(accent_color_str: &str) -> Self {
        Self::from_color(parse_color(accent_color_str))
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        let mut selection_bg_hsl = ColorConverter::to_hsl(accent);
        selection_bg_hsl.l = 0.2;
        selection_bg_hsl.s = 0.3;
        let selection_bg = ColorConverter::to_ratatui(selection_bg_hsl);

        Self {
            accent,
            header_style: Style::default()
                .bg(accent)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            selection_style: Style::default().bg(selection_bg).fg(Color::White),
            focus_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            dimmed_style: Style::default().fg(Color::DarkGray),
            base_style: Style::default().fg(Color::Reset),
        }
    }
}

fn parse_color(s: &str) -> Color {
    if s.starts_with('#')
        && let Ok((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    match s.to_lowercase().as_str() {
        "orange" => Color::Indexed(208),
        _ => Color::Blue,
    }
}

fn parse_hex_color(s: &str) -> Result<(u8, u8, u8), ()> {
    let s = s.trim_start_matches('#');

    if !s.is_ascii() {
        return Err(());
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| ());

    match s.len() {
        6 => Ok((channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?)),
        3 => Ok((
            channel(&s[0..1].repeat(2))?,
            channel(&s[1..2].repeat(2))?,
            channel(&s[2..3].repeat(2))?,
        )),
        _ => Err(()),
    }
}
