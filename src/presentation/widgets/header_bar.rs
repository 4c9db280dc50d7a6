use crate::presentation::theme::Theme;
use crate::presentation::theme::adapter::ColorConverter;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub struct HeaderBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub version: Style,
    pub title: Style,
    pub info: Style,
    pub busy: Style,
}

impl HeaderBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let mut version_bg_hsl = ColorConverter::to_hsl(theme.accent);
        version_bg_hsl.l = 0.08;
        version_bg_hsl.s = 0.5;
        let version_bg = ColorConverter::to_ratatui(version_bg_hsl);

        Self {
            app_name: theme.header_style,
            version: Style::default().bg(version_bg).fg(Color::White),
            title: theme.focus_style,
            ..Self::default()
        }
    }
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            version: Style::default().fg(Color::DarkGray),
            title: Style::default().add_modifier(Modifier::BOLD),
            info: Style::default().fg(Color::DarkGray),
            busy: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Top bar: application name, screen title, backend URL and request activity.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    title: &'a str,
    backend: &'a str,
    pending_requests: usize,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(app_name: &'a str, version: &'a str) -> Self {
        Self {
            app_name,
            version,
            title: "",
            backend: "",
            pending_requests: 0,
            style: HeaderBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    #[must_use]
    pub const fn backend(mut self, backend: &'a str) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub const fn pending_requests(mut self, count: usize) -> Self {
        self.pending_requests = count;
        self
    }

    #[must_use]
    pub fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }

    fn right_text(&self) -> String {
        if self.pending_requests > 0 {
            format!("◐ {} request(s) ", self.pending_requests)
        } else {
            format!("{} ", self.backend)
        }
    }
}

impl Widget for HeaderBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let left = Line::from(vec![
            Span::styled(format!(" {} ", self.app_name), self.style.app_name),
            Span::styled(format!(" v{} ", self.version), self.style.version),
            Span::raw(" "),
            Span::styled(self.title, self.style.title),
        ]);
        Paragraph::new(left).render(area, buf);

        let right = self.right_text();
        let right_style = if self.pending_requests > 0 {
            self.style.busy
        } else {
            self.style.info
        };
        let right_width = right.width() as u16;
        if right_width < area.width {
            let right_area = Rect::new(area.right() - right_width, area.y, right_width, 1);
            Paragraph::new(Span::styled(right, right_style)).render(right_area, buf);
        }
    }
}
