use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Feedback shown under the form after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Success(String),
    Error(String),
    Info(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Success(t) | StatusMessage::Error(t) | StatusMessage::Info(t) => t,
        }
    }

    pub fn to_line<'a>(&'a self, theme: &Theme) -> Line<'a> {
        let (icon, style) = match self {
            StatusMessage::Success(_) => ("✔ ", theme.success),
            StatusMessage::Error(_) => ("✖ ", theme.error),
            StatusMessage::Info(_) => ("• ", theme.info),
        };
        Line::from(vec![
            Span::styled(icon, style),
            Span::styled(self.text(), style),
        ])
    }
}

/// Key binding hints for the footer.
pub const KEY_HINTS: [(&str, &str); 6] = [
    ("Enter", "add"),
    ("Tab/S-Tab", "field"),
    ("↑/↓", "±0.1"),
    ("PgUp/PgDn", "scroll"),
    ("Ctrl+E", "export CSV"),
    ("Esc", "quit"),
];

pub fn key_hints_line(theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(KEY_HINTS.len() * 3);
    for (i, (key, action)) in KEY_HINTS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme.dim));
        }
        spans.push(Span::styled(*key, theme.value));
        spans.push(Span::styled(format!(" {action}"), theme.dim));
    }
    Line::from(spans)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
