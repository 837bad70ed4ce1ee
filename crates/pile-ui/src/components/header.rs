use crate::themes::Theme;
use pile_core::ToleranceLimits;
use ratatui::text::{Line, Span};

/// Decorative marks placed either side of the application title.
pub const ACCENT: &str = "◆ ◇ ◆";

/// Dashboard header rendering three lines:
///
/// 1. Application title with accent decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Tolerance limits in `[ xy ±0.3 m | height ±0.2 m ]` format.
pub struct Header<'a> {
    pub limits: &'a ToleranceLimits,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(limits: &'a ToleranceLimits, theme: &'a Theme) -> Self {
        Self { limits, theme }
    }

    /// Number of terminal rows the header occupies.
    pub const HEIGHT: u16 = 3;

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(" SOLAR PILE TOLERANCE MEASUREMENT ", self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ xy ", self.theme.label),
                Span::styled(format!("±{} m", self.limits.horizontal), self.theme.value),
                Span::styled(" | height ", self.theme.label),
                Span::styled(format!("±{} m", self.limits.vertical), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
