use pile_core::ToleranceStatus;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 light.  Anything else yields `Dark`.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(parse_colorfgbg)
        .unwrap_or(BackgroundType::Dark)
}

fn parse_colorfgbg(val: &str) -> Option<BackgroundType> {
    let bg = val.split(';').next_back()?.parse::<u8>().ok()?;
    Some(if bg <= 6 {
        BackgroundType::Dark
    } else {
        BackgroundType::Light
    })
}

/// All UI styles used by the pile-ui components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status line ──────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Form ─────────────────────────────────────────────────────────────────
    pub field_focused: Style,
    pub field_idle: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Planned position markers.
    pub planned: Style,
    /// Installed markers and height bars within tolerance.
    pub in_tolerance: Style,
    /// Installed markers and height bars outside tolerance.
    pub out_of_tolerance: Style,
    /// Dotted planned → installed connector.
    pub connector: Style,
    /// ±limit reference lines.
    pub limit_line: Style,
    pub axis: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            field_focused: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            field_idle: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            planned: Style::default().fg(Color::Blue),
            in_tolerance: Style::default().fg(Color::Green),
            out_of_tolerance: Style::default().fg(Color::Red),
            connector: Style::default().fg(Color::DarkGray),
            limit_line: Style::default().fg(Color::Gray),
            axis: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Dark text and saturated accents so content stays legible on a light
    /// canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            field_focused: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            field_idle: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),

            planned: Style::default().fg(Color::Blue),
            in_tolerance: Style::default().fg(Color::Green),
            out_of_tolerance: Style::default().fg(Color::Red),
            connector: Style::default().fg(Color::Gray),
            limit_line: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::DarkGray),
        }
    }

    /// Basic 8-colour ANSI palette, no bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            field_focused: Style::default().fg(Color::Yellow),
            field_idle: Style::default().fg(Color::White),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            planned: Style::default().fg(Color::Blue),
            in_tolerance: Style::default().fg(Color::Green),
            out_of_tolerance: Style::default().fg(Color::Red),
            connector: Style::default().fg(Color::DarkGray),
            limit_line: Style::default().fg(Color::White),
            axis: Style::default().fg(Color::White),
        }
    }

    /// Choose a theme based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name.  Unknown names (including `"auto"`) fall
    /// back to [`Self::auto_detect`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Green for in-tolerance piles, red otherwise.
    pub fn status_style(&self, status: ToleranceStatus) -> Style {
        match status {
            ToleranceStatus::InTolerance => self.in_tolerance,
            ToleranceStatus::OutOfTolerance => self.out_of_tolerance,
        }
    }

    /// Bar colour for the height chart.
    pub fn height_bar_style(&self, within: bool) -> Style {
        if within {
            self.in_tolerance
        } else {
            self.out_of_tolerance
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
