//! Measurement intake form.
//!
//! Seven fields: the pile identifier plus planned and installed x / y /
//! height.  Numeric fields only ever hold a (possibly incomplete) decimal
//! number; keystrokes that would break that are dropped.

use pile_core::formatting::{format_field_value, round_to_step_precision};
use pile_core::models::DEFAULT_PLANNED_HEIGHT_M;
use pile_core::{MeasurementInput, Position};
use ratatui::{
    layout::{Position as CursorPosition, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Increment applied by `Up` / `Down` on numeric fields.
pub const NUMERIC_STEP: f64 = 0.1;

/// Label column width inside the form.
const LABEL_WIDTH: usize = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// One editable input.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    /// Value used when a numeric buffer cannot be parsed.
    pub default: f64,
    buffer: String,
}

impl FormField {
    fn text(label: &'static str) -> Self {
        Self {
            label,
            kind: FieldKind::Text,
            default: 0.0,
            buffer: String::new(),
        }
    }

    fn number(label: &'static str, default: f64) -> Self {
        Self {
            label,
            kind: FieldKind::Number,
            default,
            buffer: format_field_value(default),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Numeric value of the field, coercing incomplete input to the default.
    pub fn value(&self) -> f64 {
        match self.buffer.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                tracing::debug!(
                    field = self.label,
                    buffer = %self.buffer,
                    "Coercing incomplete number to default {}",
                    self.default
                );
                self.default
            }
        }
    }

    fn insert(&mut self, c: char) -> bool {
        match self.kind {
            FieldKind::Text => {
                if c.is_control() {
                    return false;
                }
                self.buffer.push(c);
                true
            }
            FieldKind::Number => {
                let accepted = match c {
                    '0'..='9' => true,
                    '.' => !self.buffer.contains('.'),
                    '-' => self.buffer.is_empty(),
                    _ => false,
                };
                if accepted {
                    self.buffer.push(c);
                }
                accepted
            }
        }
    }

    fn backspace(&mut self) {
        self.buffer.pop();
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn step(&mut self, delta: f64) {
        if self.kind == FieldKind::Number {
            let next = round_to_step_precision(self.value() + delta);
            self.buffer = format_field_value(next);
        }
    }
}

/// Focus order and values of the intake form.
#[derive(Debug, Clone)]
pub struct MeasurementForm {
    fields: [FormField; 7],
    focused: usize,
}

impl Default for MeasurementForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementForm {
    pub const PILE_ID: usize = 0;
    pub const PLANNED_X: usize = 1;
    pub const PLANNED_Y: usize = 2;
    pub const PLANNED_HEIGHT: usize = 3;
    pub const INSTALLED_X: usize = 4;
    pub const INSTALLED_Y: usize = 5;
    pub const INSTALLED_HEIGHT: usize = 6;

    pub fn new() -> Self {
        Self {
            fields: [
                FormField::text("Pile ID"),
                FormField::number("Planned X (m)", 0.0),
                FormField::number("Planned Y (m)", 0.0),
                FormField::number("Planned Height (m)", DEFAULT_PLANNED_HEIGHT_M),
                FormField::number("Installed X (m)", 0.0),
                FormField::number("Installed Y (m)", 0.0),
                FormField::number("Installed Height (m)", 0.0),
            ],
            focused: Self::PILE_ID,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn focused_field(&self) -> &FormField {
        &self.fields[self.focused]
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    /// Type `c` into the focused field.  Returns `false` if it was rejected.
    pub fn insert_char(&mut self, c: char) -> bool {
        self.fields[self.focused].insert(c)
    }

    pub fn backspace(&mut self) {
        self.fields[self.focused].backspace();
    }

    pub fn clear_focused(&mut self) {
        self.fields[self.focused].clear();
    }

    pub fn step_up(&mut self) {
        self.fields[self.focused].step(NUMERIC_STEP);
    }

    pub fn step_down(&mut self) {
        self.fields[self.focused].step(-NUMERIC_STEP);
    }

    /// Replace the buffer of field `index` wholesale.
    #[cfg(test)]
    pub fn set_buffer(&mut self, index: usize, text: &str) {
        let field = &mut self.fields[index];
        field.clear();
        for c in text.chars() {
            field.insert(c);
        }
    }

    /// Snapshot the current values as a submission.  The form keeps its
    /// values afterwards.
    pub fn to_input(&self) -> MeasurementInput {
        let v = |i: usize| self.fields[i].value();
        MeasurementInput {
            pile_id: self.fields[Self::PILE_ID].buffer.clone(),
            planned: Position::new(v(Self::PLANNED_X), v(Self::PLANNED_Y), v(Self::PLANNED_HEIGHT)),
            installed: Position::new(
                v(Self::INSTALLED_X),
                v(Self::INSTALLED_Y),
                v(Self::INSTALLED_HEIGHT),
            ),
        }
    }

    /// Render the form and place the terminal cursor at the end of the
    /// focused field.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::with_capacity(self.fields.len() * 2 + 2);
        for (i, field) in self.fields.iter().enumerate() {
            let is_focused = i == self.focused;
            let marker = if is_focused { "▶ " } else { "  " };
            let style = if is_focused {
                theme.field_focused
            } else {
                theme.field_idle
            };
            lines.push(Line::from(vec![
                Span::styled(marker, theme.field_focused),
                Span::styled(format!("{:<width$}", field.label, width = LABEL_WIDTH), theme.label),
                Span::styled(field.buffer.clone(), style),
            ]));
            if i == Self::PILE_ID || i == Self::PLANNED_HEIGHT {
                lines.push(Line::from(""));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[ Enter ] ", theme.value),
            Span::styled("Add Measurement", theme.info),
        ]));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.table_border)
            .title(" Enter Pile Measurement Data ");
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(lines).block(block).style(theme.text), area);

        // Blank spacer lines follow the pile id and planned height rows.
        let row = self.focused
            + usize::from(self.focused > Self::PILE_ID)
            + usize::from(self.focused > Self::PLANNED_HEIGHT);
        let col = 2 + LABEL_WIDTH + self.focused_field().buffer.width();
        if (row as u16) < inner.height && (col as u16) < inner.width {
            frame.set_cursor_position(CursorPosition::new(
                inner.x + col as u16,
                inner.y + row as u16,
            ));
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
