//! Pile measurement table.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per record in
//! submission order, using the same column labels as the CSV report.

use pile_core::export::CSV_HEADERS;
use pile_core::formatting::{format_deviation, format_meters};
use pile_core::{Dataset, PileRecord};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Decimals shown for coordinates and deviations.
pub const TABLE_DECIMALS: usize = 3;

/// Shortened column headers that fit the terminal; same order as the CSV.
const SHORT_HEADERS: [&str; 11] = [
    "Pile ID", "Plan X", "Plan Y", "Plan H", "Inst X", "Inst Y", "Inst H", "ΔX", "ΔY", "ΔH",
    "Status",
];

/// Convert one record into display cells.
pub fn record_cells(record: &PileRecord) -> [String; 11] {
    let m = |v: f64| format_meters(v, TABLE_DECIMALS);
    let d = |v: f64| format_deviation(v, TABLE_DECIMALS);
    [
        record.pile_id().to_string(),
        m(record.planned().x),
        m(record.planned().y),
        m(record.planned().height),
        m(record.installed().x),
        m(record.installed().y),
        m(record.installed().height),
        d(record.deviation().x),
        d(record.deviation().y),
        d(record.deviation().height),
        record.status().label().to_string(),
    ]
}

/// Header labels for a table `width` columns wide: the full CSV labels when
/// they fit, the short ones otherwise.
pub fn header_labels(width: u16) -> [&'static str; 11] {
    let full: usize = CSV_HEADERS.iter().map(|h| h.width() + 1).sum();
    if full + 2 <= width as usize {
        CSV_HEADERS
    } else {
        SHORT_HEADERS
    }
}

/// Title showing record and out-of-tolerance counts.
pub fn table_title(dataset: &Dataset) -> String {
    let summary = dataset.summary();
    format!(
        " Pile Measurement Data ({} piles, {} out of tolerance) ",
        summary.total, summary.out_of_tolerance
    )
}

/// Render the full dataset starting at row `offset`.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    dataset: &Dataset,
    offset: usize,
    theme: &Theme,
) {
    if dataset.is_empty() {
        render_no_data(frame, area, theme);
        return;
    }

    let labels = header_labels(area.width);
    let header = Row::new(labels.iter().map(|h| Cell::from(*h).style(theme.table_header))).height(1);

    let rows: Vec<Row> = dataset
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let mut cells: Vec<Cell> = record_cells(record).into_iter().map(Cell::from).collect();
            if let Some(status) = cells.last_mut() {
                *status = Cell::from(record.status().label())
                    .style(theme.status_style(record.status()));
            }
            Row::new(cells).style(style)
        })
        .collect();

    // Widest identifier, at least the header label.
    let id_width = dataset
        .iter()
        .map(|r| r.pile_id().width())
        .max()
        .unwrap_or(0)
        .max(labels[0].width())
        .min(24) as u16;

    let number_widths = labels[1..10]
        .iter()
        .map(|h| Constraint::Length((h.width() as u16).max(8)));
    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(id_width))
        .chain(number_widths)
        .chain(std::iter::once(Constraint::Min(16)))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(table_title(dataset)),
        )
        .style(theme.text);

    let mut state = TableState::default().with_offset(offset.min(dataset.len() - 1));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Placeholder shown before the first record is added.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No pile measurements recorded", theme.warning)),
        Line::from(Span::styled(
            "Records added this session appear here in submission order.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Pile Measurement Data "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pile_core::Position;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_dataset() -> Dataset {
        let mut ds = Dataset::new();
        ds.push(PileRecord::new(
            "P-1",
            Position::new(0.0, 0.0, 2.5),
            Position::new(0.1, 0.05, 2.5),
        ));
        ds.push(PileRecord::new(
            "P-2",
            Position::new(0.0, 0.0, 2.5),
            Position::new(0.5, 0.0, 2.5),
        ));
        ds
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── Cells ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_record_cells_all_columns() {
        let ds = make_dataset();
        let cells = record_cells(&ds.records()[0]);
        assert_eq!(
            cells,
            [
                "P-1",
                "0.000",
                "0.000",
                "2.500",
                "0.100",
                "0.050",
                "2.500",
                "+0.100",
                "+0.050",
                "0.000",
                "In Tolerance"
            ]
            .map(String::from)
        );
    }

    #[test]
    fn test_header_labels_fall_back_when_narrow() {
        assert_eq!(header_labels(80), SHORT_HEADERS);
        assert_eq!(header_labels(300), CSV_HEADERS);
    }

    #[test]
    fn test_table_title_counts() {
        let ds = make_dataset();
        assert_eq!(
            table_title(&ds),
            " Pile Measurement Data (2 piles, 1 out of tolerance) "
        );
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_table_rows_in_order() {
        let backend = TestBackend::new(140, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let ds = make_dataset();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table_view(frame, area, &ds, 0, &theme);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        let first = text.find("P-1").expect("P-1 rendered");
        let second = text.find("P-2").expect("P-2 rendered");
        assert!(first < second);
        assert!(text.contains("Out of Tolerance"));
    }

    #[test]
    fn test_render_table_offset_past_end_does_not_panic() {
        let backend = TestBackend::new(100, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();
        let ds = make_dataset();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table_view(frame, area, &ds, 99, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_empty_table_placeholder() {
        let backend = TestBackend::new(80, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table_view(frame, area, &Dataset::new(), 0, &theme);
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("No pile measurements recorded"));
    }
}
