//! Deviation charts.
//!
//! Both charts are pure functions of the dataset: the plot data is rebuilt
//! from scratch on every frame and nothing is cached between renders.

use pile_core::formatting::format_meters;
use pile_core::{Dataset, ToleranceLimits};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{self, Axis, Block, Borders, Chart, GraphType, LegendPosition, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Interior dots drawn on each planned → installed connector.
pub const CONNECTOR_DOTS: usize = 8;

/// Most bar labels drawn on the height chart.  With more piles every
/// `ceil(n / MAX_BAR_LABELS)`-th bar is labelled.
pub const MAX_BAR_LABELS: usize = 12;

// ── Position plot ─────────────────────────────────────────────────────────────

/// Point series for the planned vs. installed scatter plot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionPlot {
    pub planned: Vec<(f64, f64)>,
    pub installed_in: Vec<(f64, f64)>,
    pub installed_out: Vec<(f64, f64)>,
    /// Dots along every planned → installed segment, all records combined.
    pub connectors: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl PositionPlot {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut plot = PositionPlot::default();
        for record in dataset {
            let planned = (record.planned().x, record.planned().y);
            let installed = (record.installed().x, record.installed().y);
            plot.planned.push(planned);
            if record.status().is_in_tolerance() {
                plot.installed_in.push(installed);
            } else {
                plot.installed_out.push(installed);
            }
            plot.connectors
                .extend(connector_points(planned, installed, CONNECTOR_DOTS));
        }

        let xs = dataset
            .iter()
            .flat_map(|r| [r.planned().x, r.installed().x]);
        let ys = dataset
            .iter()
            .flat_map(|r| [r.planned().y, r.installed().y]);
        plot.x_bounds = padded_bounds(xs);
        plot.y_bounds = padded_bounds(ys);
        plot
    }
}

/// Evenly spaced points strictly between `from` and `to`.
pub fn connector_points(from: (f64, f64), to: (f64, f64), dots: usize) -> Vec<(f64, f64)> {
    let steps = (dots + 1) as f64;
    (1..=dots)
        .map(|i| {
            let t = i as f64 / steps;
            (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
        })
        .collect()
}

/// Min/max of `values` widened by 10 % of the span, or by 1 m when every
/// value is identical.  Non-finite values are skipped and the result is
/// clamped to the finite `f64` range.
pub fn padded_bounds(values: impl IntoIterator<Item = f64>) -> [f64; 2] {
    let mut iter = values.into_iter().filter(|v| v.is_finite());
    let Some(first) = iter.next() else {
        return [-1.0, 1.0];
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    // Halved so the span itself cannot overflow.
    let half_span = max / 2.0 - min / 2.0;
    let pad = if half_span > 0.0 { half_span * 0.2 } else { 1.0 };
    [(min - pad).max(f64::MIN), (max + pad).min(f64::MAX)]
}

fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| format_meters(*v, 2))
        .collect()
}

/// Render the planned vs. installed scatter plot.
pub fn render_position_plot(frame: &mut Frame, area: Rect, dataset: &Dataset, theme: &Theme) {
    let plot = PositionPlot::from_dataset(dataset);

    // Connectors go first so markers are drawn on top of them.
    let mut series = vec![widgets::Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(theme.connector)
        .data(&plot.connectors)];
    series.push(
        widgets::Dataset::default()
            .name("Planned Position")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.planned)
            .data(&plot.planned),
    );
    if !plot.installed_in.is_empty() {
        series.push(
            widgets::Dataset::default()
                .name("Installed Position (In Tolerance)")
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(theme.in_tolerance)
                .data(&plot.installed_in),
        );
    }
    if !plot.installed_out.is_empty() {
        series.push(
            widgets::Dataset::default()
                .name("Installed Position (Out of Tolerance)")
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(theme.out_of_tolerance)
                .data(&plot.installed_out),
        );
    }

    let chart = Chart::new(series)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Planned vs Installed Solar Pile Positions "),
        )
        .x_axis(
            Axis::default()
                .title("X Position (m)")
                .style(theme.axis)
                .bounds(plot.x_bounds)
                .labels(axis_labels(plot.x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Y Position (m)")
                .style(theme.axis)
                .bounds(plot.y_bounds)
                .labels(axis_labels(plot.y_bounds)),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(2, 3), Constraint::Ratio(1, 2)));

    frame.render_widget(chart, area);
}

// ── Height deviation chart ────────────────────────────────────────────────────

/// Bar and reference-line series for the height deviation chart.
///
/// Bar `i` (0-based) sits at `x = i + 1`, leaving a free slot at either end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeightChart {
    pub within: Vec<(f64, f64)>,
    pub outside: Vec<(f64, f64)>,
    pub upper_limit: Vec<(f64, f64)>,
    pub lower_limit: Vec<(f64, f64)>,
    pub labels: Vec<String>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl HeightChart {
    pub fn from_dataset(dataset: &Dataset, limits: &ToleranceLimits) -> Self {
        let n = dataset.len();
        // Axis labels are spread evenly over the bounds, so the right bound
        // is rounded up to a multiple of the label stride to keep every
        // label under its bar.
        let stride = n.div_ceil(MAX_BAR_LABELS).max(1);
        let slots = (n + 1).div_ceil(stride) * stride;
        let mut chart = HeightChart {
            x_bounds: [0.0, slots as f64],
            ..Default::default()
        };

        for (i, record) in dataset.iter().enumerate() {
            let bar = ((i + 1) as f64, record.deviation().height);
            if limits.height_within(record.deviation().height) {
                chart.within.push(bar);
            } else {
                chart.outside.push(bar);
            }
        }

        chart.upper_limit = vec![(chart.x_bounds[0], limits.vertical), (chart.x_bounds[1], limits.vertical)];
        chart.lower_limit = vec![(chart.x_bounds[0], -limits.vertical), (chart.x_bounds[1], -limits.vertical)];

        chart.labels = (0..=slots)
            .step_by(stride)
            .map(|slot| match slot.checked_sub(1).and_then(|i| dataset.get(i)) {
                Some(record) => record.pile_id().to_string(),
                None => String::new(),
            })
            .collect();

        let heights = dataset
            .iter()
            .map(|r| r.deviation().height)
            .chain([limits.vertical, -limits.vertical, 0.0]);
        chart.y_bounds = padded_bounds(heights);
        chart
    }
}

/// Render the per-pile height deviation bars with ±limit reference lines.
pub fn render_height_chart(
    frame: &mut Frame,
    area: Rect,
    dataset: &Dataset,
    limits: &ToleranceLimits,
    theme: &Theme,
) {
    let chart_data = HeightChart::from_dataset(dataset, limits);

    let series = vec![
        widgets::Dataset::default()
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(theme.height_bar_style(true))
            .data(&chart_data.within),
        widgets::Dataset::default()
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(theme.height_bar_style(false))
            .data(&chart_data.outside),
        widgets::Dataset::default()
            .name(format!("Tolerance Limit (+{}m)", limits.vertical))
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.limit_line)
            .data(&chart_data.upper_limit),
        widgets::Dataset::default()
            .name(format!("Tolerance Limit (-{}m)", limits.vertical))
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.limit_line)
            .data(&chart_data.lower_limit),
    ];

    let chart = Chart::new(series)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Height Deviation per Pile "),
        )
        .x_axis(
            Axis::default()
                .title("Pile ID")
                .style(theme.axis)
                .bounds(chart_data.x_bounds)
                .labels(chart_data.labels.clone()),
        )
        .y_axis(
            Axis::default()
                .title("Height Deviation (m)")
                .style(theme.axis)
                .bounds(chart_data.y_bounds)
                .labels(axis_labels(chart_data.y_bounds)),
        )
        .legend_position(Some(LegendPosition::BottomRight))
        .hidden_legend_constraints((Constraint::Ratio(2, 3), Constraint::Ratio(1, 2)));

    frame.render_widget(chart, area);
}

// ── Combined section ──────────────────────────────────────────────────────────

/// Render both charts side by side, or a placeholder for an empty dataset.
pub fn render_deviation_analysis(
    frame: &mut Frame,
    area: Rect,
    dataset: &Dataset,
    limits: &ToleranceLimits,
    theme: &Theme,
) {
    if dataset.is_empty() {
        render_no_data(frame, area, theme);
        return;
    }

    let [left, right] = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .areas(area);
    render_position_plot(frame, left, dataset, theme);
    render_height_chart(frame, right, dataset, limits, theme);
}

/// Placeholder shown instead of the charts before the first measurement.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No measurements yet", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in the form and press Enter to add a pile.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Deviation Analysis "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
