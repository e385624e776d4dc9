//! Interactive chart screen
//!
//! Draws every requested series as a line on a shared pair of axes, with a
//! side panel listing each series, its sparkline, and its latest value.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::widgets::SeriesSparkline;
use super::palette_color;
use crate::series::Series;

/// Number of labels drawn along each axis
const AXIS_LABELS: usize = 5;

/// Width of the side panel in columns
const PANEL_WIDTH: u16 = 34;

/// State of the chart screen
pub struct ChartView {
    /// Series to draw, in request order
    pub series: Vec<Series>,
    /// Title shown in the chart border
    pub title: String,
    /// Whether the side panel is visible
    pub show_panel: bool,
    /// Flag indicating the screen should close
    pub should_quit: bool,
    /// Points per series, precomputed for the chart widget
    points: Vec<Vec<(f64, f64)>>,
}

impl ChartView {
    pub fn new(series: Vec<Series>, title: impl Into<String>) -> Self {
        let points = series
            .iter()
            .map(|s| s.points.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect())
            .collect();
        Self {
            series,
            title: title.into(),
            show_panel: true,
            should_quit: false,
            points,
        }
    }

    pub fn handle_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('l') => self.show_panel = !self.show_panel,
            _ => {}
        }
    }

    /// Horizontal bounds: sample index 0 to the longest series
    pub fn x_bounds(&self) -> [f64; 2] {
        let longest = self.series.iter().map(|s| s.points.len()).max().unwrap_or(0);
        [0.0, longest.saturating_sub(1).max(1) as f64]
    }

    /// Vertical bounds covering every point, always including zero
    pub fn y_bounds(&self) -> [f64; 2] {
        let min = self.series.iter().filter_map(Series::min).fold(0.0, f64::min);
        let max = self.series.iter().filter_map(Series::max).fold(0.0, f64::max);
        if max > min {
            [min, max]
        } else {
            [min, min + 1.0]
        }
    }
}

/// Renders the chart screen
pub fn render(frame: &mut Frame, view: &ChartView) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let body = if view.show_panel {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(PANEL_WIDTH)])
            .split(chunks[0])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20)])
            .split(chunks[0])
    };

    render_chart(frame, body[0], view);
    if view.show_panel {
        render_panel(frame, body[1], view);
    }
    render_footer(frame, chunks[1]);
}

fn render_chart(frame: &mut Frame, area: Rect, view: &ChartView) {
    let datasets: Vec<Dataset> = view
        .series
        .iter()
        .zip(&view.points)
        .enumerate()
        .map(|(i, (series, points))| {
            Dataset::default()
                .name(series.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(palette_color(i)))
                .data(points)
        })
        .collect();

    let x_bounds = view.x_bounds();
    let y_bounds = view.y_bounds();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {} ", view.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("days")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("cases")
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    frame.render_widget(chart, area);
}

fn render_panel(frame: &mut Frame, area: Rect, view: &ChartView) {
    let block = Block::default()
        .title(" Regions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Two rows per series: label line, then sparkline
    for (i, series) in view.series.iter().enumerate() {
        let y = inner.y + (i as u16) * 2;
        if y + 1 >= inner.y + inner.height {
            break;
        }
        let color = palette_color(i);

        let latest = series
            .points
            .last()
            .map(|v| format_value(*v))
            .unwrap_or_else(|| "no data".to_string());
        let label = Line::from(vec![
            Span::styled("■ ", Style::default().fg(color)),
            Span::styled(series.label.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {}", latest), Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(label), Rect::new(inner.x, y, inner.width, 1));

        let sparkline = SeriesSparkline::new(&series.points).style(Style::default().fg(color));
        frame.render_widget(sparkline, Rect::new(inner.x + 2, y + 1, inner.width.saturating_sub(2), 1));
    }
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Line::from(vec![
        Span::styled(" q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit  "),
        Span::styled("l", Style::default().fg(Color::Yellow)),
        Span::raw(" toggle legend"),
    ]);
    frame.render_widget(Paragraph::new(footer), area);
}

/// Evenly spaced labels between the two bounds
fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let step = (bounds[1] - bounds[0]) / (AXIS_LABELS - 1) as f64;
    (0..AXIS_LABELS)
        .map(|i| Span::raw(format_value(bounds[0] + step * i as f64)))
        .collect()
}

/// Formats a value with thousands shortened to `k`
fn format_value(value: f64) -> String {
    if value.abs() >= 10_000.0 {
        format!("{:.0}k", value / 1000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_view() -> ChartView {
        ChartView::new(
            vec![
                Series::new("Lombardia", vec![1.0, 5.0, 10.0, 20.0]),
                Series::new("Veneto", vec![2.0, 3.0]),
            ],
            "Total cases",
        )
    }

    #[test]
    fn test_q_quits() {
        let mut view = sample_view();
        view.handle_key(key_event(KeyCode::Char('q')));
        assert!(view.should_quit);
    }

    #[test]
    fn test_esc_quits() {
        let mut view = sample_view();
        view.handle_key(key_event(KeyCode::Esc));
        assert!(view.should_quit);
    }

    #[test]
    fn test_l_toggles_panel() {
        let mut view = sample_view();
        assert!(view.show_panel);
        view.handle_key(key_event(KeyCode::Char('l')));
        assert!(!view.show_panel);
        view.handle_key(key_event(KeyCode::Char('l')));
        assert!(view.show_panel);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut view = sample_view();
        view.handle_key(key_event(KeyCode::Char('x')));
        assert!(!view.should_quit);
        assert!(view.show_panel);
    }

    #[test]
    fn test_bounds_cover_longest_series() {
        let view = sample_view();
        assert_eq!(view.x_bounds(), [0.0, 3.0]);
        assert_eq!(view.y_bounds(), [0.0, 20.0]);
    }

    #[test]
    fn test_bounds_include_negative_rates() {
        let view = ChartView::new(vec![Series::new("d(Lazio)/dx", vec![-4.0, 2.0])], "Rate");
        assert_eq!(view.y_bounds(), [-4.0, 2.0]);
    }

    #[test]
    fn test_bounds_for_empty_series_are_non_degenerate() {
        let view = ChartView::new(vec![Series::new("Molise", vec![])], "Total cases");
        assert_eq!(view.x_bounds(), [0.0, 1.0]);
        assert_eq!(view.y_bounds(), [0.0, 1.0]);
    }

    #[test]
    fn test_axis_labels_are_evenly_spaced() {
        let labels: Vec<String> = axis_labels([0.0, 20.0])
            .into_iter()
            .map(|span| span.content.into_owned())
            .collect();
        assert_eq!(labels, vec!["0", "5", "10", "15", "20"]);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(12.0), "12");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(250_000.0), "250k");
    }

    #[test]
    fn test_render_shows_title_and_regions() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let view = sample_view();

        terminal.draw(|f| render(f, &view)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Total cases"));
        assert!(text.contains("Regions"));
        assert!(text.contains("Veneto"));
    }
}
