//! Series sparkline widget for the legend panel

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different levels (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A one-row sparkline of the most recent values of a series
pub struct SeriesSparkline<'a> {
    /// Values in chronological order
    values: &'a [f64],
    /// Style for the sparkline
    style: Style,
}

impl<'a> SeriesSparkline<'a> {
    pub fn new(values: &'a [f64]) -> Self {
        Self {
            values,
            style: Style::default().fg(Color::Cyan),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The trailing `width` values, i.e. what fits in the widget
    fn visible(&self, width: usize) -> &'a [f64] {
        let start = self.values.len().saturating_sub(width);
        &self.values[start..]
    }

    fn value_to_block(value: f64, min: f64, max: f64) -> char {
        let span = max - min;
        let normalized = if span > 0.0 {
            ((value - min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for SeriesSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let visible = self.visible(area.width as usize);
        let min = visible.iter().copied().fold(f64::INFINITY, f64::min);
        let max = visible.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        for (i, value) in visible.iter().enumerate() {
            let block = Self::value_to_block(*value, min, max);
            let x = area.x + i as u16;
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(block).set_style(self.style);
            }
        }
    }
}
