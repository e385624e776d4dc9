//! Chart output for coronagraph
//!
//! Series are either shown in an interactive terminal chart (ratatui) or
//! written to a PNG file. Both outputs share the same color palette so a
//! region keeps its color across them.

pub mod chart;
pub mod png;
pub mod widgets;

pub use chart::ChartView;
pub use png::save_chart;

use std::io;
use std::panic;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, style::Color, Terminal};

use crate::error::{Error, Result};

/// Line colors, assigned to series in order
pub const PALETTE: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

/// Terminal color for the series at `index`
pub fn palette_color(index: usize) -> Color {
    let [r, g, b] = PALETTE[index % PALETTE.len()];
    Color::Rgb(r, g, b)
}

/// Sets up a panic hook that restores the terminal before printing the panic message.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Shows the chart full-screen until the user quits
pub fn run_display(mut view: ChartView) -> Result<()> {
    let tui_err = |e: io::Error| Error::io("driving the terminal", e);

    setup_panic_hook();

    enable_raw_mode().map_err(tui_err)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(tui_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(tui_err)?;

    let result = event_loop(&mut terminal, &mut view);

    // Restore the terminal even if the loop failed
    disable_raw_mode().map_err(tui_err)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(tui_err)?;

    result.map_err(tui_err)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view: &mut ChartView,
) -> io::Result<()> {
    while !view.should_quit {
        terminal.draw(|f| chart::render(f, view))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    view.handle_key(key);
                }
            }
        }
    }
    Ok(())
}
