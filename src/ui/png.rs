//! Saved chart images
//!
//! Plots every series as a labelled line over a grid and writes a PNG with a
//! random alphanumeric name into the images directory.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::info;

use super::PALETTE;
use crate::error::{Error, Result};
use crate::series::Series;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;

/// Length of the random part of an image name
const NAME_LEN: usize = 10;

/// Random `<10 alphanumerics>.png` file name
pub fn random_image_name<R: Rng>(rng: &mut R) -> String {
    let stem: String = rng
        .sample_iter(&Alphanumeric)
        .take(NAME_LEN)
        .map(char::from)
        .collect();
    format!("{}.png", stem)
}

/// Draws the series and saves them under `images_dir`
///
/// # Returns
/// The path of the written image
pub fn save_chart(series: &[Series], title: &str, images_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(images_dir)
        .map_err(|e| Error::io(format!("creating {}", images_dir.display()), e))?;

    let path = images_dir.join(random_image_name(&mut rand::thread_rng()));
    let render_error = |e: DrawingAreaErrorKind<_>| Error::Render(format!("{}: {}", path.display(), e));

    let root = BitMapBackend::new(&path, (WIDTH, HEIGHT)).into_drawing_area();
    draw_chart(&root, series, title).map_err(render_error)?;
    root.present().map_err(render_error)?;
    drop(root);

    for (i, s) in series.iter().enumerate() {
        let [r, g, b] = PALETTE[i % PALETTE.len()];
        info!(series = %s.label, color = %format!("#{:02x}{:02x}{:02x}", r, g, b), "plotted");
    }
    Ok(path)
}

/// Axis ranges covering every point, with zero always on the y axis
fn plot_ranges(series: &[Series]) -> (Range<f64>, Range<f64>) {
    let longest = series.iter().map(|s| s.points.len()).max().unwrap_or(0);
    let x_max = longest.saturating_sub(1).max(1) as f64;

    let y_min = series.iter().filter_map(Series::min).fold(0.0, f64::min);
    let y_max = series.iter().filter_map(Series::max).fold(0.0, f64::max);
    let y_max = if y_max > y_min { y_max } else { y_min + 1.0 };

    (0.0..x_max, y_min..y_max * 1.05)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[Series],
    title: &str,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (x_range, y_range) = plot_ranges(series);
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Sample")
        .y_desc("Cases")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()?;

    for (i, s) in series.iter().enumerate() {
        let [r, g, b] = PALETTE[i % PALETTE.len()];
        let color = RGBColor(r, g, b);
        let points: Vec<(f64, f64)> = s.points.iter().enumerate().map(|(x, &y)| (x as f64, y)).collect();

        // A lone sample has no segment to draw
        if let [only] = points.as_slice() {
            chart.draw_series(std::iter::once(Circle::new(*only, 3, color.filled())))?;
        }
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }
    Ok(())
}
