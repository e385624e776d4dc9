//! coronagraph - chart Italian regional COVID-19 case counts
//!
//! Keeps a local snapshot of the Civil Protection dataset and draws the
//! requested regions either in the terminal or to a PNG file.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use coronagraph::app::{chart_title, App};
use coronagraph::cache::DataStore;
use coronagraph::cli::Cli;
use coronagraph::dates::SystemClock;
use coronagraph::error::{Error, Result};
use coronagraph::ui::{self, ChartView};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("coronagraph=warn"),
        1 => EnvFilter::new("coronagraph=info"),
        _ => EnvFilter::new("coronagraph=debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let paths = cli
        .path_config()
        .ok_or_else(|| Error::Config("no home directory to keep the dataset in".to_string()))?;
    let store = DataStore::new(paths, &cli.source_config());
    let app = App::new(store, SystemClock);

    let (request, series) = app.prepare(&cli.plot_args(), cli.force).await?;

    let title = chart_title(&request);
    if cli.save {
        let path = ui::save_chart(&series, &title, &app.store().paths().images_dir())?;
        println!("Saved @ {}", path.display());
        Ok(())
    } else {
        ui::run_display(ChartView::new(series, title))
    }
}
