//! Command-line interface parsing for coronagraph
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the raw chart request and runtime configuration used by the pipeline.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{PathConfig, SourceConfig};
use crate::data::{FetcherKind, DEFAULT_SOURCE_URL};
use crate::validate::PlotArgs;

/// Plot generator for COVID-19 data by the Italian Department of Civil
/// Protection; day_0 = 2020-02-24.
#[derive(Parser, Debug)]
#[command(name = "coronagraph")]
#[command(about = "Plot Italian regional COVID-19 case counts; day_0 = 2020-02-24")]
#[command(version)]
pub struct Cli {
    /// Name(s) of one or more regions to plot. By default every region is plotted
    #[arg(short = 'r', long = "regione", value_name = "REGION", num_args = 1..)]
    pub regions: Vec<String>,

    /// Plot graph(s) up to the passed date (exclusive), in the yyyy-mm-dd format. Defaults to today
    #[arg(short = 'd', long = "data", value_name = "DATE")]
    pub date: Option<String>,

    /// Plot graph(s) using the last n data samples, with 0 <= n <= #days from day_0
    #[arg(short = 'l', long, value_name = "N", allow_negative_numbers = true)]
    pub last: Option<i64>,

    /// Plot the rate of change of the growth instead of the cumulative total
    #[arg(short = 'c', long)]
    pub derivative: bool,

    /// Save the chart as an image instead of opening it in the terminal
    #[arg(short = 's', long)]
    pub save: bool,

    /// Force a fresh download of the data
    #[arg(short = 'f', long)]
    pub force: bool,

    /// How to download the dataset
    #[arg(long, value_enum, default_value_t = FetcherKind::Http)]
    pub fetcher: FetcherKind,

    /// Directory holding the cached dataset and saved images
    #[arg(long, value_name = "PATH", env = "CORONAGRAPH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// URL of the regional dataset
    #[arg(long, value_name = "URL", default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The chart parameters still to be validated
    pub fn plot_args(&self) -> PlotArgs {
        PlotArgs {
            regions: self.regions.clone(),
            date: self.date.clone(),
            last: self.last,
            derivative: self.derivative,
        }
    }

    /// Storage locations, from `--data-dir` or the platform default
    pub fn path_config(&self) -> Option<PathConfig> {
        match &self.data_dir {
            Some(dir) => Some(PathConfig::with_dir(dir.clone())),
            None => PathConfig::new(),
        }
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            url: self.source_url.clone(),
            fetcher: self.fetcher,
        }
    }
}
