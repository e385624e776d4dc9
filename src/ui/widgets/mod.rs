mod sparkline;

pub use sparkline::SeriesSparkline;
