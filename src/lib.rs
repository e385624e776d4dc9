//! coronagraph library
//!
//! Downloads and caches the Italian regional COVID-19 dataset and turns it
//! into per-region case series for charting.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod dates;
pub mod error;
pub mod series;
pub mod ui;
pub mod validate;

pub use error::{Error, Result};
