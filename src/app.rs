//! The chart pipeline
//!
//! Validates a request, makes sure a fresh enough snapshot is on disk, loads
//! it, and turns it into the series to draw.

use tracing::{debug, info};

use crate::cache::DataStore;
use crate::dates::Clock;
use crate::error::Result;
use crate::series::{build_series, Series};
use crate::validate::{validate, PlotArgs, PlotRequest};

/// Wires the store and the clock together for one invocation
pub struct App<C: Clock> {
    store: DataStore,
    clock: C,
}

impl<C: Clock> App<C> {
    pub fn new(store: DataStore, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Runs the whole pipeline up to, but not including, rendering
    ///
    /// Validation happens first: an invalid request never triggers a
    /// download. A failed refresh aborts the run rather than falling back
    /// to the previous snapshot.
    pub async fn prepare(&self, args: &PlotArgs, force: bool) -> Result<(PlotRequest, Vec<Series>)> {
        let now = self.clock.now();
        let request = validate(args, now.date())?;
        debug!(?request, "request validated");

        let stale = self.store.needs_refresh(now, force);
        self.store.ensure_fresh(stale, now).await?;

        let dataset = self.store.load()?;
        info!(records = dataset.len(), regions = request.regions.len(), "building series");
        let series = build_series(&dataset, &request);
        Ok((request, series))
    }
}

/// Title for a chart of the given request
pub fn chart_title(request: &PlotRequest) -> String {
    let kind = if request.derivative {
        "Daily new cases"
    } else {
        "Total cases"
    };
    format!("{} before {}", kind, request.cutoff.format("%Y-%m-%d"))
}
