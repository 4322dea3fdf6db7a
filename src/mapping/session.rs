// src/mapping/session.rs

use crate::domain::SaleRecord;
use crate::mapping::markers::{Bounds, Marker, MarkerKind};
use crate::mapping::stagger::dispatch_staggered;
use crate::mapping::{GeocodeError, Geocoder, LatLng};
use crate::templates::info_panel;
use serde::Serialize;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// What a finished lookup should turn into.
#[derive(Debug, Clone)]
pub enum Target {
    Comp {
        info_html: String,
        url: Option<String>,
    },
    Subject,
}

#[derive(Debug)]
pub struct PlotOutcome {
    pub generation: u64,
    pub address: String,
    pub target: Target,
    pub result: Result<LatLng, GeocodeError>,
}

/// Lookups started by one call to `MapSession::start_run`.
pub struct PlotRun {
    outcomes: Receiver<PlotOutcome>,
}

impl PlotRun {
    /// Blocks until every lookup of this run has reported back.
    pub fn outcomes(&self) -> impl Iterator<Item = PlotOutcome> + '_ {
        self.outcomes.iter()
    }
}

/// Serializable picture of the map after a run.
#[derive(Debug, Serialize)]
pub struct MapView<'a> {
    pub markers: &'a [Marker],
    pub subject: Option<&'a Marker>,
    pub viewport: Option<Bounds>,
    pub skipped: usize,
}

/// Owns everything placed on one map: comp markers, the subject marker and
/// the viewport. Starting a run wipes all of it first.
#[derive(Debug, Default)]
pub struct MapSession {
    generation: u64,
    markers: Vec<Marker>,
    subject: Option<Marker>,
    viewport: Option<Bounds>,
    skipped: usize,
}

impl MapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.subject = None;
        self.viewport = None;
        self.skipped = 0;
    }

    /// Clears the map and fires one geocode per record, `step` apart, plus
    /// the subject (if any) straight away.
    ///
    /// Lookups from a previous run can't be called back; their outcomes carry
    /// the old generation and `apply` ignores them.
    pub fn start_run(
        &mut self,
        records: &[SaleRecord],
        subject_address: Option<&str>,
        geocoder: Arc<dyn Geocoder>,
        step: Duration,
    ) -> PlotRun {
        self.clear();
        self.generation += 1;
        let generation = self.generation;

        let jobs: Vec<(String, Target)> = records
            .iter()
            .map(|r| {
                let target = Target::Comp {
                    info_html: info_panel(r).into_string(),
                    url: r.property_url.clone(),
                };
                (r.full_address(), target)
            })
            .collect();

        let (tx, rx) = mpsc::channel();
        let lookup = move |(address, target): (String, Target)| {
            let result = geocoder.geocode(&address);
            PlotOutcome {
                generation,
                address,
                target,
                result,
            }
        };

        if let Some(addr) = subject_address.map(str::trim).filter(|a| !a.is_empty()) {
            let lookup = lookup.clone();
            dispatch_staggered(
                vec![(addr.to_string(), Target::Subject)],
                Duration::ZERO,
                tx.clone(),
                lookup,
            );
        }
        dispatch_staggered(jobs, step, tx, lookup);

        PlotRun { outcomes: rx }
    }

    /// Places the marker for one finished lookup. Returns whether anything
    /// was placed; failed lookups and stale runs are dropped quietly.
    pub fn apply(&mut self, outcome: PlotOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(address = %outcome.address, "Ignoring geocode from an earlier run");
            return false;
        }

        let position = match outcome.result {
            Ok(p) => p,
            Err(e) => {
                debug!(address = %outcome.address, "Geocode skipped: {e}");
                self.skipped += 1;
                return false;
            }
        };

        match outcome.target {
            Target::Comp { info_html, url } => self.markers.push(Marker {
                kind: MarkerKind::Comp,
                address: outcome.address,
                position,
                info_html: Some(info_html),
                url,
            }),
            Target::Subject => {
                self.subject = Some(Marker {
                    kind: MarkerKind::Subject,
                    address: outcome.address,
                    position,
                    info_html: None,
                    url: None,
                })
            }
        }

        self.fit(position);
        true
    }

    /// `start_run` followed by placing every outcome as it arrives.
    pub fn plot(
        &mut self,
        records: &[SaleRecord],
        subject_address: Option<&str>,
        geocoder: Arc<dyn Geocoder>,
        step: Duration,
    ) -> MapView<'_> {
        let run = self.start_run(records, subject_address, geocoder, step);
        for outcome in run.outcomes() {
            self.apply(outcome);
        }
        self.view()
    }

    fn fit(&mut self, p: LatLng) {
        match self.viewport.as_mut() {
            Some(b) => b.extend(p),
            None => self.viewport = Some(Bounds::around(p)),
        }
    }

    pub fn view(&self) -> MapView<'_> {
        MapView {
            markers: &self.markers,
            subject: self.subject.as_ref(),
            viewport: self.viewport,
            skipped: self.skipped,
        }
    }
}
