//! Search progress bookkeeping and reporting sinks.

use std::time::{Duration, Instant};

use tracing::info;

use crate::grid::DesignPoint;
use crate::validate::Verdict;

/// What happened to one grid point.
#[derive(Clone, Debug, PartialEq)]
pub enum CandidateOutcome {
    /// Building or solving the candidate failed.
    Failed { reason: String },
    /// The candidate solved and was checked against the requirements.
    Judged {
        pi_c: f64,
        eta_ad: f64,
        verdict: Verdict,
    },
}

/// Snapshot of the search counters.
///
/// The `pi_c` and `eta_ad` ranges cover the candidates judged since the
/// previous report.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchProgress {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub quasi_valid: usize,
    pub valid: usize,
    pub pi_c_range: Option<(f64, f64)>,
    pub eta_ad_range: Option<(f64, f64)>,
    pub elapsed: Duration,
    pub time_left: Option<Duration>,
}

impl SearchProgress {
    pub fn fraction_complete(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Receives search events. Implementations cannot fail the search.
pub trait ProgressSink {
    fn on_evaluation(&mut self, _index: usize, _point: &DesignPoint, _outcome: &CandidateOutcome) {}

    fn on_report(&mut self, progress: &SearchProgress);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_report(&mut self, _progress: &SearchProgress) {}
}

/// Logs periodic reports through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn on_report(&mut self, p: &SearchProgress) {
        info!("processed {}/{} variants", p.processed, p.total);
        info!(
            "quasi-valid: {}, valid: {}, failed: {}",
            p.quasi_valid, p.valid, p.failed
        );
        if let Some((lo, hi)) = p.pi_c_range {
            info!("pi_c: min {lo:.4}, max {hi:.4}");
        }
        if let Some((lo, hi)) = p.eta_ad_range {
            info!("eta_ad: min {lo:.4}, max {hi:.4}");
        }
        match p.time_left {
            Some(left) => info!("time left: {:.1} min", left.as_secs_f64() / 60.0),
            None => info!("time left: unknown"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Window {
    pi_c: Option<(f64, f64)>,
    eta_ad: Option<(f64, f64)>,
}

fn widen(range: Option<(f64, f64)>, v: f64) -> Option<(f64, f64)> {
    if !v.is_finite() {
        return range;
    }
    Some(match range {
        None => (v, v),
        Some((lo, hi)) => (lo.min(v), hi.max(v)),
    })
}

/// Counts outcomes and decides when a report is due.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    total: usize,
    report_every: usize,
    started: Option<Instant>,
    processed: usize,
    failed: usize,
    quasi_valid: usize,
    valid: usize,
    window: Window,
}

impl ProgressTracker {
    pub fn new(total: usize, report_every: usize) -> Self {
        Self {
            total,
            report_every: report_every.max(1),
            started: None,
            processed: 0,
            failed: 0,
            quasi_valid: 0,
            valid: 0,
            window: Window::default(),
        }
    }

    /// Count one outcome; returns a report every `report_every` candidates
    /// and then clears the window ranges.
    pub fn record(&mut self, outcome: &CandidateOutcome) -> Option<SearchProgress> {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
        self.processed += 1;
        match outcome {
            CandidateOutcome::Failed { .. } => self.failed += 1,
            CandidateOutcome::Judged {
                pi_c,
                eta_ad,
                verdict,
            } => {
                self.window.pi_c = widen(self.window.pi_c, *pi_c);
                self.window.eta_ad = widen(self.window.eta_ad, *eta_ad);
                if verdict.is_quasi_valid() {
                    self.quasi_valid += 1;
                }
                if verdict.is_valid() {
                    self.valid += 1;
                }
            }
        }
        if self.processed % self.report_every == 0 {
            Some(self.take_report())
        } else {
            None
        }
    }

    /// Report for the candidates processed since the last one, if any.
    pub fn finish(&mut self) -> Option<SearchProgress> {
        if self.processed > 0 && self.processed % self.report_every != 0 {
            Some(self.take_report())
        } else {
            None
        }
    }

    fn take_report(&mut self) -> SearchProgress {
        let report = self.snapshot();
        self.window = Window::default();
        report
    }

    pub fn snapshot(&self) -> SearchProgress {
        let elapsed = self.started.map(|t| t.elapsed()).unwrap_or_default();
        let time_left = (self.processed > 0).then(|| {
            let remaining = self.total.saturating_sub(self.processed) as f64;
            elapsed.mul_f64(remaining / self.processed as f64)
        });
        SearchProgress {
            total: self.total,
            processed: self.processed,
            failed: self.failed,
            quasi_valid: self.quasi_valid,
            valid: self.valid,
            pi_c_range: self.window.pi_c,
            eta_ad_range: self.window.eta_ad,
            elapsed,
            time_left,
        }
    }
}
