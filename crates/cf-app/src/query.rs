//! Query helpers for loaded runs.

use cf_results::DesignRecord;

/// Spread of the accepted designs of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub accepted: usize,
    pub pi_c_range: Option<(f64, f64)>,
    pub eta_ad_range: Option<(f64, f64)>,
    pub d_out_1_range: Option<(f64, f64)>,
}

fn range(records: &[DesignRecord], value: impl Fn(&DesignRecord) -> f64) -> Option<(f64, f64)> {
    records.iter().map(value).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub fn get_run_summary(records: &[DesignRecord]) -> RunSummary {
    RunSummary {
        accepted: records.len(),
        pi_c_range: range(records, |r| r.pi_c),
        eta_ad_range: range(records, |r| r.eta_ad),
        d_out_1_range: range(records, |r| r.d_out_1),
    }
}

/// The `top` designs with the highest overall efficiency, best first.
/// Ties keep grid order.
pub fn best_designs(records: &[DesignRecord], top: usize) -> Vec<&DesignRecord> {
    let mut sorted: Vec<&DesignRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.eta_ad.total_cmp(&a.eta_ad));
    sorted.truncate(top);
    sorted
}
