//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub project_name: String,
    pub timestamp: String,
    pub solver_version: String,
    pub stage_count: usize,
    pub criteria: AcceptanceCriteria,
    pub totals: SearchTotals,
    pub batch_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AcceptanceCriteria {
    pub pi_c: f64,
    pub min_eta_ad: f64,
    pub precision: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchTotals {
    pub variants: usize,
    pub processed: usize,
    pub failed: usize,
    pub quasi_valid: usize,
    pub valid: usize,
    pub elapsed_s: f64,
}

/// Swept parameters of one design; the swirl angle is in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DesignParameters {
    pub u_out_1: f64,
    pub d_rel_1: f64,
    pub h_t_rel_first: f64,
    pub h_t_rel_last: f64,
    pub h_t_rel_max: f64,
    pub h_t_rel_max_coord: f64,
    pub eta_ad_first: f64,
    pub eta_ad_last: f64,
    pub eta_ad_max: f64,
    pub eta_ad_max_coord: f64,
    pub c_a_rel_first: f64,
    pub c_a_rel_last: f64,
    pub r_mean_first: f64,
    pub r_mean_last: f64,
    pub inlet_alpha_deg: f64,
}

impl DesignParameters {
    pub const COLUMNS: [&'static str; 15] = [
        "u_out_1",
        "d_rel_1",
        "H_t_rel_first",
        "H_t_rel_last",
        "H_t_rel_max",
        "H_t_rel_max_coord",
        "eta_ad_first",
        "eta_ad_last",
        "eta_ad_max",
        "eta_ad_max_coord",
        "c_a_rel_first",
        "c_a_rel_last",
        "R_mean_first",
        "R_mean_last",
        "inlet_alpha",
    ];

    /// Values in `COLUMNS` order.
    pub fn values(&self) -> [f64; 15] {
        [
            self.u_out_1,
            self.d_rel_1,
            self.h_t_rel_first,
            self.h_t_rel_last,
            self.h_t_rel_max,
            self.h_t_rel_max_coord,
            self.eta_ad_first,
            self.eta_ad_last,
            self.eta_ad_max,
            self.eta_ad_max_coord,
            self.c_a_rel_first,
            self.c_a_rel_last,
            self.r_mean_first,
            self.r_mean_last,
            self.inlet_alpha_deg,
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StageRecord {
    pub d_out_1: f64,
    pub d_rel_1: f64,
    pub pi_stag: f64,
}

/// One accepted design.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignRecord {
    pub grid_index: usize,
    pub batch: usize,
    pub pi_c: f64,
    pub eta_ad: f64,
    pub d_out_1: f64,
    pub parameters: DesignParameters,
    pub stages: Vec<StageRecord>,
}

impl DesignRecord {
    pub fn csv_header() -> String {
        let mut columns = vec!["grid_index", "pi_c", "eta_ad", "D_out_1"];
        columns.extend(DesignParameters::COLUMNS);
        columns.join(",")
    }

    pub fn csv_row(&self) -> String {
        let mut fields = vec![
            self.grid_index.to_string(),
            self.pi_c.to_string(),
            self.eta_ad.to_string(),
            self.d_out_1.to_string(),
        ];
        fields.extend(self.parameters.values().iter().map(|v| v.to_string()));
        fields.join(",")
    }
}
