//! Project schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub gas: GasDef,
    pub inlet: InletDef,
    pub compressor: CompressorDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<RequirementsDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridDef>,
    #[serde(default)]
    pub search: SearchDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<DesignDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum GasDef {
    Pure { species: String },
    Mixture { fractions: Vec<(String, f64)> },
    /// Named mixture, e.g. `methane_combustion_products`.
    Preset { name: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InletDef {
    pub mass_flow_kg_s: f64,
    pub t_stag_k: f64,
    pub p_stag_pa: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequirementsDef {
    pub pi_c: f64,
    pub min_eta_ad: f64,
    #[serde(default = "default_precision")]
    pub precision: f64,
}

fn default_precision() -> f64 {
    0.05
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompressorDef {
    pub stages: Vec<StageDef>,
    /// Fixed first-stage tip diameter; sized from continuity when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d_out_1_m: Option<f64>,
    #[serde(default = "default_duct_loss")]
    pub duct_loss_in: f64,
    #[serde(default = "default_duct_loss")]
    pub duct_loss_out: f64,
    #[serde(default = "default_k_h")]
    pub k_h: f64,
}

fn default_duct_loss() -> f64 {
    0.04
}

fn default_k_h() -> f64 {
    0.98
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StageDef {
    #[serde(default)]
    pub diameter_law: DiameterLawDef,
    #[serde(default)]
    pub rotor_law: VelocityLawDef,
    #[serde(default)]
    pub stator_law: VelocityLawDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotor_row: Option<BladeRowDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stator_row: Option<BladeRowDef>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DiameterLawDef {
    #[default]
    ConstantOuter,
    ConstantInner,
    ConstantMean,
    Custom {
        form_coef: f64,
    },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum VelocityLawDef {
    #[default]
    ConstantCirculation,
    SolidBody,
    Exponential {
        power: f64,
    },
    ConstantReactivity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BladeRowDef {
    pub elongation: f64,
    pub windage: f64,
    pub mean_lattice_density: f64,
}

/// Values of one swept parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AxisDef {
    Value(f64),
    List(Vec<f64>),
    /// `num_points` values with both ends included.
    Linspace {
        start: f64,
        end: f64,
        num_points: usize,
    },
    /// `start, start + step, ...` below `stop`.
    Arange { start: f64, stop: f64, step: f64 },
}

impl AxisDef {
    pub fn values(&self) -> Result<Vec<f64>, cf_core::CfError> {
        match self {
            AxisDef::Value(v) => Ok(vec![*v]),
            AxisDef::List(v) => Ok(v.clone()),
            AxisDef::Linspace {
                start,
                end,
                num_points,
            } => Ok(cf_core::numeric::linspace(*start, *end, *num_points)),
            AxisDef::Arange { start, stop, step } => cf_core::numeric::arange(*start, *stop, *step),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridDef {
    pub u_out_1: AxisDef,
    pub d_rel_1: AxisDef,
    pub h_t_rel_first: AxisDef,
    pub h_t_rel_last: AxisDef,
    pub h_t_rel_max: AxisDef,
    pub h_t_rel_max_coord: AxisDef,
    pub eta_ad_first: AxisDef,
    pub eta_ad_last: AxisDef,
    pub eta_ad_max: AxisDef,
    pub eta_ad_max_coord: AxisDef,
    pub c_a_rel_first: AxisDef,
    pub c_a_rel_last: AxisDef,
    pub r_mean_first: AxisDef,
    pub r_mean_last: AxisDef,
    #[serde(default = "default_inlet_alpha_axis")]
    pub inlet_alpha_deg: AxisDef,
}

fn default_inlet_alpha_axis() -> AxisDef {
    AxisDef::Value(90.0)
}

impl GridDef {
    /// Axes paired with their field names.
    pub fn axes(&self) -> [(&'static str, &AxisDef); 15] {
        [
            ("u_out_1", &self.u_out_1),
            ("d_rel_1", &self.d_rel_1),
            ("h_t_rel_first", &self.h_t_rel_first),
            ("h_t_rel_last", &self.h_t_rel_last),
            ("h_t_rel_max", &self.h_t_rel_max),
            ("h_t_rel_max_coord", &self.h_t_rel_max_coord),
            ("eta_ad_first", &self.eta_ad_first),
            ("eta_ad_last", &self.eta_ad_last),
            ("eta_ad_max", &self.eta_ad_max),
            ("eta_ad_max_coord", &self.eta_ad_max_coord),
            ("c_a_rel_first", &self.c_a_rel_first),
            ("c_a_rel_last", &self.c_a_rel_last),
            ("r_mean_first", &self.r_mean_first),
            ("r_mean_last", &self.r_mean_last),
            ("inlet_alpha_deg", &self.inlet_alpha_deg),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchDef {
    #[serde(default = "default_eps")]
    pub eps: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_batch")]
    pub chunk_size: usize,
    #[serde(default = "default_batch")]
    pub report_every: usize,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for SearchDef {
    fn default() -> Self {
        Self {
            eps: default_eps(),
            max_iterations: default_max_iterations(),
            chunk_size: default_batch(),
            report_every: default_batch(),
            parallel: false,
        }
    }
}

fn default_eps() -> f64 {
    0.01
}

fn default_max_iterations() -> usize {
    100
}

fn default_batch() -> usize {
    1000
}

/// One explicit design point, solved directly without a search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignDef {
    pub u_out_1: f64,
    pub d_rel_1: f64,
    #[serde(default = "default_inlet_alpha_deg")]
    pub inlet_alpha_deg: f64,
    pub h_t_rel: Vec<f64>,
    pub eta_ad: Vec<f64>,
    pub r_mean: Vec<f64>,
    pub c_a_rel: Vec<f64>,
}

fn default_inlet_alpha_deg() -> f64 {
    90.0
}
