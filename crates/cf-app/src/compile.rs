//! Compilation of project definitions into solver and optimizer objects.

use std::sync::Arc;

use cf_core::units::{k, kgps, pa};
use cf_gas::{GasModel, Mixture, Species};
use cf_optimizer::{DesignRequirements, MeanRadiusOptimizer, ParameterGrid, SearchOptions};
use cf_project::schema::{
    BladeRowDef, DiameterLawDef, GasDef, GridDef, Project, RequirementsDef, SearchDef, StageDef,
    VelocityLawDef,
};
use cf_solver::{CompressorBuilder, CompressorDesign, InletConditions, SolverConfig, StagePlan};
use cf_stage::{BladeRowParams, DiameterLaw, StageBlading, VelocityLawKind};

use crate::error::{AppError, AppResult};

pub fn parse_species(name: &str) -> AppResult<Species> {
    match name.to_ascii_uppercase().as_str() {
        "AIR" => Ok(Species::Air),
        "N2" | "NITROGEN" => Ok(Species::N2),
        "CO2" | "CARBONDIOXIDE" => Ok(Species::CO2),
        "H2O" | "WATER" | "WATERVAPOUR" => Ok(Species::H2O),
        _ => Err(AppError::Compile(format!("Unknown species: {}", name))),
    }
}

pub fn build_gas_model(gas: &GasDef) -> AppResult<Arc<dyn GasModel>> {
    let model: Arc<dyn GasModel> = match gas {
        GasDef::Pure { species } => {
            let model = parse_species(species)?
                .model()
                .map_err(|e| AppError::Compile(e.to_string()))?;
            Arc::new(model)
        }
        GasDef::Mixture { fractions } => {
            let mut parsed = Vec::with_capacity(fractions.len());
            let mut names = Vec::with_capacity(fractions.len());
            for (name, fraction) in fractions {
                let species = parse_species(name)?;
                names.push(species.name());
                parsed.push((species, *fraction));
            }
            let mixture = Mixture::new(names.join("+"), parsed)
                .map_err(|e| AppError::Compile(e.to_string()))?;
            Arc::new(mixture)
        }
        GasDef::Preset { name } => match name.as_str() {
            "methane_combustion_products" => Arc::new(
                Mixture::methane_combustion_products()
                    .map_err(|e| AppError::Compile(e.to_string()))?,
            ),
            _ => {
                return Err(AppError::Compile(format!("Unknown gas preset: {}", name)));
            }
        },
    };
    Ok(model)
}

fn diameter_law(def: DiameterLawDef) -> DiameterLaw {
    match def {
        DiameterLawDef::ConstantOuter => DiameterLaw::ConstantOuter,
        DiameterLawDef::ConstantInner => DiameterLaw::ConstantInner,
        DiameterLawDef::ConstantMean => DiameterLaw::ConstantMean,
        DiameterLawDef::Custom { form_coef } => DiameterLaw::Custom { form_coef },
    }
}

fn velocity_law(def: VelocityLawDef) -> VelocityLawKind {
    match def {
        VelocityLawDef::ConstantCirculation => VelocityLawKind::ConstantCirculation,
        VelocityLawDef::SolidBody => VelocityLawKind::SolidBody,
        VelocityLawDef::Exponential { power } => VelocityLawKind::Exponential { power },
        VelocityLawDef::ConstantReactivity => VelocityLawKind::ConstantReactivity,
    }
}

fn blade_row(def: Option<&BladeRowDef>) -> AppResult<Option<BladeRowParams>> {
    def.map(|row| {
        BladeRowParams::new(row.elongation, row.windage, row.mean_lattice_density)
            .map_err(|e| AppError::Compile(e.to_string()))
    })
    .transpose()
}

fn stage_plan(def: &StageDef) -> AppResult<StagePlan> {
    Ok(StagePlan {
        law: diameter_law(def.diameter_law),
        blading: StageBlading {
            rotor_law: velocity_law(def.rotor_law),
            stator_law: velocity_law(def.stator_law),
            rotor_row: blade_row(def.rotor_row.as_ref())?,
            stator_row: blade_row(def.stator_row.as_ref())?,
        },
    })
}

/// Builder carrying gas, inlet state, stage plans and duct losses; the
/// design targets are left for the grid or the explicit design point.
pub fn build_prototype(project: &Project) -> AppResult<CompressorBuilder> {
    let gas = build_gas_model(&project.gas)?;
    let compressor = &project.compressor;
    let plans = compressor
        .stages
        .iter()
        .map(stage_plan)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(CompressorBuilder::new(gas)
        .inlet(InletConditions {
            mass_flow: kgps(project.inlet.mass_flow_kg_s),
            t_stag: k(project.inlet.t_stag_k),
            p_stag: pa(project.inlet.p_stag_pa),
        })
        .stages(plans)
        .inlet_diameter(compressor.d_out_1_m)
        .duct_losses(compressor.duct_loss_in, compressor.duct_loss_out)
        .height_loss_factor(compressor.k_h))
}

/// Grid axes in SI units; the inlet swirl axis is converted to radians.
pub fn build_grid(grid: &GridDef) -> AppResult<ParameterGrid> {
    let axis = |name: &str, def: &cf_project::AxisDef| {
        def.values()
            .map_err(|e| AppError::Compile(format!("grid axis {}: {}", name, e)))
    };
    Ok(ParameterGrid {
        u_out_1: axis("u_out_1", &grid.u_out_1)?,
        d_rel_1: axis("d_rel_1", &grid.d_rel_1)?,
        h_t_rel_first: axis("h_t_rel_first", &grid.h_t_rel_first)?,
        h_t_rel_last: axis("h_t_rel_last", &grid.h_t_rel_last)?,
        h_t_rel_max: axis("h_t_rel_max", &grid.h_t_rel_max)?,
        h_t_rel_max_coord: axis("h_t_rel_max_coord", &grid.h_t_rel_max_coord)?,
        eta_ad_first: axis("eta_ad_first", &grid.eta_ad_first)?,
        eta_ad_last: axis("eta_ad_last", &grid.eta_ad_last)?,
        eta_ad_max: axis("eta_ad_max", &grid.eta_ad_max)?,
        eta_ad_max_coord: axis("eta_ad_max_coord", &grid.eta_ad_max_coord)?,
        c_a_rel_first: axis("c_a_rel_first", &grid.c_a_rel_first)?,
        c_a_rel_last: axis("c_a_rel_last", &grid.c_a_rel_last)?,
        r_mean_first: axis("r_mean_first", &grid.r_mean_first)?,
        r_mean_last: axis("r_mean_last", &grid.r_mean_last)?,
        inlet_alpha: axis("inlet_alpha_deg", &grid.inlet_alpha_deg)?
            .into_iter()
            .map(f64::to_radians)
            .collect(),
    })
}

pub fn build_requirements(def: &RequirementsDef) -> AppResult<DesignRequirements> {
    Ok(DesignRequirements::new(
        def.pi_c,
        def.min_eta_ad,
        def.precision,
    )?)
}

pub fn build_search_options(def: &SearchDef) -> SearchOptions {
    SearchOptions {
        solver: SolverConfig {
            eps: def.eps,
            max_iterations: def.max_iterations,
        },
        chunk_size: def.chunk_size,
        report_every: def.report_every,
        parallel: def.parallel,
        ..SearchOptions::default()
    }
}

pub fn compile_optimizer(project: &Project) -> AppResult<MeanRadiusOptimizer> {
    let grid = project
        .grid
        .as_ref()
        .ok_or_else(|| AppError::InvalidInput("Project has no parameter grid".to_string()))?;
    let requirements = project.requirements.as_ref().ok_or_else(|| {
        AppError::InvalidInput("Project has no design requirements".to_string())
    })?;
    Ok(MeanRadiusOptimizer::new(
        build_prototype(project)?,
        build_requirements(requirements)?,
        build_grid(grid)?,
        build_search_options(&project.search),
    )?)
}

/// The project's explicit design point, ready to solve.
pub fn compile_design(project: &Project) -> AppResult<CompressorDesign> {
    let design = project
        .design
        .as_ref()
        .ok_or_else(|| AppError::InvalidInput("Project has no design point".to_string()))?;
    Ok(build_prototype(project)?
        .tip_speed(design.u_out_1)
        .hub_ratio(design.d_rel_1)
        .inlet_alpha(design.inlet_alpha_deg.to_radians())
        .loading(design.h_t_rel.clone())
        .efficiency(design.eta_ad.clone())
        .reactivity(design.r_mean.clone())
        .axial_velocity(design.c_a_rel.clone())
        .build()?)
}
