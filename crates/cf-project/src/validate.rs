//! Project validation logic.

use crate::schema::{
    BladeRowDef, CompressorDef, DesignDef, DiameterLawDef, GasDef, GridDef, InletDef, Project,
    RequirementsDef, SearchDef, VelocityLawDef,
};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing section: {field} ({reason})")]
    Missing { field: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive"))
    }
}

fn open_unit(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 && v < 1.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must lie in (0, 1)"))
    }
}

fn swirl_angle(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 && v < 180.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must lie in (0, 180) degrees"))
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }
    if project.name.trim().is_empty() {
        return Err(invalid("name", "''", "must not be empty"));
    }

    validate_gas(&project.gas)?;
    validate_inlet(&project.inlet)?;
    validate_compressor(&project.compressor)?;
    validate_search(&project.search)?;

    if let Some(requirements) = &project.requirements {
        validate_requirements(requirements)?;
    }
    if let Some(grid) = &project.grid {
        if project.requirements.is_none() {
            return Err(ValidationError::Missing {
                field: "requirements".to_string(),
                reason: "a grid search needs design requirements".to_string(),
            });
        }
        validate_grid(grid)?;
    }
    if let Some(design) = &project.design {
        validate_design(design, project.compressor.stages.len())?;
    }
    if project.grid.is_none() && project.design.is_none() {
        return Err(ValidationError::Missing {
            field: "grid".to_string(),
            reason: "project needs a grid or an explicit design".to_string(),
        });
    }
    Ok(())
}

fn validate_gas(gas: &GasDef) -> Result<(), ValidationError> {
    match gas {
        GasDef::Pure { species } if species.trim().is_empty() => {
            Err(invalid("gas.species", "''", "must not be empty"))
        }
        GasDef::Preset { name } if name.trim().is_empty() => {
            Err(invalid("gas.name", "''", "must not be empty"))
        }
        GasDef::Mixture { fractions } => {
            if fractions.is_empty() {
                return Err(invalid("gas.fractions", "[]", "mixture has no components"));
            }
            for (species, fraction) in fractions {
                if !fraction.is_finite() || *fraction < 0.0 {
                    return Err(invalid(
                        format!("gas.fractions.{species}"),
                        fraction,
                        "must be non-negative",
                    ));
                }
            }
            let total: f64 = fractions.iter().map(|(_, f)| f).sum();
            if total <= 0.0 {
                return Err(invalid("gas.fractions", total, "fractions sum to zero"));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn validate_inlet(inlet: &InletDef) -> Result<(), ValidationError> {
    positive("inlet.mass_flow_kg_s", inlet.mass_flow_kg_s)?;
    positive("inlet.t_stag_k", inlet.t_stag_k)?;
    positive("inlet.p_stag_pa", inlet.p_stag_pa)
}

fn validate_compressor(compressor: &CompressorDef) -> Result<(), ValidationError> {
    if compressor.stages.is_empty() {
        return Err(invalid("compressor.stages", "[]", "at least one stage is required"));
    }
    if let Some(d) = compressor.d_out_1_m {
        positive("compressor.d_out_1_m", d)?;
    }
    for (field, v) in [
        ("compressor.duct_loss_in", compressor.duct_loss_in),
        ("compressor.duct_loss_out", compressor.duct_loss_out),
    ] {
        if !v.is_finite() || !(0.0..1.0).contains(&v) {
            return Err(invalid(field, v, "must lie in [0, 1)"));
        }
    }
    if !(compressor.k_h > 0.0 && compressor.k_h <= 1.0) {
        return Err(invalid("compressor.k_h", compressor.k_h, "must lie in (0, 1]"));
    }

    for (i, stage) in compressor.stages.iter().enumerate() {
        let prefix = format!("compressor.stages[{i}]");
        if let DiameterLawDef::Custom { form_coef } = stage.diameter_law {
            if !form_coef.is_finite() {
                return Err(invalid(
                    format!("{prefix}.diameter_law.form_coef"),
                    form_coef,
                    "must be finite",
                ));
            }
        }
        for (row, law) in [("rotor_law", stage.rotor_law), ("stator_law", stage.stator_law)] {
            if let VelocityLawDef::Exponential { power } = law {
                if !power.is_finite() || power == 0.0 {
                    return Err(invalid(
                        format!("{prefix}.{row}.power"),
                        power,
                        "must be finite and non-zero",
                    ));
                }
            }
        }
        for (row, params) in [("rotor_row", &stage.rotor_row), ("stator_row", &stage.stator_row)] {
            if let Some(params) = params {
                validate_blade_row(&format!("{prefix}.{row}"), params)?;
            }
        }
    }
    Ok(())
}

fn validate_blade_row(prefix: &str, row: &BladeRowDef) -> Result<(), ValidationError> {
    positive(&format!("{prefix}.elongation"), row.elongation)?;
    positive(&format!("{prefix}.mean_lattice_density"), row.mean_lattice_density)?;
    if !row.windage.is_finite() {
        return Err(invalid(format!("{prefix}.windage"), row.windage, "must be finite"));
    }
    Ok(())
}

fn validate_requirements(req: &RequirementsDef) -> Result<(), ValidationError> {
    positive("requirements.pi_c", req.pi_c)?;
    positive("requirements.precision", req.precision)?;
    if !req.min_eta_ad.is_finite() || !(0.0..1.0).contains(&req.min_eta_ad) {
        return Err(invalid(
            "requirements.min_eta_ad",
            req.min_eta_ad,
            "must lie in [0, 1)",
        ));
    }
    Ok(())
}

fn validate_search(search: &SearchDef) -> Result<(), ValidationError> {
    positive("search.eps", search.eps)?;
    for (field, v) in [
        ("search.max_iterations", search.max_iterations),
        ("search.chunk_size", search.chunk_size),
        ("search.report_every", search.report_every),
    ] {
        if v == 0 {
            return Err(invalid(field, v, "must be at least 1"));
        }
    }
    Ok(())
}

fn validate_grid(grid: &GridDef) -> Result<(), ValidationError> {
    for (name, axis) in grid.axes() {
        let field = format!("grid.{name}");
        let values = axis
            .values()
            .map_err(|e| invalid(field.clone(), format!("{axis:?}"), &e.to_string()))?;
        if values.is_empty() {
            return Err(invalid(field, format!("{axis:?}"), "axis has no values"));
        }
        for v in values {
            if !v.is_finite() {
                return Err(invalid(field, v, "must be finite"));
            }
            match name {
                "d_rel_1" => open_unit(&field, v)?,
                "inlet_alpha_deg" => swirl_angle(&field, v)?,
                "u_out_1" => positive(&field, v)?,
                _ => {}
            }
        }
    }
    Ok(())
}

fn validate_design(design: &DesignDef, stage_count: usize) -> Result<(), ValidationError> {
    positive("design.u_out_1", design.u_out_1)?;
    open_unit("design.d_rel_1", design.d_rel_1)?;
    swirl_angle("design.inlet_alpha_deg", design.inlet_alpha_deg)?;
    for (field, list) in [
        ("design.h_t_rel", &design.h_t_rel),
        ("design.eta_ad", &design.eta_ad),
        ("design.r_mean", &design.r_mean),
        ("design.c_a_rel", &design.c_a_rel),
    ] {
        if list.len() != stage_count {
            return Err(invalid(
                field,
                list.len(),
                &format!("expected one value per stage ({stage_count})"),
            ));
        }
        if let Some(v) = list.iter().find(|v| !v.is_finite()) {
            return Err(invalid(field, v, "must be finite"));
        }
    }
    if let Some(eta) = design.eta_ad.iter().find(|e| !(**e > 0.0 && **e <= 1.0)) {
        return Err(invalid("design.eta_ad", eta, "must lie in (0, 1]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn base() -> Project {
        Project {
            version: 1,
            name: "demo".to_string(),
            gas: GasDef::Pure {
                species: "Air".to_string(),
            },
            inlet: InletDef {
                mass_flow_kg_s: 128.0,
                t_stag_k: 288.0,
                p_stag_pa: 1.0e5,
            },
            compressor: CompressorDef {
                stages: vec![StageDef::default(); 2],
                d_out_1_m: None,
                duct_loss_in: 0.04,
                duct_loss_out: 0.04,
                k_h: 0.98,
            },
            requirements: None,
            grid: None,
            search: SearchDef::default(),
            design: Some(DesignDef {
                u_out_1: 470.0,
                d_rel_1: 0.5,
                inlet_alpha_deg: 90.0,
                h_t_rel: vec![0.23, 0.22],
                eta_ad: vec![0.88, 0.87],
                r_mean: vec![0.55, 0.6],
                c_a_rel: vec![0.5, 0.45],
            }),
        }
    }

    #[test]
    fn accepts_design_only_project() {
        validate_project(&base()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut p = base();
        p.version = 9;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { version: 9 })
        ));
    }

    #[test]
    fn rejects_design_list_mismatch() {
        let mut p = base();
        if let Some(design) = p.design.as_mut() {
            design.eta_ad.pop();
        }
        let err = validate_project(&p).unwrap_err();
        assert!(err.to_string().contains("design.eta_ad"));
    }

    #[test]
    fn grid_needs_requirements() {
        let mut p = base();
        p.grid = Some(GridDef {
            u_out_1: AxisDef::Value(470.0),
            d_rel_1: AxisDef::List(vec![0.45, 0.5]),
            h_t_rel_first: AxisDef::Value(0.23),
            h_t_rel_last: AxisDef::Value(0.22),
            h_t_rel_max: AxisDef::Value(0.24),
            h_t_rel_max_coord: AxisDef::Value(1.5),
            eta_ad_first: AxisDef::Value(0.88),
            eta_ad_last: AxisDef::Value(0.87),
            eta_ad_max: AxisDef::Value(0.9),
            eta_ad_max_coord: AxisDef::Value(1.5),
            c_a_rel_first: AxisDef::Value(0.5),
            c_a_rel_last: AxisDef::Value(0.45),
            r_mean_first: AxisDef::Value(0.55),
            r_mean_last: AxisDef::Value(0.6),
            inlet_alpha_deg: AxisDef::Value(90.0),
        });
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::Missing { .. })
        ));

        p.requirements = Some(RequirementsDef {
            pi_c: 2.5,
            min_eta_ad: 0.84,
            precision: 0.05,
        });
        validate_project(&p).unwrap();

        if let Some(grid) = p.grid.as_mut() {
            grid.d_rel_1 = AxisDef::List(vec![0.5, 1.2]);
        }
        let err = validate_project(&p).unwrap_err();
        assert!(err.to_string().contains("grid.d_rel_1"));
    }

    #[test]
    fn rejects_empty_mixture_and_bad_inlet() {
        let mut p = base();
        p.gas = GasDef::Mixture { fractions: vec![] };
        assert!(validate_project(&p).is_err());

        let mut p = base();
        p.inlet.p_stag_pa = -1.0;
        let err = validate_project(&p).unwrap_err();
        assert!(err.to_string().contains("inlet.p_stag_pa"));
    }

    #[test]
    fn rejects_zero_power_law() {
        let mut p = base();
        p.compressor.stages[1].stator_law = VelocityLawDef::Exponential { power: 0.0 };
        let err = validate_project(&p).unwrap_err();
        assert!(err.to_string().contains("stages[1].stator_law"));
    }
}
