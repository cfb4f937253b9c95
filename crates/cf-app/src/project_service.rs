//! Project loading, saving and introspection.

use std::path::Path;

use cf_project::schema::{GasDef, Project};

use crate::compile;
use crate::error::{AppError, AppResult};

/// What a project asks for, for listing and validation output.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub name: String,
    pub version: u32,
    pub gas: String,
    pub stage_count: usize,
    /// Grid points of the search, if the project has a grid
    pub variants: Option<usize>,
    pub has_design: bool,
}

/// Load, migrate and validate a project (`.json` or YAML).
pub fn load_project(path: &Path) -> AppResult<Project> {
    Ok(cf_project::load(path)?)
}

/// Save a project in the format given by the file extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    let result = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => cf_project::save_json(path, project),
        _ => cf_project::save_yaml(path, project),
    };
    result.map_err(|err| match err {
        cf_project::ProjectError::Io(source) => AppError::ProjectFileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

pub fn summarize(project: &Project) -> AppResult<ProjectSummary> {
    let gas = match &project.gas {
        GasDef::Pure { species } => species.clone(),
        GasDef::Mixture { fractions } => fractions
            .iter()
            .map(|(name, fraction)| format!("{name} {fraction}"))
            .collect::<Vec<_>>()
            .join(", "),
        GasDef::Preset { name } => name.clone(),
    };
    let variants = match &project.grid {
        Some(grid) => Some(compile::build_grid(grid)?.total_variants()?),
        None => None,
    };
    Ok(ProjectSummary {
        name: project.name.clone(),
        version: project.version,
        gas,
        stage_count: project.compressor.stages.len(),
        variants,
        has_design: project.design.is_some(),
    })
}
