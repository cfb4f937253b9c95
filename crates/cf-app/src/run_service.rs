//! Search execution and run storage service.

use std::path::Path;
use std::time::Instant;

use cf_optimizer::{AcceptedDesign, ProgressSink, TracingProgress};
use cf_project::schema::Project;
use cf_results::{
    AcceptanceCriteria, DesignParameters, DesignRecord, RunManifest, RunStore, SearchTotals,
    StageRecord,
};
use cf_solver::{CompressorModel, SolverConfig};
use tracing::info;

use crate::compile;
use crate::error::AppResult;
use crate::progress::{CallbackSink, RunProgressEvent, RunStage};
use crate::project_service;

/// Options for running a search.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Write batches and the manifest to the project's run store
    pub save: bool,
    /// Overrides `search.chunk_size` of the project
    pub chunk_size: Option<usize>,
    /// Overrides `search.parallel` of the project
    pub parallel: Option<bool>,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            save: true,
            chunk_size: None,
            parallel: None,
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Request to execute a search.
pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    pub options: RunOptions,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub saved: bool,
    /// Accepted design with the highest overall efficiency
    pub best: Option<DesignRecord>,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

/// Flatten an accepted design into a storable record.
pub fn design_record(design: &AcceptedDesign, batch: usize) -> DesignRecord {
    let p = &design.point;
    DesignRecord {
        grid_index: design.index,
        batch,
        pi_c: design.pi_c,
        eta_ad: design.eta_ad,
        d_out_1: design.d_out_1(),
        parameters: DesignParameters {
            u_out_1: p.u_out_1,
            d_rel_1: p.d_rel_1,
            h_t_rel_first: p.h_t_rel_first,
            h_t_rel_last: p.h_t_rel_last,
            h_t_rel_max: p.h_t_rel_max,
            h_t_rel_max_coord: p.h_t_rel_max_coord,
            eta_ad_first: p.eta_ad_first,
            eta_ad_last: p.eta_ad_last,
            eta_ad_max: p.eta_ad_max,
            eta_ad_max_coord: p.eta_ad_max_coord,
            c_a_rel_first: p.c_a_rel_first,
            c_a_rel_last: p.c_a_rel_last,
            r_mean_first: p.r_mean_first,
            r_mean_last: p.r_mean_last,
            inlet_alpha_deg: p.inlet_alpha.to_degrees(),
        },
        stages: design
            .compressor
            .stages()
            .iter()
            .map(|stage| StageRecord {
                d_out_1: stage.geometry.d_out_1,
                d_rel_1: stage.geometry.d_rel_1,
                pi_stag: stage.pi_stag(),
            })
            .collect(),
    }
}

/// Run the project's grid search.
pub fn run_optimization(request: &RunRequest) -> AppResult<RunResponse> {
    run_optimization_with_progress(request, None)
}

/// Run the project's grid search and stream progress events.
///
/// Without a callback, periodic reports go to the `tracing` log.
pub fn run_optimization_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let options = &request.options;

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingProject,
        started,
        Some("Loading project".to_string()),
    );
    let mut project = project_service::load_project(request.project_path)?;
    if let Some(chunk_size) = options.chunk_size {
        project.search.chunk_size = chunk_size;
    }
    if let Some(parallel) = options.parallel {
        project.search.parallel = parallel;
    }

    emit_progress(
        &mut progress_cb,
        RunStage::Compiling,
        started,
        Some("Compiling search".to_string()),
    );
    let optimizer = compile::compile_optimizer(&project)?;
    let run_id = cf_results::compute_run_id(&project, &options.solver_version);

    let store = if options.save {
        let store = RunStore::for_project(request.project_path)?;
        store.prepare_run(&run_id)?;
        Some(store)
    } else {
        None
    };

    emit_progress(
        &mut progress_cb,
        RunStage::Searching,
        started,
        Some(format!("{} variants", optimizer.total_variants())),
    );

    let mut best: Option<DesignRecord> = None;
    let mut batch_count = 0;
    let progress = {
        let mut tracing_sink = TracingProgress;
        let mut callback_sink;
        let sink: &mut dyn ProgressSink = match progress_cb.as_deref_mut() {
            Some(cb) => {
                callback_sink = CallbackSink::new(cb, started);
                &mut callback_sink
            }
            None => &mut tracing_sink,
        };

        let mut search = optimizer.search(sink);
        for batch in search.by_ref() {
            let records: Vec<DesignRecord> = batch
                .designs
                .iter()
                .map(|design| design_record(design, batch.index))
                .collect();
            for record in &records {
                if best.as_ref().is_none_or(|b| record.eta_ad > b.eta_ad) {
                    best = Some(record.clone());
                }
            }
            if let Some(store) = &store {
                store.save_batch(&run_id, batch.index, &records)?;
            }
            batch_count += 1;
        }
        search.progress()
    };

    let requirements = optimizer.requirements();
    let manifest = RunManifest {
        run_id: run_id.clone(),
        project_name: project.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        solver_version: options.solver_version.clone(),
        stage_count: optimizer.stage_count(),
        criteria: AcceptanceCriteria {
            pi_c: requirements.pi_c,
            min_eta_ad: requirements.min_eta_ad,
            precision: requirements.precision,
        },
        totals: SearchTotals {
            variants: progress.total,
            processed: progress.processed,
            failed: progress.failed,
            quasi_valid: progress.quasi_valid,
            valid: progress.valid,
            elapsed_s: progress.elapsed.as_secs_f64(),
        },
        batch_count,
    };

    if let Some(store) = &store {
        emit_progress(
            &mut progress_cb,
            RunStage::SavingResults,
            started,
            Some("Saving manifest".to_string()),
        );
        store.save_manifest(&manifest)?;
    }

    emit_progress(&mut progress_cb, RunStage::Completed, started, None);
    info!(
        run_id = %run_id,
        accepted = manifest.totals.valid,
        batches = batch_count,
        "search completed"
    );

    Ok(RunResponse {
        run_id,
        manifest,
        saved: store.is_some(),
        best,
    })
}

/// Solve the project's explicit design point.
pub fn solve_design(project: &Project) -> AppResult<CompressorModel> {
    let design = compile::compile_design(project)?;
    let config = SolverConfig {
        eps: project.search.eps,
        max_iterations: project.search.max_iterations,
    };
    let model = design.solve(&config)?;
    info!(
        project = %project.name,
        stages = model.stage_count(),
        "design point solved"
    );
    Ok(model)
}

/// List saved runs of a project, newest first.
pub fn list_runs(project_path: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_project(project_path)?;
    Ok(store.list_runs()?)
}

/// Load a run's manifest and all of its accepted designs.
pub fn load_run(project_path: &Path, run_id: &str) -> AppResult<(RunManifest, Vec<DesignRecord>)> {
    let store = RunStore::for_project(project_path)?;
    let manifest = store.load_manifest(run_id)?;
    let records = store.load_designs(run_id)?;
    Ok((manifest, records))
}
