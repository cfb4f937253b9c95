use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use cf_core::numeric::arange;
use cf_core::units::{k, kgps, pa};
use cf_gas::{GasModel, Species};
use cf_optimizer::{
    CandidateOutcome, DesignPoint, DesignRequirements, MeanRadiusOptimizer, NoProgress,
    OptimizerError, ParameterGrid, ProgressSink, SearchOptions, SearchProgress,
    pressure_trend_is_valid,
};
use cf_solver::{CompressorBuilder, InletConditions, SolverConfig, SolverError, StagePlan};

fn prototype(stages: usize) -> CompressorBuilder {
    prototype_with(Arc::new(Species::Air.model().unwrap()), stages)
}

fn prototype_with(gas: Arc<dyn GasModel>, stages: usize) -> CompressorBuilder {
    CompressorBuilder::new(gas)
        .inlet(InletConditions {
            mass_flow: kgps(128.0),
            t_stag: k(288.0),
            p_stag: pa(1.0e5),
        })
        .stages(std::iter::repeat_n(StagePlan::default(), stages))
}

/// 9 tip speeds x 3 hub ratios, everything else fixed.
fn single_stage_grid() -> ParameterGrid {
    ParameterGrid {
        u_out_1: arange(420.0, 465.0, 5.0).unwrap(),
        d_rel_1: vec![0.4, 0.5, 0.6],
        h_t_rel_first: vec![0.23],
        h_t_rel_last: vec![0.23],
        h_t_rel_max: vec![0.25],
        h_t_rel_max_coord: vec![2.5],
        eta_ad_first: vec![0.88],
        eta_ad_last: vec![0.86],
        eta_ad_max: vec![0.9],
        eta_ad_max_coord: vec![2.5],
        c_a_rel_first: vec![0.5],
        c_a_rel_last: vec![0.45],
        r_mean_first: vec![0.55],
        r_mean_last: vec![0.6],
        inlet_alpha: vec![FRAC_PI_2],
    }
}

fn accept_all() -> DesignRequirements {
    DesignRequirements::new(1.0, 0.0, 10.0).unwrap()
}

fn options(chunk_size: usize, parallel: bool) -> SearchOptions {
    SearchOptions {
        chunk_size,
        report_every: 10,
        parallel,
        block_size: 4,
        ..SearchOptions::default()
    }
}

#[derive(Default)]
struct Recorder {
    evaluations: Vec<usize>,
    failures: usize,
    reports: Vec<SearchProgress>,
}

impl ProgressSink for Recorder {
    fn on_evaluation(&mut self, index: usize, _point: &DesignPoint, outcome: &CandidateOutcome) {
        self.evaluations.push(index);
        if matches!(outcome, CandidateOutcome::Failed { .. }) {
            self.failures += 1;
        }
    }

    fn on_report(&mut self, progress: &SearchProgress) {
        self.reports.push(progress.clone());
    }
}

#[test]
fn batches_are_bounded_by_chunk_size() {
    let optimizer = MeanRadiusOptimizer::new(
        prototype(1),
        accept_all(),
        single_stage_grid(),
        options(10, false),
    )
    .unwrap();
    assert_eq!(optimizer.total_variants(), 27);

    let mut recorder = Recorder::default();
    let batches: Vec<_> = optimizer.search(&mut recorder).collect();
    let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![10, 10, 7]);
    let numbers: Vec<usize> = batches.iter().map(|b| b.index).collect();
    assert_eq!(numbers, vec![0, 1, 2]);

    assert_eq!(recorder.evaluations, (0..27).collect::<Vec<_>>());
    assert_eq!(recorder.failures, 0);
    let processed: Vec<usize> = recorder.reports.iter().map(|r| r.processed).collect();
    assert_eq!(processed, vec![10, 20, 27]);
    let last = recorder.reports.last().unwrap();
    assert_eq!(last.valid, 27);
    assert_eq!(last.quasi_valid, 27);
}

#[test]
fn accepted_designs_keep_grid_order() {
    let optimizer = MeanRadiusOptimizer::new(
        prototype(1),
        accept_all(),
        single_stage_grid(),
        options(10, false),
    )
    .unwrap();
    let designs: Vec<_> = optimizer
        .search(&mut NoProgress)
        .flat_map(|b| b.designs)
        .collect();
    let indices: Vec<usize> = designs.iter().map(|d| d.index).collect();
    assert_eq!(indices, (0..27).collect::<Vec<_>>());

    let first = &designs[0];
    assert_eq!(first.point.u_out_1, 420.0);
    assert_eq!(first.point.d_rel_1, 0.4);
    assert!(first.pi_c > 1.0);
    assert!(first.eta_ad > 0.0 && first.eta_ad < 1.0);
    assert!(first.d_out_1() > 0.0);
    assert_eq!(first.compressor.stage_count(), 1);

    // faster rotor at the same hub ratio gives a higher pressure ratio
    let faster = &designs[3];
    assert_eq!(faster.point.u_out_1, 425.0);
    assert_eq!(faster.point.d_rel_1, 0.4);
    assert!(faster.pi_c > first.pi_c);
}

#[test]
fn parallel_search_matches_sequential() {
    let run = |parallel: bool| {
        let optimizer = MeanRadiusOptimizer::new(
            prototype(1),
            accept_all(),
            single_stage_grid(),
            options(10, parallel),
        )
        .unwrap();
        optimizer
            .search(&mut NoProgress)
            .map(|b| {
                b.designs
                    .iter()
                    .map(|d| (d.index, d.pi_c, d.eta_ad))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    };
    let sequential = run(false);
    let parallel = run(true);
    assert_eq!(sequential, parallel);
}

#[test]
fn unreachable_target_yields_nothing() {
    let requirements = DesignRequirements::new(10.0, 0.8, 0.05).unwrap();
    let optimizer = MeanRadiusOptimizer::new(
        prototype(1),
        requirements,
        single_stage_grid(),
        options(10, false),
    )
    .unwrap();
    let mut recorder = Recorder::default();
    let mut search = optimizer.search(&mut recorder);
    assert!(search.next().is_none());
    let progress = search.progress();
    assert_eq!(progress.processed, 27);
    assert_eq!(progress.valid, 0);
    assert_eq!(progress.failed, 0);
}

#[test]
fn failed_candidates_are_counted_and_skipped() {
    let mut grid = single_stage_grid();
    // peak on the first stage makes the loading profile singular
    grid.h_t_rel_max_coord = vec![1.0];
    let optimizer =
        MeanRadiusOptimizer::new(prototype(1), accept_all(), grid.clone(), options(10, false))
            .unwrap();
    let point = grid.point(0).unwrap();
    assert!(matches!(
        optimizer.evaluate(&point),
        Err(OptimizerError::ShapeFunction { .. })
    ));

    let mut recorder = Recorder::default();
    let batches = optimizer.search(&mut recorder).count();
    assert_eq!(batches, 0);
    assert_eq!(recorder.failures, 27);
    assert_eq!(recorder.reports.last().unwrap().failed, 27);
    assert_eq!(recorder.reports.last().unwrap().processed, 27);
}

#[test]
fn solver_failures_become_rejections() {
    let opts = SearchOptions {
        solver: SolverConfig {
            max_iterations: 1,
            ..SolverConfig::default()
        },
        ..options(10, false)
    };
    let optimizer =
        MeanRadiusOptimizer::new(prototype(1), accept_all(), single_stage_grid(), opts).unwrap();
    let point = single_stage_grid().point(0).unwrap();
    assert!(matches!(
        optimizer.evaluate(&point),
        Err(OptimizerError::Solver(SolverError::ConvergenceFailed { .. }))
    ));

    let mut recorder = Recorder::default();
    let mut search = optimizer.search(&mut recorder);
    assert_eq!(search.by_ref().count(), 0);
    let progress = search.progress();
    assert_eq!(progress.processed, 27);
    assert_eq!(progress.failed, 27);
    assert_eq!(progress.valid, 0);
    assert_eq!(recorder.failures, 27);
    assert_eq!(recorder.evaluations, (0..27).collect::<Vec<_>>());
}

/// Air whose heat capacity doubles above 320 K.
#[derive(Debug)]
struct SteppedGas;

impl GasModel for SteppedGas {
    fn name(&self) -> &str {
        "Stepped air"
    }

    fn r(&self) -> f64 {
        287.0
    }

    fn cp(&self, t: f64) -> f64 {
        if t < 320.0 { 1006.0 } else { 2012.0 }
    }

    fn conductivity(&self, _t: f64) -> f64 {
        0.0257
    }

    fn viscosity(&self, _t: f64) -> f64 {
        1.8e-5
    }
}

#[test]
fn efficiency_above_one_is_counted_as_failure() {
    let grid = ParameterGrid {
        u_out_1: vec![460.0, 470.0],
        d_rel_1: vec![0.5],
        h_t_rel_first: vec![0.23],
        h_t_rel_last: vec![0.23],
        h_t_rel_max: vec![0.24],
        h_t_rel_max_coord: vec![1.5],
        eta_ad_first: vec![0.9],
        eta_ad_last: vec![0.9],
        eta_ad_max: vec![0.91],
        eta_ad_max_coord: vec![1.5],
        c_a_rel_first: vec![0.5],
        c_a_rel_last: vec![0.45],
        r_mean_first: vec![0.55],
        r_mean_last: vec![0.6],
        inlet_alpha: vec![FRAC_PI_2],
    };
    let optimizer = MeanRadiusOptimizer::new(
        prototype_with(Arc::new(SteppedGas), 2),
        accept_all(),
        grid.clone(),
        options(10, false),
    )
    .unwrap();
    assert!(matches!(
        optimizer.evaluate(&grid.point(1).unwrap()),
        Err(OptimizerError::Solver(SolverError::EfficiencyBound { .. }))
    ));

    let mut recorder = Recorder::default();
    let mut search = optimizer.search(&mut recorder);
    assert_eq!(search.by_ref().count(), 0);
    assert_eq!(search.progress().failed, 2);
    assert_eq!(recorder.failures, 2);
}

#[test]
fn multistage_designs_pass_every_filter() {
    let grid = ParameterGrid {
        u_out_1: vec![460.0, 470.0],
        d_rel_1: vec![0.5],
        h_t_rel_first: vec![0.23],
        h_t_rel_last: vec![0.22],
        h_t_rel_max: vec![0.24],
        h_t_rel_max_coord: vec![2.0],
        eta_ad_first: vec![0.88],
        eta_ad_last: vec![0.87],
        eta_ad_max: vec![0.9],
        eta_ad_max_coord: vec![2.0],
        c_a_rel_first: vec![0.5],
        c_a_rel_last: vec![0.45],
        r_mean_first: vec![0.55],
        r_mean_last: vec![0.6],
        inlet_alpha: vec![FRAC_PI_2],
    };
    let requirements = DesignRequirements::new(2.5, 0.8, 1.0).unwrap();
    let optimizer =
        MeanRadiusOptimizer::new(prototype(3), requirements, grid, options(10, false)).unwrap();
    let mut progress = NoProgress;
    let mut search = optimizer.search(&mut progress);
    let designs: Vec<_> = search.by_ref().flat_map(|b| b.designs).collect();
    assert_eq!(search.progress().processed, 2);
    assert!(!designs.is_empty());
    for d in &designs {
        assert!(requirements.pi_c_is_valid(d.pi_c));
        assert!(d.eta_ad >= 0.8);
        assert!(pressure_trend_is_valid(&d.compressor.stage_pressure_ratios()));
        assert_eq!(d.compressor.stage_count(), 3);
    }
}

#[test]
fn configuration_errors_are_returned() {
    let mut empty = single_stage_grid();
    empty.d_rel_1.clear();
    assert!(matches!(
        MeanRadiusOptimizer::new(prototype(1), accept_all(), empty, SearchOptions::default()),
        Err(OptimizerError::InvalidGrid { .. })
    ));
    assert!(matches!(
        MeanRadiusOptimizer::new(
            prototype(1),
            accept_all(),
            single_stage_grid(),
            options(0, false)
        ),
        Err(OptimizerError::InvalidOptions { .. })
    ));
    assert!(matches!(
        MeanRadiusOptimizer::new(
            prototype(0),
            accept_all(),
            single_stage_grid(),
            SearchOptions::default()
        ),
        Err(OptimizerError::InvalidGrid { .. })
    ));
}
