use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use cf_app::{
    AppError, AppResult, RunOptions, RunProgressEvent, RunRequest, RunStage, query, run_service,
};
use cf_results::DesignParameters;
use cf_solver::{CompressorModel, StageSummary};

#[derive(Parser)]
#[command(name = "cf-cli")]
#[command(about = "compflow CLI - mean-line axial compressor design", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a project file
    Validate {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// Solve the project's explicit design point
    Solve {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Also print velocity triangles at this relative blade height
        #[arg(long)]
        h_rel: Option<f64>,
    },
    /// Search the project's parameter grid
    Optimize {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Do not write results to the run store
        #[arg(long)]
        no_save: bool,
        /// Accepted designs per batch
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Evaluate grid points in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// List saved runs of a project
    Runs {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// Show a saved run and its best designs
    ShowRun {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Run ID to display
        run_id: String,
        /// Number of designs to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Solve {
            project_path,
            h_rel,
        } => cmd_solve(&project_path, h_rel),
        Commands::Optimize {
            project_path,
            no_save,
            chunk_size,
            parallel,
        } => cmd_optimize(&project_path, !no_save, chunk_size, parallel),
        Commands::Runs { project_path } => cmd_runs(&project_path),
        Commands::ShowRun {
            project_path,
            run_id,
            top,
        } => cmd_show_run(&project_path, &run_id, top),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = cf_app::load_project(project_path)?;
    let summary = cf_app::summarize(&project)?;
    println!("✓ Project is valid");
    println!("  Name:    {} (version {})", summary.name, summary.version);
    println!("  Gas:     {}", summary.gas);
    println!("  Stages:  {}", summary.stage_count);
    match summary.variants {
        Some(n) => println!("  Grid:    {} variants", n),
        None => println!("  Grid:    none"),
    }
    println!(
        "  Design:  {}",
        if summary.has_design { "yes" } else { "none" }
    );
    Ok(())
}

fn cmd_solve(project_path: &Path, h_rel: Option<f64>) -> AppResult<()> {
    let project = cf_app::load_project(project_path)?;
    let model = run_service::solve_design(&project)?;

    print_stage_table(&model.summary()?);
    println!();
    println!("pi_c (blading):    {:.4}", model.pi_stag_blading());
    println!("pi_c (compressor): {:.4}", model.pi_stag_compressor()?);
    println!("eta_ad (blading):    {:.4}", model.eta_ad_blading());
    println!("eta_ad (compressor): {:.4}", model.eta_ad_compressor()?);

    if let Some(h_rel) = h_rel {
        if !(0.0..=1.0).contains(&h_rel) {
            return Err(AppError::InvalidInput(format!(
                "h_rel must lie in [0, 1], got {}",
                h_rel
            )));
        }
        print_triangles(&model, h_rel)?;
    }
    Ok(())
}

fn print_stage_table(rows: &[StageSummary]) {
    println!("{}", StageSummary::HEADERS.join("\t"));
    for row in rows {
        let values: Vec<String> = row.values().iter().map(|v| format!("{:.4}", v)).collect();
        println!("{}\t{}", row.number, values.join("\t"));
    }
    let blading: Vec<&StageSummary> = rows
        .iter()
        .filter(|r| r.rotor_blade_number.is_some() || r.stator_blade_number.is_some())
        .collect();
    if !blading.is_empty() {
        println!("\nstage\trotor_b/t\trotor_z\tstator_b/t\tstator_z");
        let fmt = |v: Option<f64>| v.map(|v| format!("{:.3}", v)).unwrap_or("-".to_string());
        for r in blading {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                r.number,
                fmt(r.rotor_lattice_density),
                fmt(r.rotor_blade_number),
                fmt(r.stator_lattice_density),
                fmt(r.stator_blade_number)
            );
        }
    }
}

fn print_triangles(model: &CompressorModel, h_rel: f64) -> AppResult<()> {
    println!("\nVelocity triangles at h_rel = {:.3}:", h_rel);
    for number in 1..=model.stage_count() {
        println!("  Stage {}", number);
        println!("    rotor inlet:   {}", model.rotor_inlet_triangle(number, h_rel)?);
        println!("    rotor outlet:  {}", model.rotor_outlet_triangle(number, h_rel)?);
        println!("    stator inlet:  {}", model.stator_inlet_triangle(number, h_rel)?);
        println!("    stator outlet: {}", model.stator_outlet_triangle(number, h_rel)?);
    }
    Ok(())
}

fn cmd_optimize(
    project_path: &Path,
    save: bool,
    chunk_size: Option<usize>,
    parallel: bool,
) -> AppResult<()> {
    println!("Searching project: {}", project_path.display());

    let request = RunRequest {
        project_path,
        options: RunOptions {
            save,
            chunk_size,
            parallel: parallel.then_some(true),
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let response = run_service::run_optimization_with_progress(
        &request,
        Some(&mut |event| {
            let report = event.search.is_some();
            if report || last_emit.elapsed().as_millis() >= 100 {
                render_cli_progress(&event);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    let totals = &response.manifest.totals;
    if response.saved {
        println!("✓ Search completed: {}", response.run_id);
    } else {
        println!("✓ Search completed (not saved)");
    }
    println!("  Variants:    {}", totals.variants);
    println!("  Failed:      {}", totals.failed);
    println!("  Quasi-valid: {}", totals.quasi_valid);
    println!("  Accepted:    {}", totals.valid);
    println!("  Batches:     {}", response.manifest.batch_count);
    println!("  Elapsed:     {:.2}s", totals.elapsed_s);

    if let Some(best) = &response.best {
        println!("\nBest design (grid index {}):", best.grid_index);
        println!(
            "  pi_c = {:.4}, eta_ad = {:.4}, D_out_1 = {:.4} m",
            best.pi_c, best.eta_ad, best.d_out_1
        );
        for (name, value) in DesignParameters::COLUMNS.iter().zip(best.parameters.values()) {
            println!("  {:<18} {}", name, value);
        }
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (&event.stage, &event.search) {
        (RunStage::Searching, Some(s)) => {
            let width = 28usize;
            let fraction = s.fraction_complete();
            let filled = ((fraction * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            let left = s
                .time_left
                .map(|t| format!("{:.1} min", t.as_secs_f64() / 60.0))
                .unwrap_or("?".to_string());
            print!(
                "\r[{}] {:>6.2}%  {}/{}  valid={}  failed={}  left={}",
                bar,
                fraction * 100.0,
                s.processed,
                s.total,
                s.valid,
                s.failed,
                left
            );
        }
        _ => {
            let mut line = format!(
                "\r{}  elapsed={:.2}s",
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
        }
    }
    let _ = io::stdout().flush();
}

fn cmd_runs(project_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(project_path)?;

    if runs.is_empty() {
        println!("No saved runs for project: {}", project_path.display());
    } else {
        println!("Saved runs:");
        for manifest in runs {
            println!(
                "  {} ({}) - {} accepted of {}",
                manifest.run_id, manifest.timestamp, manifest.totals.valid, manifest.totals.variants
            );
        }
    }
    Ok(())
}

fn cmd_show_run(project_path: &Path, run_id: &str, top: usize) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, records) = run_service::load_run(project_path, run_id)?;
    let summary = query::get_run_summary(&records);

    println!("\nRun Summary:");
    println!("  Project:   {}", manifest.project_name);
    println!("  Timestamp: {}", manifest.timestamp);
    println!(
        "  Target:    pi_c = {} (+{:.0}%), eta_ad >= {}",
        manifest.criteria.pi_c,
        manifest.criteria.precision * 100.0,
        manifest.criteria.min_eta_ad
    );
    println!(
        "  Processed: {} of {} ({} failed, {} quasi-valid)",
        manifest.totals.processed,
        manifest.totals.variants,
        manifest.totals.failed,
        manifest.totals.quasi_valid
    );
    println!("  Accepted:  {}", summary.accepted);
    if let (Some(pi), Some(eta)) = (summary.pi_c_range, summary.eta_ad_range) {
        println!("  pi_c:      {:.4} - {:.4}", pi.0, pi.1);
        println!("  eta_ad:    {:.4} - {:.4}", eta.0, eta.1);
    }

    let best = query::best_designs(&records, top);
    if !best.is_empty() {
        println!("\nBest designs:");
        println!("  index\tpi_c\teta_ad\tD_out_1\tu_out_1\td_rel_1");
        for r in best {
            println!(
                "  {}\t{:.4}\t{:.4}\t{:.4}\t{:.1}\t{:.3}",
                r.grid_index, r.pi_c, r.eta_ad, r.d_out_1, r.parameters.u_out_1, r.parameters.d_rel_1
            );
        }
    }
    Ok(())
}
