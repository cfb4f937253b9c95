//! Run storage API.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::types::{DesignRecord, RunManifest};
use crate::{ResultsError, ResultsResult};

const MANIFEST: &str = "manifest.json";
const DESIGNS_CSV: &str = "designs.csv";

fn batch_file_name(batch: usize) -> String {
    format!("batch_{batch:04}.jsonl")
}

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Runs live in `.compflow/runs` next to the project file.
    pub fn for_project(project_path: &Path) -> ResultsResult<Self> {
        let project_dir = project_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "project path has no parent directory".to_string(),
            })?;
        Self::new(project_dir.join(".compflow").join("runs"))
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join(MANIFEST).exists()
    }

    /// Start a run from an empty directory, discarding earlier results.
    pub fn prepare_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(&run_dir)?;
        }
        fs::create_dir_all(&run_dir)?;
        Ok(())
    }

    /// Write one batch file and append its rows to the CSV table.
    pub fn save_batch(
        &self,
        run_id: &str,
        batch: usize,
        records: &[DesignRecord],
    ) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        fs::create_dir_all(&run_dir)?;

        let mut content = String::new();
        for record in records {
            content.push_str(&serde_json::to_string(record)?);
            content.push('\n');
        }
        fs::write(run_dir.join(batch_file_name(batch)), content)?;

        let csv_path = run_dir.join(DESIGNS_CSV);
        let write_header = !csv_path.exists();
        let mut csv = OpenOptions::new().create(true).append(true).open(csv_path)?;
        if write_header {
            writeln!(csv, "{}", DesignRecord::csv_header())?;
        }
        for record in records {
            writeln!(csv, "{}", record.csv_row())?;
        }
        Ok(())
    }

    pub fn save_manifest(&self, manifest: &RunManifest) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;
        fs::write(run_dir.join(MANIFEST), serde_json::to_string_pretty(manifest)?)?;
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join(MANIFEST);
        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let content = fs::read_to_string(manifest_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_batch(&self, run_id: &str, batch: usize) -> ResultsResult<Vec<DesignRecord>> {
        let path = self.run_dir(run_id).join(batch_file_name(batch));
        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: format!("{run_id} (batch {batch})"),
            });
        }
        let content = fs::read_to_string(path)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                records.push(serde_json::from_str(line)?);
            }
        }
        Ok(records)
    }

    /// Every accepted design of a run, in batch order.
    pub fn load_designs(&self, run_id: &str) -> ResultsResult<Vec<DesignRecord>> {
        let manifest = self.load_manifest(run_id)?;
        let mut records = Vec::new();
        for batch in 0..manifest.batch_count {
            records.extend(self.load_batch(run_id, batch)?);
        }
        Ok(records)
    }

    pub fn csv_path(&self, run_id: &str) -> PathBuf {
        self.run_dir(run_id).join(DESIGNS_CSV)
    }

    /// Saved runs, newest first.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();
        if !self.root_dir.exists() {
            return Ok(runs);
        }
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }
        runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
