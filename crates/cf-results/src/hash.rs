//! Content-based hashing for run IDs.

use cf_project::schema::Project;
use sha2::{Digest, Sha256};

/// SHA-256 over the project contents and solver version.
pub fn compute_run_id(project: &Project, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let project_json = serde_json::to_string(project).unwrap_or_default();
    hasher.update(project_json.as_bytes());
    hasher.update(solver_version.as_bytes());

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_project::schema::*;

    fn project(name: &str) -> Project {
        Project {
            version: 1,
            name: name.to_string(),
            gas: GasDef::Pure {
                species: "Air".to_string(),
            },
            inlet: InletDef {
                mass_flow_kg_s: 60.0,
                t_stag_k: 288.0,
                p_stag_pa: 1.0e5,
            },
            compressor: CompressorDef {
                stages: vec![StageDef::default()],
                d_out_1_m: None,
                duct_loss_in: 0.04,
                duct_loss_out: 0.04,
                k_h: 0.98,
            },
            requirements: None,
            grid: None,
            search: SearchDef::default(),
            design: None,
        }
    }

    #[test]
    fn hash_stability() {
        let p = project("a");
        let id = compute_run_id(&p, "0.1.0");
        assert_eq!(id, compute_run_id(&p, "0.1.0"));
        assert_eq!(id.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        assert_ne!(
            compute_run_id(&project("a"), "0.1.0"),
            compute_run_id(&project("b"), "0.1.0")
        );
        assert_ne!(
            compute_run_id(&project("a"), "0.1.0"),
            compute_run_id(&project("a"), "0.2.0")
        );
    }
}
