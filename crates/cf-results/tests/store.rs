use cf_results::{
    AcceptanceCriteria, DesignParameters, DesignRecord, ResultsError, RunManifest, RunStore,
    SearchTotals, StageRecord,
};

fn store(name: &str) -> RunStore {
    let dir = std::env::temp_dir().join(format!("cf_results_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    RunStore::new(dir).unwrap()
}

fn record(grid_index: usize, batch: usize, eta_ad: f64) -> DesignRecord {
    DesignRecord {
        grid_index,
        batch,
        pi_c: 1.6,
        eta_ad,
        d_out_1: 0.99,
        parameters: DesignParameters {
            u_out_1: 470.0,
            d_rel_1: 0.5,
            h_t_rel_first: 0.23,
            h_t_rel_last: 0.22,
            h_t_rel_max: 0.25,
            h_t_rel_max_coord: 1.5,
            eta_ad_first: 0.88,
            eta_ad_last: 0.87,
            eta_ad_max: 0.9,
            eta_ad_max_coord: 1.5,
            c_a_rel_first: 0.5,
            c_a_rel_last: 0.45,
            r_mean_first: 0.55,
            r_mean_last: 0.6,
            inlet_alpha_deg: 90.0,
        },
        stages: vec![StageRecord {
            d_out_1: 0.99,
            d_rel_1: 0.5,
            pi_stag: 1.64,
        }],
    }
}

fn manifest(run_id: &str, timestamp: &str, batch_count: usize) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        project_name: "demo".to_string(),
        timestamp: timestamp.to_string(),
        solver_version: "0.1.0".to_string(),
        stage_count: 1,
        criteria: AcceptanceCriteria {
            pi_c: 1.5,
            min_eta_ad: 0.8,
            precision: 0.1,
        },
        totals: SearchTotals {
            variants: 10,
            processed: 10,
            valid: 3,
            quasi_valid: 3,
            ..SearchTotals::default()
        },
        batch_count,
    }
}

#[test]
fn batches_roundtrip_in_order() {
    let store = store("roundtrip");
    store.prepare_run("run1").unwrap();
    store
        .save_batch("run1", 0, &[record(0, 0, 0.85), record(4, 0, 0.86)])
        .unwrap();
    store.save_batch("run1", 1, &[record(7, 1, 0.87)]).unwrap();
    store
        .save_manifest(&manifest("run1", "2026-01-01T00:00:00Z", 2))
        .unwrap();

    assert!(store.has_run("run1"));
    let designs = store.load_designs("run1").unwrap();
    let indices: Vec<usize> = designs.iter().map(|d| d.grid_index).collect();
    assert_eq!(indices, vec![0, 4, 7]);
    assert_eq!(designs[2], record(7, 1, 0.87));

    let csv = std::fs::read_to_string(store.csv_path("run1")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("grid_index,pi_c,eta_ad,D_out_1,u_out_1"));
    assert!(lines[0].ends_with("inlet_alpha"));
    assert!(lines[3].starts_with("7,1.6,0.87,0.99,470"));
    assert_eq!(lines[1].split(',').count(), 19);
}

#[test]
fn prepare_run_discards_previous_results() {
    let store = store("prepare");
    store.save_batch("run1", 0, &[record(0, 0, 0.85)]).unwrap();
    store.prepare_run("run1").unwrap();
    assert!(!store.csv_path("run1").exists());
    assert!(!store.has_run("run1"));
}

#[test]
fn list_runs_newest_first() {
    let store = store("list");
    store
        .save_manifest(&manifest("old", "2026-01-01T00:00:00Z", 0))
        .unwrap();
    store
        .save_manifest(&manifest("new", "2026-02-01T00:00:00Z", 0))
        .unwrap();
    let ids: Vec<String> = store
        .list_runs()
        .unwrap()
        .into_iter()
        .map(|m| m.run_id)
        .collect();
    assert_eq!(ids, vec!["new".to_string(), "old".to_string()]);

    store.delete_run("old").unwrap();
    assert_eq!(store.list_runs().unwrap().len(), 1);
}

#[test]
fn missing_run_is_reported() {
    let store = store("missing");
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
}
