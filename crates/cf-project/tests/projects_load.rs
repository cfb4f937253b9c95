use std::path::Path;

use cf_project::{AxisDef, GasDef, LATEST_VERSION};

fn projects_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../projects")
}

#[test]
fn bundled_projects_load_and_validate() {
    let root = projects_dir();
    for name in [
        "01_single_stage.yaml",
        "02_four_stage_search.yaml",
        "03_combustion_products.json",
    ] {
        let project = cf_project::load(&root.join(name))
            .unwrap_or_else(|e| panic!("Failed to load {name}: {e}"));
        assert_eq!(project.version, LATEST_VERSION, "{name}");
        cf_project::validate_project(&project)
            .unwrap_or_else(|e| panic!("Failed to validate {name}: {e}"));
    }
}

#[test]
fn grid_axes_accept_every_form() {
    let project = cf_project::load_yaml(&projects_dir().join("02_four_stage_search.yaml")).unwrap();
    let grid = project.grid.unwrap();

    assert_eq!(grid.h_t_rel_last, AxisDef::Value(0.22));
    assert_eq!(grid.d_rel_1.values().unwrap(), vec![0.45, 0.5, 0.55]);

    let u = grid.u_out_1.values().unwrap();
    assert_eq!(u.len(), 6);
    assert_eq!(u[0], 440.0);
    assert_eq!(u[5], 490.0);

    let h_max = grid.h_t_rel_max.values().unwrap();
    assert_eq!(h_max.len(), 4);
    assert_eq!(h_max[3], 0.30);

    assert_eq!(project.search.chunk_size, 200);
    assert_eq!(project.search.max_iterations, 100);
    assert_eq!(project.requirements.unwrap().precision, 0.1);
}

#[test]
fn defaults_fill_missing_fields() {
    let project = cf_project::load_yaml(&projects_dir().join("01_single_stage.yaml")).unwrap();
    assert_eq!(project.compressor.duct_loss_in, 0.04);
    assert_eq!(project.compressor.k_h, 0.98);
    assert!(project.compressor.d_out_1_m.is_none());
    assert!(project.grid.is_none());
    let stage = &project.compressor.stages[0];
    assert_eq!(stage.rotor_law, cf_project::VelocityLawDef::ConstantCirculation);
    assert!(stage.rotor_row.is_some());

    let json = cf_project::load_json(&projects_dir().join("03_combustion_products.json")).unwrap();
    assert!(matches!(json.gas, GasDef::Preset { .. }));
    assert_eq!(json.design.unwrap().inlet_alpha_deg, 90.0);
}
