use cf_project::schema::*;
use cf_project::{load_json, load_yaml, save_json, save_yaml};

fn sample() -> Project {
    Project {
        version: 1,
        name: "Roundtrip".to_string(),
        gas: GasDef::Mixture {
            fractions: vec![("N2".to_string(), 0.78), ("CO2".to_string(), 0.22)],
        },
        inlet: InletDef {
            mass_flow_kg_s: 50.0,
            t_stag_k: 300.0,
            p_stag_pa: 1.0e5,
        },
        compressor: CompressorDef {
            stages: vec![
                StageDef {
                    diameter_law: DiameterLawDef::Custom { form_coef: 0.4 },
                    rotor_law: VelocityLawDef::Exponential { power: 0.5 },
                    stator_law: VelocityLawDef::ConstantReactivity,
                    rotor_row: Some(BladeRowDef {
                        elongation: 3.0,
                        windage: 0.1,
                        mean_lattice_density: 1.2,
                    }),
                    stator_row: None,
                },
                StageDef::default(),
            ],
            d_out_1_m: Some(0.8),
            duct_loss_in: 0.03,
            duct_loss_out: 0.05,
            k_h: 0.98,
        },
        requirements: Some(RequirementsDef {
            pi_c: 2.4,
            min_eta_ad: 0.85,
            precision: 0.05,
        }),
        grid: Some(GridDef {
            u_out_1: AxisDef::Arange {
                start: 400.0,
                stop: 450.0,
                step: 10.0,
            },
            d_rel_1: AxisDef::Linspace {
                start: 0.4,
                end: 0.6,
                num_points: 3,
            },
            h_t_rel_first: AxisDef::List(vec![0.22, 0.24]),
            h_t_rel_last: AxisDef::Value(0.22),
            h_t_rel_max: AxisDef::Value(0.25),
            h_t_rel_max_coord: AxisDef::Value(1.5),
            eta_ad_first: AxisDef::Value(0.88),
            eta_ad_last: AxisDef::Value(0.87),
            eta_ad_max: AxisDef::Value(0.9),
            eta_ad_max_coord: AxisDef::Value(1.5),
            c_a_rel_first: AxisDef::Value(0.5),
            c_a_rel_last: AxisDef::Value(0.45),
            r_mean_first: AxisDef::Value(0.55),
            r_mean_last: AxisDef::Value(0.6),
            inlet_alpha_deg: AxisDef::List(vec![85.0, 90.0]),
        }),
        search: SearchDef {
            parallel: true,
            ..SearchDef::default()
        },
        design: None,
    }
}

#[test]
fn roundtrip_yaml() {
    let project = sample();
    let dir = std::env::temp_dir().join("cf_project_roundtrip_yaml");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("project.yaml");

    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json() {
    let project = sample();
    let dir = std::env::temp_dir().join("cf_project_roundtrip_json");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("project.json");

    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn invalid_project_is_not_saved() {
    let mut project = sample();
    project.compressor.stages.clear();
    let path = std::env::temp_dir().join("cf_project_invalid.yaml");
    let _ = std::fs::remove_file(&path);
    assert!(save_yaml(&path, &project).is_err());
    assert!(!path.exists());
}
