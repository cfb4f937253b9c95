//! Integration tests for cf-stage building blocks.

use cf_stage::{
    BladeRowParams, DiameterLaw, FlowTriangle, StageError, StageGeometry, VelocityLaw,
    VelocityTriangle, annulus_area, outlet_parameters,
};

#[test]
fn infeasible_outlet_area_for_constant_tip() {
    // A constant 1 m tip cannot pass more than the full disk area.
    let disk = std::f64::consts::PI / 4.0;
    for factor in [1.01, 1.5, 3.0] {
        let err = outlet_parameters(1.0, 0.5, factor * disk, 1.0).unwrap_err();
        assert!(
            matches!(err, StageError::ImpossibleGeometry { .. }),
            "factor {factor}: {err:?}"
        );
    }
    // a near-zero hub does not help: the tip still bounds the annulus
    let err = outlet_parameters(1.0, 0.01, 1.2 * disk, 1.0).unwrap_err();
    assert!(matches!(err, StageError::ImpossibleGeometry { .. }));
}

#[test]
fn contraction_raises_hub_ratio_for_every_law() {
    let area_1 = annulus_area(1.0, 0.5);
    for law in [
        DiameterLaw::ConstantOuter,
        DiameterLaw::ConstantMean,
        DiameterLaw::ConstantInner,
        DiameterLaw::Custom { form_coef: 0.3 },
    ] {
        let geom = StageGeometry::from_outlet_area(1.0, 0.5, 0.9 * area_1, law).unwrap();
        assert!(geom.d_rel_3 > 0.5, "{law:?}: d_rel_3 = {}", geom.d_rel_3);
        assert!((geom.outlet_area() - 0.9 * area_1).abs() < 1e-9);
    }
}

#[test]
fn blade_rows_follow_stations() {
    let geom = StageGeometry::from_outlet_area(
        1.0,
        0.5,
        0.8 * annulus_area(1.0, 0.5),
        DiameterLaw::ConstantOuter,
    )
    .unwrap();
    let params = BladeRowParams::new(2.0, 1.0, 1.5).unwrap();
    let rotor = geom.rotor_blading(params);
    let stator = geom.stator_blading(params);
    assert_eq!(rotor.d_rel_outlet, stator.d_rel_inlet);
    assert_eq!(stator.d_rel_outlet, geom.d_rel_3);
    // stator blades are shorter: the hub rises through the stage
    assert!(stator.blade_length() < rotor.blade_length());
}

#[test]
fn spanwise_sweep_of_constant_circulation_conserves_moment() {
    let mean = VelocityTriangle::from_parts(470.0, 0.79, 0.3, 0.5);
    let law = VelocityLaw::CONSTANT_CIRCULATION;
    for i in 0..=10 {
        let r = 0.5 + 0.05 * i as f64;
        let t = law.inlet_triangle(&mean, r).unwrap();
        assert!((t.c_u_rel() * r - 0.3 * 0.79).abs() < 1e-12);
        assert!((t.c_a_rel() - 0.5).abs() < 1e-12);
    }
}
