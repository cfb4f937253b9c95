// cf-core/src/units.rs

use uom::si::f64::{
    AngularVelocity as UomAngularVelocity, Area as UomArea, Length as UomLength,
    MassRate as UomMassRate, Pressure as UomPressure, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type AngularVelocity = UomAngularVelocity;
pub type Area = UomArea;
pub type Length = UomLength;
pub type MassRate = UomMassRate;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn rpm(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::revolution_per_minute;
    AngularVelocity::new::<revolution_per_minute>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Shaft speed in revolutions per minute.
#[inline]
pub fn as_rpm(w: AngularVelocity) -> f64 {
    use uom::si::angular_velocity::revolution_per_minute;
    w.get::<revolution_per_minute>()
}

pub mod constants {
    /// Reference sea-level static conditions.
    pub const P_STD_PA: f64 = 101_325.0;
    pub const T_STD_K: f64 = 288.15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(constants::P_STD_PA);
        let _t = k(constants::T_STD_K);
        let _mdot = kgps(128.0);
        let _l = m(0.99);
        let _a = m2(0.58);
        let _c = mps(235.0);
        let _r = unitless(0.5);
    }

    #[test]
    fn rpm_round_trip() {
        let n = rpm(9_000.0);
        assert!((as_rpm(n) - 9_000.0).abs() < 1e-9);
        // 9000 rpm = 300*pi rad/s
        assert!((n.value - 300.0 * std::f64::consts::PI).abs() < 1e-9);
    }
}
