//! Species catalogue with tabulated transport coefficients.

use crate::error::GasResult;
use crate::fit::fit_power_law;
use crate::model::PowerLawGas;

/// Pure working fluids available to the compressor models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Dry air (treated as a pure gas)
    Air,
    /// Nitrogen (N₂)
    N2,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Superheated water vapour (H₂O)
    H2O,
}

impl Species {
    pub const ALL: [Species; 4] = [Species::Air, Species::N2, Species::CO2, Species::H2O];

    pub fn name(self) -> &'static str {
        match self {
            Species::Air => "Air",
            Species::N2 => "Nitrogen",
            Species::CO2 => "CarbonDioxide",
            Species::H2O => "WaterVapour",
        }
    }

    /// Property model for this species.
    ///
    /// Water vapour coefficients come from a least-squares fit over the
    /// tabulated range, which is the only fallible path.
    pub fn model(self) -> GasResult<PowerLawGas> {
        let gas = match self {
            Species::Air => PowerLawGas {
                name: self.name().into(),
                r: 287.0,
                t_ref: 273.0,
                conductivity_ref: 244.2e-4,
                viscosity_ref: 17.6e-6,
                cp: 1006.0,
                conductivity_exp: 0.82,
                viscosity_exp: 0.68,
            },
            Species::N2 => PowerLawGas {
                name: self.name().into(),
                r: 297.0,
                t_ref: 273.0,
                conductivity_ref: 241.9e-4,
                viscosity_ref: 16.67e-6,
                cp: 1040.0,
                conductivity_exp: 0.8,
                viscosity_exp: 0.68,
            },
            Species::CO2 => PowerLawGas {
                name: self.name().into(),
                r: 189.0,
                t_ref: 273.0,
                conductivity_ref: 147e-4,
                viscosity_ref: 13.65e-6,
                cp: 849.0,
                conductivity_exp: 1.23,
                viscosity_exp: 0.82,
            },
            Species::H2O => return water_vapour(),
        };
        Ok(gas)
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const H2O_R: f64 = 465.0;
const H2O_CP: f64 = 2010.0;
const H2O_T_REF: f64 = 293.0;

/// Table temperatures: 120..=490 °C in 10 K steps.
fn h2o_table_temperatures() -> Vec<f64> {
    (0..H2O_CONDUCTIVITY_MW.len())
        .map(|i| 393.0 + 10.0 * i as f64)
        .collect()
}

/// Conductivity of superheated vapour at 1 bar [mW/(m·K)].
const H2O_CONDUCTIVITY_MW: [f64; 38] = [
    26.0, 26.9, 27.7, 28.6, 29.5, 30.4, 31.3, 32.2, 33.1, 34.1, 35.1, 36.1, 37.1, 38.1, 39.1,
    40.1, 41.2, 42.3, 44.4, 45.5, 46.7, 47.8, 49.0, 50.1, 51.3, 52.5, 53.6, 54.8, 56.0, 57.3,
    58.5, 59.7, 61.0, 62.2, 63.5, 64.8, 66.0, 67.3,
];

/// Dynamic viscosity of superheated vapour [1e-7 Pa·s].
const H2O_VISCOSITY_E7: [f64; 38] = [
    129.0, 133.0, 137.0, 141.0, 146.0, 150.0, 154.0, 158.0, 162.0, 166.0, 170.0, 174.0, 178.0,
    182.0, 186.0, 190.0, 194.0, 198.0, 202.0, 207.0, 211.0, 215.0, 219.0, 223.0, 227.0, 231.0,
    235.0, 239.0, 243.0, 247.0, 251.0, 255.0, 260.0, 264.0, 268.0, 272.0, 276.0, 280.0,
];

/// Water vapour with transport coefficients fitted to the tables.
pub fn water_vapour() -> GasResult<PowerLawGas> {
    let ts = h2o_table_temperatures();
    let conductivity: Vec<f64> = H2O_CONDUCTIVITY_MW.iter().map(|v| v * 1e-3).collect();
    let viscosity: Vec<f64> = H2O_VISCOSITY_E7.iter().map(|v| v * 1e-7).collect();

    let cond = fit_power_law(H2O_T_REF, &ts, &conductivity, "water vapour conductivity")?;
    let visc = fit_power_law(H2O_T_REF, &ts, &viscosity, "water vapour viscosity")?;

    Ok(PowerLawGas {
        name: Species::H2O.name().into(),
        r: H2O_R,
        t_ref: H2O_T_REF,
        conductivity_ref: cond.coefficient,
        viscosity_ref: visc.coefficient,
        cp: H2O_CP,
        conductivity_exp: cond.exponent,
        viscosity_exp: visc.exponent,
    })
}
