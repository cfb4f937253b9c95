//! Fraction-weighted gas mixtures.

use crate::error::{GasError, GasResult};
use crate::model::{GasModel, PowerLawGas};
use crate::species::Species;

/// Mixture whose every property is the fraction-weighted sum of the
/// component properties.
///
/// Fractions are always normalized to sum to 1.0.
#[derive(Clone, Debug, PartialEq)]
pub struct Mixture {
    name: String,
    components: Vec<(PowerLawGas, f64)>,
}

impl Mixture {
    /// Create a mixture from species fractions.
    ///
    /// Validates that all fractions are finite, non-negative, and have a
    /// positive sum, then normalizes to sum=1.
    pub fn new(name: impl Into<String>, fractions: Vec<(Species, f64)>) -> GasResult<Self> {
        if fractions.is_empty() {
            return Err(GasError::InvalidArg {
                what: "empty mixture",
            });
        }

        let mut sum = 0.0;
        for (_, frac) in &fractions {
            if !frac.is_finite() || *frac < 0.0 {
                return Err(GasError::NonPhysical {
                    what: "mixture fraction",
                    value: *frac,
                });
            }
            sum += frac;
        }
        if sum <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "mixture fraction sum",
                value: sum,
            });
        }

        let mut components = Vec::with_capacity(fractions.len());
        for (species, frac) in fractions {
            if frac / sum > 1e-15 {
                components.push((species.model()?, frac / sum));
            }
        }

        Ok(Self {
            name: name.into(),
            components,
        })
    }

    /// Products of stoichiometric methane combustion in air.
    pub fn methane_combustion_products() -> GasResult<Self> {
        Self::new(
            "MethaneCombustionProducts",
            vec![
                (Species::N2, 0.711),
                (Species::CO2, 0.159),
                (Species::H2O, 1.0 - (0.711 + 0.159)),
            ],
        )
    }

    pub fn components(&self) -> &[(PowerLawGas, f64)] {
        &self.components
    }

    fn weighted(&self, f: impl Fn(&PowerLawGas) -> f64) -> f64 {
        self.components.iter().map(|(gas, frac)| f(gas) * frac).sum()
    }
}

impl GasModel for Mixture {
    fn name(&self) -> &str {
        &self.name
    }

    fn r(&self) -> f64 {
        self.weighted(|g| g.r())
    }

    fn cp(&self, t: f64) -> f64 {
        self.weighted(|g| g.cp(t))
    }

    fn conductivity(&self, t: f64) -> f64 {
        self.weighted(|g| g.conductivity(t))
    }

    fn viscosity(&self, t: f64) -> f64 {
        self.weighted(|g| g.viscosity(t))
    }

    fn density(&self, t: f64, p: f64) -> f64 {
        self.weighted(|g| g.density(t, p))
    }

    fn kinematic_viscosity(&self, t: f64, p: f64) -> f64 {
        self.weighted(|g| g.kinematic_viscosity(t, p))
    }

    fn prandtl(&self, t: f64) -> f64 {
        self.weighted(|g| g.prandtl(t))
    }
}
