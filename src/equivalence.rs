use serde::{Deserialize, Serialize};

use crate::calculator::KG_PER_TON;
use crate::error::{check_non_negative, CalcError};
use crate::factors::{default_factors, EquivalenceFactors};

/// Intuitive restatements of an annual footprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalenceSet {
    pub trees_to_offset: f64,
    pub miles_driven_equivalent: f64,
    pub phone_charges_equivalent: f64,
    pub home_energy_days_equivalent: f64,
}

/// Linear scaling of kg CO2e into each equivalence unit.
pub fn translate(
    total_emissions_kg: f64,
    factors: &EquivalenceFactors,
) -> Result<EquivalenceSet, CalcError> {
    let kg = check_non_negative("totalEmissions", total_emissions_kg)?;
    Ok(EquivalenceSet {
        trees_to_offset: kg / KG_PER_TON * factors.trees_per_ton,
        miles_driven_equivalent: kg * factors.miles_per_kg,
        phone_charges_equivalent: kg * factors.phone_charges_per_kg,
        home_energy_days_equivalent: kg * factors.home_energy_days_per_kg,
    })
}

/// Same as [`translate`] with the built-in constants.
pub fn compute_equivalences(total_emissions_kg: f64) -> Result<EquivalenceSet, CalcError> {
    translate(total_emissions_kg, &default_factors().equivalence)
}
