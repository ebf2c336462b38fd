//! Annual footprint per category and in total.
//!
//! | Category       | Formula                                                   |
//! |----------------|-----------------------------------------------------------|
//! | Transportation | miles * car(type) + transit miles * f + flight h * f      |
//! | Energy         | (kWh * f + therms * f + gallons * f) per month, * 12      |
//! | Food           | meat(level) + dairy(level) + localFood(level)             |
//! | Shopping       | clothing * f + electronics * f + other * f                |
//!
//! Unrecognized car types and food levels price as `medium`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{check_finite, check_non_negative, CalcError};
use crate::factors::{default_factors, EmissionFactorTable};
use crate::input::{CarType, ConsumptionLevel, EmissionInput};

pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const KG_PER_TON: f64 = 1000.0;

/// kg CO2e per year in each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub transportation: f64,
    pub energy: f64,
    pub food: f64,
    pub shopping: f64,
}

/// Percent of the total in each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryShares {
    pub transportation: f64,
    pub energy: f64,
    pub food: f64,
    pub shopping: f64,
}

/// Annual footprint of one input record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionResult {
    pub category_breakdown: CategoryBreakdown,
    /// Sum of the breakdown, kg CO2e per year.
    pub total_emissions: f64,
}

impl EmissionResult {
    /// Sums the four categories into a result.
    pub fn from_breakdown(category_breakdown: CategoryBreakdown) -> Self {
        let b = &category_breakdown;
        let total_emissions = b.transportation + b.energy + b.food + b.shopping;
        EmissionResult {
            category_breakdown,
            total_emissions,
        }
    }

    /// Total in metric tons.
    pub fn total_tons(&self) -> f64 {
        self.total_emissions / KG_PER_TON
    }

    /// All shares are zero when the total is zero.
    pub fn shares(&self) -> CategoryShares {
        if self.total_emissions <= 0.0 {
            return CategoryShares::default();
        }
        let pct = |v: f64| v / self.total_emissions * 100.0;
        let b = &self.category_breakdown;
        CategoryShares {
            transportation: pct(b.transportation),
            energy: pct(b.energy),
            food: pct(b.food),
            shopping: pct(b.shopping),
        }
    }
}

/// Stateless calculator over a shared, read-only factor table.
#[derive(Debug, Clone)]
pub struct EmissionsCalculator {
    factors: Arc<EmissionFactorTable>,
}

impl Default for EmissionsCalculator {
    fn default() -> Self {
        EmissionsCalculator::new(default_factors())
    }
}

impl EmissionsCalculator {
    /// Builds a calculator over an injected factor table.
    pub fn new(factors: Arc<EmissionFactorTable>) -> Self {
        EmissionsCalculator { factors }
    }

    /// The table every category reads from.
    pub fn factors(&self) -> &EmissionFactorTable {
        &self.factors
    }

    /// Car, public transport and flight emissions per year.
    pub fn transportation(&self, input: &EmissionInput) -> Result<f64, CalcError> {
        let miles = check_non_negative("carMileage", input.car_mileage)?;
        let transit = check_non_negative("publicTransportMiles", input.public_transport_miles)?;
        let hours = check_non_negative("flightHours", input.flight_hours)?;

        let t = &self.factors.transportation;
        let car = miles * self.car_factor(input.car_type);
        check_finite(
            "transportation",
            car + transit * t.public_transport_per_mile + hours * t.flight_per_hour,
        )
    }

    /// Home energy emissions, annualized from monthly usage.
    pub fn energy(&self, input: &EmissionInput) -> Result<f64, CalcError> {
        let kwh = check_non_negative("electricityKwhPerMonth", input.electricity_kwh_per_month)?;
        let therms =
            check_non_negative("naturalGasThermsPerMonth", input.natural_gas_therms_per_month)?;
        let gallons = check_non_negative(
            "heatingOilGallonsPerMonth",
            input.heating_oil_gallons_per_month,
        )?;

        let e = &self.factors.energy;
        let electricity = kwh * e.electricity_per_kwh * MONTHS_PER_YEAR;
        let gas = therms * e.natural_gas_per_therm * MONTHS_PER_YEAR;
        let oil = gallons * e.heating_oil_per_gallon * MONTHS_PER_YEAR;
        check_finite("energy", electricity + gas + oil)
    }

    /// Never fails: food is priced from ordinal levels only.
    pub fn food(&self, input: &EmissionInput) -> Result<f64, CalcError> {
        let f = &self.factors.food;
        let meat = f.meat.factor(note_level("meatLevel", input.meat_level));
        let dairy = f.dairy.factor(note_level("dairyLevel", input.dairy_level));
        let local = f
            .local_food
            .factor(note_level("localFoodLevel", input.local_food_level));
        Ok(meat + dairy + local)
    }

    /// Spend-based shopping emissions per year.
    pub fn shopping(&self, input: &EmissionInput) -> Result<f64, CalcError> {
        let clothing = check_non_negative("clothingSpend", input.clothing_spend)?;
        let electronics = check_non_negative("electronicsSpend", input.electronics_spend)?;
        let other = check_non_negative("otherShoppingSpend", input.other_shopping_spend)?;

        let s = &self.factors.shopping;
        check_finite(
            "shopping",
            clothing * s.clothing_per_unit
                + electronics * s.electronics_per_unit
                + other * s.other_per_unit,
        )
    }

    /// Validates the whole record before computing anything. Fails with
    /// `Overflow` when a subtotal or the total leaves the finite range.
    ///
    /// ```
    /// use carbon_footprint::{CarType, ConsumptionLevel, EmissionInput, EmissionsCalculator};
    ///
    /// let input = EmissionInput {
    ///     car_mileage: 10_000.0,
    ///     car_type: CarType::Medium,
    ///     meat_level: ConsumptionLevel::None,
    ///     dairy_level: ConsumptionLevel::None,
    ///     local_food_level: ConsumptionLevel::High,
    ///     ..EmissionInput::default()
    /// };
    /// let result = EmissionsCalculator::default().total(&input).unwrap();
    /// assert_eq!(result.category_breakdown.transportation, 3900.0);
    /// assert_eq!(result.total_emissions, 4000.0);
    /// ```
    pub fn total(&self, input: &EmissionInput) -> Result<EmissionResult, CalcError> {
        input.validate()?;
        let breakdown = CategoryBreakdown {
            transportation: self.transportation(input)?,
            energy: self.energy(input)?,
            food: self.food(input)?,
            shopping: self.shopping(input)?,
        };
        let result = EmissionResult::from_breakdown(breakdown);
        check_finite("total", result.total_emissions)?;
        debug!(
            total = result.total_emissions,
            transportation = breakdown.transportation,
            energy = breakdown.energy,
            food = breakdown.food,
            shopping = breakdown.shopping,
            "computed footprint"
        );
        Ok(result)
    }

    fn car_factor(&self, car: CarType) -> f64 {
        if car == CarType::Unrecognized {
            warn!(field = "carType", "unrecognized car type, using medium factor");
        }
        self.factors.transportation.car.factor(car)
    }
}

fn note_level(field: &'static str, level: ConsumptionLevel) -> ConsumptionLevel {
    if level == ConsumptionLevel::Unrecognized {
        warn!(field, "unrecognized consumption level, using medium factor");
    }
    level
}

/// [`EmissionsCalculator::transportation`] over the built-in table.
pub fn compute_transportation_emissions(input: &EmissionInput) -> Result<f64, CalcError> {
    EmissionsCalculator::default().transportation(input)
}

/// [`EmissionsCalculator::energy`] over the built-in table.
pub fn compute_energy_emissions(input: &EmissionInput) -> Result<f64, CalcError> {
    EmissionsCalculator::default().energy(input)
}

/// [`EmissionsCalculator::food`] over the built-in table.
pub fn compute_food_emissions(input: &EmissionInput) -> Result<f64, CalcError> {
    EmissionsCalculator::default().food(input)
}

/// [`EmissionsCalculator::shopping`] over the built-in table.
pub fn compute_shopping_emissions(input: &EmissionInput) -> Result<f64, CalcError> {
    EmissionsCalculator::default().shopping(input)
}

/// Entry point for callers using the built-in factor table.
pub fn compute_total_emissions(input: &EmissionInput) -> Result<EmissionResult, CalcError> {
    EmissionsCalculator::default().total(input)
}
