//! Emission factor table.
//!
//! All factors are kg CO2e per unit of activity, except the food levels which
//! are flat annual kg CO2e. The table is built once and shared read-only;
//! [`SharedFactorTable`] replaces it wholesale when factors are reloaded.

use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FactorTableError;
use crate::input::{CarType, ConsumptionLevel};

/// kg CO2e per mile for each car class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarFactors {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
    pub electric: f64,
}

impl Default for CarFactors {
    fn default() -> Self {
        CarFactors {
            small: 0.29,
            medium: 0.39,
            large: 0.57,
            // includes grid emissions for charging
            electric: 0.10,
        }
    }
}

impl CarFactors {
    /// Total over `CarType`; unrecognized classes price as medium.
    pub fn factor(&self, car: CarType) -> f64 {
        match car {
            CarType::Small => self.small,
            CarType::Medium | CarType::Unrecognized => self.medium,
            CarType::Large => self.large,
            CarType::Electric => self.electric,
        }
    }
}

/// Flat annual kg CO2e per ordinal level. Overrides must give all four levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFactors {
    pub none: f64,
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl LevelFactors {
    /// Factors in `none, low, medium, high` order.
    pub const fn new(none: f64, low: f64, medium: f64, high: f64) -> Self {
        LevelFactors {
            none,
            low,
            medium,
            high,
        }
    }

    /// Total over `ConsumptionLevel`; unrecognized levels price as medium.
    pub fn factor(&self, level: ConsumptionLevel) -> f64 {
        match level {
            ConsumptionLevel::None => self.none,
            ConsumptionLevel::Low => self.low,
            ConsumptionLevel::Medium | ConsumptionLevel::Unrecognized => self.medium,
            ConsumptionLevel::High => self.high,
        }
    }
}

/// kg CO2e per mile driven or ridden, per flight hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransportationFactors {
    pub car: CarFactors,
    /// bus, train, etc.
    pub public_transport_per_mile: f64,
    pub flight_per_hour: f64,
}

impl Default for TransportationFactors {
    fn default() -> Self {
        TransportationFactors {
            car: CarFactors::default(),
            public_transport_per_mile: 0.16,
            flight_per_hour: 53.0,
        }
    }
}

/// kg CO2e per unit of monthly home energy use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnergyFactors {
    pub electricity_per_kwh: f64,
    pub natural_gas_per_therm: f64,
    pub heating_oil_per_gallon: f64,
}

impl Default for EnergyFactors {
    fn default() -> Self {
        EnergyFactors {
            electricity_per_kwh: 0.42,
            natural_gas_per_therm: 5.3,
            heating_oil_per_gallon: 10.16,
        }
    }
}

/// Annual kg CO2e per consumption level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FoodFactors {
    pub meat: LevelFactors,
    pub dairy: LevelFactors,
    /// Inverted: more local food means less transport and processing.
    pub local_food: LevelFactors,
}

impl Default for FoodFactors {
    fn default() -> Self {
        FoodFactors {
            meat: LevelFactors::new(0.0, 300.0, 1200.0, 2500.0),
            dairy: LevelFactors::new(0.0, 200.0, 400.0, 600.0),
            local_food: LevelFactors::new(400.0, 300.0, 200.0, 100.0),
        }
    }
}

/// kg CO2e per currency unit spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShoppingFactors {
    pub clothing_per_unit: f64,
    pub electronics_per_unit: f64,
    pub other_per_unit: f64,
}

impl Default for ShoppingFactors {
    fn default() -> Self {
        ShoppingFactors {
            clothing_per_unit: 0.5,
            electronics_per_unit: 0.7,
            other_per_unit: 0.4,
        }
    }
}

/// Conversion constants for the equivalence translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquivalenceFactors {
    /// Trees absorbing one ton of CO2 per year.
    pub trees_per_ton: f64,
    pub miles_per_kg: f64,
    pub phone_charges_per_kg: f64,
    pub home_energy_days_per_kg: f64,
}

impl Default for EquivalenceFactors {
    fn default() -> Self {
        EquivalenceFactors {
            trees_per_ton: 16.5,
            miles_per_kg: 2.5,
            phone_charges_per_kg: 33.0,
            home_energy_days_per_kg: 0.23,
        }
    }
}

/// Per-capita reference footprints in tons CO2e per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceAverages {
    pub global_tons: f64,
    /// US average by default.
    pub regional_tons: f64,
}

impl Default for ReferenceAverages {
    fn default() -> Self {
        ReferenceAverages {
            global_tons: 4.7,
            regional_tons: 15.5,
        }
    }
}

/// Every constant the calculator, translator and classifier read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactorTable {
    pub transportation: TransportationFactors,
    pub energy: EnergyFactors,
    pub food: FoodFactors,
    pub shopping: ShoppingFactors,
    pub equivalence: EquivalenceFactors,
    pub reference: ReferenceAverages,
}

impl EmissionFactorTable {
    /// Parses a JSON override document. Sections and fields left out keep
    /// their default values.
    pub fn from_json_str(doc: &str) -> Result<Self, FactorTableError> {
        let table: EmissionFactorTable = serde_json::from_str(doc)?;
        table.validate()?;
        Ok(table)
    }

    /// Reads and validates a JSON table from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FactorTableError> {
        let path = path.as_ref();
        let doc = fs::read_to_string(path)?;
        let table = Self::from_json_str(&doc)?;
        info!("Loaded emission factor table from {}", path.display());
        Ok(table)
    }

    fn entries(&self) -> Vec<(&'static str, f64)> {
        let t = &self.transportation;
        let e = &self.energy;
        let f = &self.food;
        let s = &self.shopping;
        let q = &self.equivalence;
        let r = &self.reference;
        vec![
            ("transportation.car.small", t.car.small),
            ("transportation.car.medium", t.car.medium),
            ("transportation.car.large", t.car.large),
            ("transportation.car.electric", t.car.electric),
            ("transportation.publicTransportPerMile", t.public_transport_per_mile),
            ("transportation.flightPerHour", t.flight_per_hour),
            ("energy.electricityPerKwh", e.electricity_per_kwh),
            ("energy.naturalGasPerTherm", e.natural_gas_per_therm),
            ("energy.heatingOilPerGallon", e.heating_oil_per_gallon),
            ("food.meat.none", f.meat.none),
            ("food.meat.low", f.meat.low),
            ("food.meat.medium", f.meat.medium),
            ("food.meat.high", f.meat.high),
            ("food.dairy.none", f.dairy.none),
            ("food.dairy.low", f.dairy.low),
            ("food.dairy.medium", f.dairy.medium),
            ("food.dairy.high", f.dairy.high),
            ("food.localFood.none", f.local_food.none),
            ("food.localFood.low", f.local_food.low),
            ("food.localFood.medium", f.local_food.medium),
            ("food.localFood.high", f.local_food.high),
            ("shopping.clothingPerUnit", s.clothing_per_unit),
            ("shopping.electronicsPerUnit", s.electronics_per_unit),
            ("shopping.otherPerUnit", s.other_per_unit),
            ("equivalence.treesPerTon", q.trees_per_ton),
            ("equivalence.milesPerKg", q.miles_per_kg),
            ("equivalence.phoneChargesPerKg", q.phone_charges_per_kg),
            ("equivalence.homeEnergyDaysPerKg", q.home_energy_days_per_kg),
            ("reference.globalTons", r.global_tons),
            ("reference.regionalTons", r.regional_tons),
        ]
    }

    /// Every factor must be finite and non-negative.
    pub fn validate(&self) -> Result<(), FactorTableError> {
        for (path, value) in self.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(FactorTableError::InvalidFactor { path, value });
            }
        }
        Ok(())
    }
}

/// Built-in table, constructed on first use and shared for the process lifetime.
pub fn default_factors() -> Arc<EmissionFactorTable> {
    static DEFAULT: OnceLock<Arc<EmissionFactorTable>> = OnceLock::new();
    Arc::clone(DEFAULT.get_or_init(|| Arc::new(EmissionFactorTable::default())))
}

/// Read-mostly handle to the process-wide table.
///
/// Readers take an `Arc` snapshot and never hold the lock while computing.
/// `replace` swaps the whole table in one step.
#[derive(Debug, Default)]
pub struct SharedFactorTable {
    current: RwLock<Arc<EmissionFactorTable>>,
}

impl SharedFactorTable {
    /// Fails if `table` does not validate.
    pub fn new(table: EmissionFactorTable) -> Result<Self, FactorTableError> {
        table.validate()?;
        Ok(SharedFactorTable {
            current: RwLock::new(Arc::new(table)),
        })
    }

    /// The table installed right now.
    pub fn snapshot(&self) -> Arc<EmissionFactorTable> {
        // A writer only assigns an Arc, so a poisoned lock still holds a whole table.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Validates `table`, installs it and returns the previous one.
    pub fn replace(
        &self,
        table: EmissionFactorTable,
    ) -> Result<Arc<EmissionFactorTable>, FactorTableError> {
        table.validate()?;
        let next = Arc::new(table);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let previous = std::mem::replace(&mut *guard, next);
        info!("Emission factor table replaced");
        Ok(previous)
    }
}
