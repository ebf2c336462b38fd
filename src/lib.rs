#![forbid(unsafe_code)]

//! Annual carbon-footprint estimation.
//!
//! [`EmissionsCalculator`] turns an [`EmissionInput`] into a per-category
//! [`EmissionResult`]; [`equivalence`] restates the total in everyday units and
//! [`standing`] places it against reference averages. Everything here is pure
//! computation over a read-only [`EmissionFactorTable`].

pub mod activity;
pub mod calculator;
pub mod equivalence;
pub mod error;
pub mod factors;
pub mod input;
pub mod report;
pub mod standing;

pub use activity::{activity_impact, ActivityCategory, ActivityImpact, ActivityKind};
pub use calculator::{
    compute_energy_emissions, compute_food_emissions, compute_shopping_emissions,
    compute_total_emissions, compute_transportation_emissions, CategoryBreakdown,
    CategoryShares, EmissionResult, EmissionsCalculator,
};
pub use equivalence::{compute_equivalences, EquivalenceSet};
pub use error::{CalcError, FactorTableError};
pub use factors::{default_factors, EmissionFactorTable, SharedFactorTable};
pub use input::{CarType, ConsumptionLevel, EmissionInput};
pub use report::{assess, FootprintReport};
pub use standing::{Severity, Standing, StandingClassifier, ThresholdStanding};
