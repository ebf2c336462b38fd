use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::calculator::{CategoryShares, EmissionResult, EmissionsCalculator};
use crate::equivalence::{translate, EquivalenceSet};
use crate::error::CalcError;
use crate::factors::EmissionFactorTable;
use crate::input::EmissionInput;
use crate::standing::{ReferenceComparison, Standing, StandingClassifier, ThresholdStanding};

/// Everything a caller usually renders for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootprintReport {
    pub result: EmissionResult,
    pub shares: CategoryShares,
    pub equivalences: EquivalenceSet,
    pub standing: Standing,
    pub comparison: ReferenceComparison,
}

/// Runs calculator, translator and classifier against one factor table.
pub fn assess(
    input: &EmissionInput,
    factors: Arc<EmissionFactorTable>,
) -> Result<FootprintReport, CalcError> {
    let classifier = ThresholdStanding::from(&factors.reference);
    let equivalence = factors.equivalence.clone();
    let calculator = EmissionsCalculator::new(factors);

    let result = calculator.total(input)?;
    let tons = result.total_tons();
    Ok(FootprintReport {
        result,
        shares: result.shares(),
        equivalences: translate(result.total_emissions, &equivalence)?,
        standing: classifier.classify(tons)?,
        comparison: classifier.relative_to_reference(tons)?,
    })
}
