use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, CalcError};
use crate::factors::ReferenceAverages;

/// Where an annual footprint sits relative to the reference averages.
/// Ordered from lowest to highest footprint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Standing {
    WellBelowGlobal,
    BelowGlobal,
    AboveGlobalBelowRegional,
    AboveRegional,
}

/// Alert level a presentation layer attaches to a standing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Standing {
    /// Success below the global average, warning up to the regional one.
    pub fn severity(self) -> Severity {
        match self {
            Standing::WellBelowGlobal | Standing::BelowGlobal => Severity::Success,
            Standing::AboveGlobalBelowRegional => Severity::Warning,
            Standing::AboveRegional => Severity::Error,
        }
    }
}

/// Footprint as a percentage of each reference, capped at 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceComparison {
    pub percent_of_global: f64,
    pub percent_of_regional: f64,
}

/// Classification of annual tons CO2e against reference footprints.
pub trait StandingClassifier {
    /// Total over non-negative input; negative tons are rejected.
    fn classify(&self, tons: f64) -> Result<Standing, CalcError>;
    fn relative_to_reference(&self, tons: f64) -> Result<ReferenceComparison, CalcError>;
}

/// Fixed-threshold classifier. A value equal to a threshold falls in the
/// higher band.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdStanding {
    pub global_tons: f64,
    pub regional_tons: f64,
    /// Fraction of the global average below which a footprint is "well below".
    pub well_below_ratio: f64,
}

impl Default for ThresholdStanding {
    fn default() -> Self {
        ThresholdStanding::from(&ReferenceAverages::default())
    }
}

impl From<&ReferenceAverages> for ThresholdStanding {
    fn from(reference: &ReferenceAverages) -> Self {
        ThresholdStanding {
            global_tons: reference.global_tons,
            regional_tons: reference.regional_tons,
            well_below_ratio: 0.5,
        }
    }
}

fn capped_percent(tons: f64, reference: f64) -> f64 {
    if reference <= 0.0 {
        0.0
    } else {
        (tons / reference * 100.0).min(100.0)
    }
}

impl StandingClassifier for ThresholdStanding {
    fn classify(&self, tons: f64) -> Result<Standing, CalcError> {
        let tons = check_non_negative("tons", tons)?;
        let standing = if tons < self.global_tons * self.well_below_ratio {
            Standing::WellBelowGlobal
        } else if tons < self.global_tons {
            Standing::BelowGlobal
        } else if tons < self.regional_tons {
            Standing::AboveGlobalBelowRegional
        } else {
            Standing::AboveRegional
        };
        Ok(standing)
    }

    fn relative_to_reference(&self, tons: f64) -> Result<ReferenceComparison, CalcError> {
        let tons = check_non_negative("tons", tons)?;
        Ok(ReferenceComparison {
            percent_of_global: capped_percent(tons, self.global_tons),
            percent_of_regional: capped_percent(tons, self.regional_tons),
        })
    }
}
