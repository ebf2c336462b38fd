//! Single logged activities (a car trip, a bag of recycling).
//!
//! Each subcategory converts an amount in its own unit into kg CO2e.
//! Recycling is a credit: it offsets emissions instead of adding to them,
//! and is reported as [`ActivityImpact::Credit`] so it can never leak into
//! an additive footprint by accident.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, CalcError};

/// Top-level grouping of loggable activities.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Transportation,
    Energy,
    Food,
    Lifestyle,
}

/// One loggable activity subcategory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Car,
    Bus,
    Train,
    Plane,
    Electricity,
    Gas,
    Heating,
    Meat,
    Dairy,
    Vegetables,
    Waste,
    Water,
    Recycling,
}

/// Catalog entry for one activity kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivitySpec {
    pub category: ActivityCategory,
    pub unit: &'static str,
    /// kg CO2e per unit, always non-negative.
    pub kg_per_unit: f64,
    pub is_credit: bool,
}

const fn emits(category: ActivityCategory, unit: &'static str, kg_per_unit: f64) -> ActivitySpec {
    ActivitySpec {
        category,
        unit,
        kg_per_unit,
        is_credit: false,
    }
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 13] = [
        ActivityKind::Car,
        ActivityKind::Bus,
        ActivityKind::Train,
        ActivityKind::Plane,
        ActivityKind::Electricity,
        ActivityKind::Gas,
        ActivityKind::Heating,
        ActivityKind::Meat,
        ActivityKind::Dairy,
        ActivityKind::Vegetables,
        ActivityKind::Waste,
        ActivityKind::Water,
        ActivityKind::Recycling,
    ];

    /// Lowercase id accepted by `from_str`.
    pub fn id(self) -> &'static str {
        match self {
            ActivityKind::Car => "car",
            ActivityKind::Bus => "bus",
            ActivityKind::Train => "train",
            ActivityKind::Plane => "plane",
            ActivityKind::Electricity => "electricity",
            ActivityKind::Gas => "gas",
            ActivityKind::Heating => "heating",
            ActivityKind::Meat => "meat",
            ActivityKind::Dairy => "dairy",
            ActivityKind::Vegetables => "vegetables",
            ActivityKind::Waste => "waste",
            ActivityKind::Water => "water",
            ActivityKind::Recycling => "recycling",
        }
    }

    /// Category, unit and conversion factor.
    pub fn spec(self) -> ActivitySpec {
        use ActivityCategory::*;
        match self {
            ActivityKind::Car => emits(Transportation, "km", 0.2),
            ActivityKind::Bus => emits(Transportation, "km", 0.1),
            ActivityKind::Train => emits(Transportation, "km", 0.05),
            ActivityKind::Plane => emits(Transportation, "km", 0.3),
            ActivityKind::Electricity => emits(Energy, "kWh", 0.5),
            ActivityKind::Gas => emits(Energy, "m3", 2.1),
            ActivityKind::Heating => emits(Energy, "L", 2.7),
            ActivityKind::Meat => emits(Food, "kg", 13.3),
            ActivityKind::Dairy => emits(Food, "kg", 3.2),
            ActivityKind::Vegetables => emits(Food, "kg", 0.4),
            ActivityKind::Waste => emits(Lifestyle, "kg", 0.5),
            ActivityKind::Water => emits(Lifestyle, "L", 0.001),
            ActivityKind::Recycling => ActivitySpec {
                is_credit: true,
                ..emits(Lifestyle, "kg", 0.5)
            },
        }
    }

    /// Kinds belonging to `category`, in catalog order.
    pub fn in_category(category: ActivityCategory) -> impl Iterator<Item = ActivityKind> {
        ActivityKind::ALL
            .into_iter()
            .filter(move |k| k.spec().category == category)
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ActivityKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        ActivityKind::ALL
            .into_iter()
            .find(|k| k.id() == id)
            .ok_or_else(|| CalcError::UnknownActivity(s.to_string()))
    }
}

/// Magnitude of one activity's effect, kg CO2e, with its sign made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "kg", rename_all = "lowercase")]
pub enum ActivityImpact {
    Emission(f64),
    Credit(f64),
}

impl ActivityImpact {
    /// Non-negative size of the effect.
    pub fn magnitude_kg(self) -> f64 {
        match self {
            ActivityImpact::Emission(kg) | ActivityImpact::Credit(kg) => kg,
        }
    }

    /// Emissions positive, credits negative.
    pub fn signed_kg(self) -> f64 {
        match self {
            ActivityImpact::Emission(kg) => kg,
            ActivityImpact::Credit(kg) => -kg,
        }
    }
}

/// Converts `amount` units of `kind` into kg CO2e, rejecting negative amounts.
pub fn activity_impact(kind: ActivityKind, amount: f64) -> Result<ActivityImpact, CalcError> {
    let amount = check_non_negative("amount", amount)?;
    let spec = kind.spec();
    let kg = amount * spec.kg_per_unit;
    Ok(if spec.is_credit {
        ActivityImpact::Credit(kg)
    } else {
        ActivityImpact::Emission(kg)
    })
}

/// Net signed kg over a batch of logged activities.
pub fn net_activity_kg(activities: &[(ActivityKind, f64)]) -> Result<f64, CalcError> {
    activities.iter().try_fold(0.0, |acc, &(kind, amount)| {
        Ok(acc + activity_impact(kind, amount)?.signed_kg())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_trip_emits() {
        let impact = activity_impact(ActivityKind::Car, 50.0).unwrap();
        assert!(matches!(impact, ActivityImpact::Emission(kg) if (kg - 10.0).abs() < 1e-9));
    }

    #[test]
    fn recycling_is_a_credit() {
        let impact = activity_impact(ActivityKind::Recycling, 4.0).unwrap();
        assert_eq!(impact, ActivityImpact::Credit(2.0));
        assert_eq!(impact.magnitude_kg(), 2.0);
        assert_eq!(impact.signed_kg(), -2.0);
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(matches!(
            activity_impact(ActivityKind::Meat, -1.0),
            Err(CalcError::InvalidInput { field: "amount", .. })
        ));
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for kind in ActivityKind::ALL {
            assert_eq!(kind.id().parse::<ActivityKind>().unwrap(), kind);
        }
        assert_eq!(" Plane ".parse::<ActivityKind>().unwrap(), ActivityKind::Plane);
    }

    #[test]
    fn unknown_id_is_an_error() {
        assert_eq!(
            "teleport".parse::<ActivityKind>(),
            Err(CalcError::UnknownActivity("teleport".to_string()))
        );
    }

    #[test]
    fn catalog_factors_are_non_negative() {
        assert!(ActivityKind::ALL.iter().all(|k| k.spec().kg_per_unit >= 0.0));
        assert_eq!(
            ActivityKind::ALL.iter().filter(|k| k.spec().is_credit).count(),
            1
        );
    }

    #[test]
    fn categories_partition_the_catalog() {
        let lifestyle: Vec<_> = ActivityKind::in_category(ActivityCategory::Lifestyle).collect();
        assert_eq!(
            lifestyle,
            vec![ActivityKind::Waste, ActivityKind::Water, ActivityKind::Recycling]
        );
        let total: usize = [
            ActivityCategory::Transportation,
            ActivityCategory::Energy,
            ActivityCategory::Food,
            ActivityCategory::Lifestyle,
        ]
        .into_iter()
        .map(|c| ActivityKind::in_category(c).count())
        .sum();
        assert_eq!(total, ActivityKind::ALL.len());
    }

    #[test]
    fn net_subtracts_credits() {
        let net = net_activity_kg(&[
            (ActivityKind::Waste, 10.0),
            (ActivityKind::Recycling, 4.0),
        ])
        .unwrap();
        assert!((net - 3.0).abs() < 1e-9);
    }

    #[test]
    fn impact_serializes_with_explicit_sign_tag() {
        let json = serde_json::to_value(ActivityImpact::Credit(1.5)).unwrap();
        assert_eq!(json["kind"], "credit");
        assert_eq!(json["kg"], 1.5);
    }
}
