use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, CalcError};

/// Vehicle class driven for `car_mileage`. Labels deserialize through
/// `From<&str>`, so they are trimmed and case-insensitive.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CarType {
    Small,
    #[default]
    Medium,
    Large,
    Electric,
    /// Any label outside the declared set. Priced as `Medium`.
    Unrecognized,
}

impl From<&str> for CarType {
    fn from(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "small" => CarType::Small,
            "medium" => CarType::Medium,
            "large" => CarType::Large,
            "electric" => CarType::Electric,
            _ => CarType::Unrecognized,
        }
    }
}

impl From<String> for CarType {
    fn from(label: String) -> Self {
        CarType::from(label.as_str())
    }
}

/// Ordinal consumption level used by the food category. Parsed like
/// [`CarType`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ConsumptionLevel {
    None,
    Low,
    #[default]
    Medium,
    High,
    /// Any label outside the declared set. Priced as `Medium`.
    Unrecognized,
}

impl From<&str> for ConsumptionLevel {
    fn from(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "none" => ConsumptionLevel::None,
            "low" => ConsumptionLevel::Low,
            "medium" => ConsumptionLevel::Medium,
            "high" => ConsumptionLevel::High,
            _ => ConsumptionLevel::Unrecognized,
        }
    }
}

impl From<String> for ConsumptionLevel {
    fn from(label: String) -> Self {
        ConsumptionLevel::from(label.as_str())
    }
}

/// Lifestyle record fed to the calculator.
///
/// Field names follow the camelCase wire shape. Older payload names
/// (`publicTransport`, `flights`, `electricity`, `meatConsumption`, ...) are
/// accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionInput {
    // Transportation, per year
    pub car_mileage: f64,
    pub car_type: CarType,
    #[serde(alias = "publicTransport")]
    pub public_transport_miles: f64,
    #[serde(alias = "flights")]
    pub flight_hours: f64,

    // Energy, per month
    #[serde(alias = "electricity")]
    pub electricity_kwh_per_month: f64,
    #[serde(alias = "naturalGas")]
    pub natural_gas_therms_per_month: f64,
    #[serde(alias = "heatingOil")]
    pub heating_oil_gallons_per_month: f64,

    // Food
    #[serde(alias = "meatConsumption")]
    pub meat_level: ConsumptionLevel,
    #[serde(alias = "dairyConsumption")]
    pub dairy_level: ConsumptionLevel,
    #[serde(alias = "localFood")]
    pub local_food_level: ConsumptionLevel,

    // Shopping, currency per year
    #[serde(alias = "clothing")]
    pub clothing_spend: f64,
    #[serde(alias = "electronics")]
    pub electronics_spend: f64,
    #[serde(alias = "otherShopping")]
    pub other_shopping_spend: f64,
}

impl EmissionInput {
    /// Parses a JSON body and validates it.
    pub fn from_json_str(body: &str) -> Result<Self, CalcError> {
        let input: EmissionInput =
            serde_json::from_str(body).map_err(|e| CalcError::Malformed(e.to_string()))?;
        input.validate()?;
        Ok(input)
    }

    /// Every numeric field paired with its wire name.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 9] {
        [
            ("carMileage", self.car_mileage),
            ("publicTransportMiles", self.public_transport_miles),
            ("flightHours", self.flight_hours),
            ("electricityKwhPerMonth", self.electricity_kwh_per_month),
            ("naturalGasThermsPerMonth", self.natural_gas_therms_per_month),
            ("heatingOilGallonsPerMonth", self.heating_oil_gallons_per_month),
            ("clothingSpend", self.clothing_spend),
            ("electronicsSpend", self.electronics_spend),
            ("otherShoppingSpend", self.other_shopping_spend),
        ]
    }

    /// Fails on the first negative or non-finite numeric field.
    pub fn validate(&self) -> Result<(), CalcError> {
        for (field, value) in self.numeric_fields() {
            check_non_negative(field, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_labels_deserialize_as_unrecognized() {
        let car: CarType = serde_json::from_str("\"hovercraft\"").unwrap();
        assert_eq!(car, CarType::Unrecognized);
        let level: ConsumptionLevel = serde_json::from_str("\"extreme\"").unwrap();
        assert_eq!(level, ConsumptionLevel::Unrecognized);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(CarType::from(" Electric "), CarType::Electric);
        assert_eq!(ConsumptionLevel::from("HIGH"), ConsumptionLevel::High);
        assert_eq!(ConsumptionLevel::from("lots"), ConsumptionLevel::Unrecognized);
    }

    #[test]
    fn json_labels_parse_like_from_str() {
        for label in ["Large", " ELECTRIC ", "hovercraft"] {
            let json: CarType = serde_json::from_value(serde_json::json!(label)).unwrap();
            assert_eq!(json, CarType::from(label));
        }
        for label in ["HIGH", "Low", "lots"] {
            let json: ConsumptionLevel = serde_json::from_value(serde_json::json!(label)).unwrap();
            assert_eq!(json, ConsumptionLevel::from(label));
        }

        let body = r#"{
            "carMileage": 1000, "carType": "Large",
            "publicTransportMiles": 0, "flightHours": 0,
            "electricityKwhPerMonth": 0, "naturalGasThermsPerMonth": 0,
            "heatingOilGallonsPerMonth": 0,
            "meatLevel": "HIGH", "dairyLevel": "None", "localFoodLevel": "medium",
            "clothingSpend": 0, "electronicsSpend": 0, "otherShoppingSpend": 0
        }"#;
        let input = EmissionInput::from_json_str(body).unwrap();
        assert_eq!(input.car_type, CarType::Large);
        assert_eq!(input.meat_level, ConsumptionLevel::High);
        assert_eq!(input.dairy_level, ConsumptionLevel::None);
    }

    #[test]
    fn labels_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(CarType::Electric).unwrap(),
            serde_json::json!("electric")
        );
        assert_eq!(
            serde_json::to_value(ConsumptionLevel::None).unwrap(),
            serde_json::json!("none")
        );
    }

    #[test]
    fn parses_camel_case_body() {
        let body = r#"{
            "carMileage": 10000, "carType": "large",
            "publicTransportMiles": 100, "flightHours": 4,
            "electricityKwhPerMonth": 500, "naturalGasThermsPerMonth": 20,
            "heatingOilGallonsPerMonth": 0,
            "meatLevel": "low", "dairyLevel": "high", "localFoodLevel": "none",
            "clothingSpend": 600, "electronicsSpend": 300, "otherShoppingSpend": 1000
        }"#;
        let input = EmissionInput::from_json_str(body).unwrap();
        assert_eq!(input.car_type, CarType::Large);
        assert_eq!(input.dairy_level, ConsumptionLevel::High);
        assert_eq!(input.other_shopping_spend, 1000.0);
    }

    #[test]
    fn accepts_legacy_field_names() {
        let body = r#"{
            "carMileage": 50, "carType": "small",
            "publicTransport": 10, "flights": 2,
            "electricity": 300, "naturalGas": 5, "heatingOil": 1,
            "meatConsumption": "medium", "dairyConsumption": "low", "localFood": "high",
            "clothing": 1, "electronics": 2, "otherShopping": 3
        }"#;
        let input = EmissionInput::from_json_str(body).unwrap();
        assert_eq!(input.public_transport_miles, 10.0);
        assert_eq!(input.electricity_kwh_per_month, 300.0);
        assert_eq!(input.local_food_level, ConsumptionLevel::High);
    }

    #[test]
    fn missing_or_mistyped_fields_are_malformed() {
        let missing = r#"{ "carMileage": 1 }"#;
        assert!(matches!(
            EmissionInput::from_json_str(missing),
            Err(CalcError::Malformed(_))
        ));

        let mistyped = r#"{
            "carMileage": "far", "carType": "small",
            "publicTransportMiles": 0, "flightHours": 0,
            "electricityKwhPerMonth": 0, "naturalGasThermsPerMonth": 0,
            "heatingOilGallonsPerMonth": 0,
            "meatLevel": "low", "dairyLevel": "low", "localFoodLevel": "low",
            "clothingSpend": 0, "electronicsSpend": 0, "otherShoppingSpend": 0
        }"#;
        assert!(matches!(
            EmissionInput::from_json_str(mistyped),
            Err(CalcError::Malformed(_))
        ));
    }

    #[test]
    fn negative_field_fails_validation() {
        let input = EmissionInput {
            electronics_spend: -5.0,
            ..EmissionInput::default()
        };
        assert_eq!(
            input.validate(),
            Err(CalcError::InvalidInput {
                field: "electronicsSpend",
                value: -5.0
            })
        );
    }
}
