use std::env;
use std::error::Error;
use std::fs;
use std::sync::Arc;

use carbon_footprint::{assess, CarType, ConsumptionLevel, EmissionFactorTable, EmissionInput};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const FACTORS_VAR: &str = "CARBON_FACTORS";

fn sample_input() -> EmissionInput {
    // A commuter household: one mid-size car, a couple of flights, gas heating.
    EmissionInput {
        car_mileage: 10_000.0,
        car_type: CarType::Medium,
        public_transport_miles: 1_200.0,
        flight_hours: 8.0,
        electricity_kwh_per_month: 500.0,
        natural_gas_therms_per_month: 30.0,
        heating_oil_gallons_per_month: 0.0,
        meat_level: ConsumptionLevel::Medium,
        dairy_level: ConsumptionLevel::Low,
        local_food_level: ConsumptionLevel::Medium,
        clothing_spend: 800.0,
        electronics_spend: 400.0,
        other_shopping_spend: 1_500.0,
    }
}

fn load_factors() -> Result<EmissionFactorTable, Box<dyn Error>> {
    match env::var(FACTORS_VAR) {
        Ok(path) => Ok(EmissionFactorTable::from_path(path)?),
        Err(_) => {
            info!("{FACTORS_VAR} not set, using built-in emission factors");
            Ok(EmissionFactorTable::default())
        }
    }
}

fn load_input() -> Result<EmissionInput, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => {
            let body = fs::read_to_string(&path)?;
            Ok(EmissionInput::from_json_str(&body)?)
        }
        None => {
            warn!("No input file given, using sample household");
            Ok(sample_input())
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let factors = Arc::new(load_factors()?);
    let input = load_input()?;

    let report = assess(&input, factors)?;
    info!(
        total_kg = report.result.total_emissions,
        standing = ?report.standing,
        "Footprint assessed"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
