//! Wire types for the NHTSA vPIC decode endpoint and the typed profile we
//! build from its flat Variable/Value result list.

use crate::error::TruckestError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct DecodeVinResponse {
    #[serde(rename = "Results", default)]
    pub results: Vec<DecodeVinItem>,
}

#[derive(Debug, Deserialize)]
pub struct DecodeVinItem {
    #[serde(rename = "Variable")]
    pub variable: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

/// Decoded vehicle attributes. Field names are our own; the registry's
/// variable labels are mapped in [`VehicleProfile::from_results`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub vin: String,
    pub vehicle_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub body_class: Option<String>,
    pub drive_type: Option<String>,
    pub engine_model: Option<String>,
    pub engine_cylinders: Option<i64>,
    pub displacement_l: Option<f64>,
    pub fuel_type: Option<String>,
    pub brake_system: Option<String>,
    pub manufacturer: Option<String>,
    pub plant: Option<String>,
    pub series: Option<String>,
    pub trim: Option<String>,
    pub weight_class: Option<String>,
    pub gvwr: Option<String>,
    pub doors: Option<i64>,
    pub cab_type: Option<String>,
}

impl VehicleProfile {
    /// Build a profile from the registry's flat result list.
    ///
    /// Blank values and the registry's "Not Applicable" placeholder are
    /// dropped. A non-zero "Error Code" answer is surfaced with the
    /// registry's own error text; an empty or make/model-less answer means
    /// the VIN decoded to nothing usable.
    pub fn from_results(vin: &str, results: &[DecodeVinItem]) -> Result<Self, TruckestError> {
        if results.is_empty() {
            return Err(TruckestError::NotFound("Vehicle data for this VIN"));
        }

        let mut fields: HashMap<&str, &str> = HashMap::new();
        for item in results {
            let (Some(variable), Some(value)) = (item.variable.as_deref(), item.value.as_deref())
            else {
                continue;
            };
            if value.is_empty() || value == "Not Applicable" {
                continue;
            }
            fields.insert(variable, value);
        }

        if let Some(code) = fields.get("Error Code")
            && *code != "0"
        {
            let message = fields
                .get("Error Text")
                .map(|t| (*t).to_string())
                .unwrap_or_else(|| format!("registry error code {code}"));
            return Err(TruckestError::RegistryRejected(message));
        }

        let text = |variable: &str| fields.get(variable).map(|v| (*v).to_string());
        let int = |variable: &str| fields.get(variable).and_then(|v| v.parse::<i64>().ok());

        let plant = match (fields.get("Plant City"), fields.get("Plant State")) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(city), None) => Some((*city).to_string()),
            (None, Some(state)) => Some((*state).to_string()),
            (None, None) => None,
        };

        let profile = Self {
            vin: vin.to_string(),
            vehicle_type: text("Vehicle Type"),
            make: text("Make"),
            model: text("Model"),
            year: int("Model Year"),
            body_class: text("Body Class"),
            drive_type: text("Drive Type"),
            engine_model: text("Engine Model").or_else(|| text("Engine Configuration")),
            engine_cylinders: int("Engine Number of Cylinders"),
            displacement_l: fields
                .get("Displacement (L)")
                .and_then(|v| v.parse::<f64>().ok()),
            fuel_type: text("Fuel Type - Primary"),
            brake_system: text("Brake System Type"),
            manufacturer: text("Manufacturer Name"),
            plant,
            series: text("Series"),
            trim: text("Trim"),
            weight_class: text("Gross Vehicle Weight Rating Class"),
            gvwr: text("Gross Vehicle Weight Rating"),
            doors: int("Doors"),
            cab_type: text("Cab Type"),
        };

        if profile.make.is_none() || profile.model.is_none() {
            return Err(TruckestError::NotFound(
                "Usable vehicle data associated with this VIN",
            ));
        }
        Ok(profile)
    }
}
