// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud API boundary for Velis devices.
//!
//! Devices talk to the cloud only through the [`VelisApi`] trait, so the
//! transport can be swapped (a recording mock in tests, [`AristonClient`]
//! against the real service).
//!
//! # Implementations
//!
//! - [`AristonClient`]: HTTP client for the Ariston NET remote-thermo API

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{ApiConfig, AristonClient};

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::error::ApiError;
use crate::types::{PlantData, UnitSystem, WheType};

/// Summary of a Velis plant as listed by the cloud.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelisPlantInfo {
    /// Gateway identifier.
    pub gw: String,
    /// Plant name chosen by the user.
    #[serde(default)]
    pub name: Option<String>,
    /// Gateway serial number.
    #[serde(default)]
    pub sn: Option<String>,
    /// Water heater type.
    #[serde(default)]
    pub whe_type: WheType,
    /// Water heater model variant.
    #[serde(default)]
    pub whe_model_type: Option<i64>,
}

/// Trait for cloud API implementations that serve Velis plants.
#[allow(async_fn_in_trait)]
pub trait VelisApi {
    /// Writes a single plant setting.
    ///
    /// The cloud expects the value the client believes is current alongside
    /// the new one, so `old_value` must be the last cached value.
    ///
    /// # Arguments
    ///
    /// * `plant_data` - Endpoint family of the plant
    /// * `gw` - Gateway identifier of the plant
    /// * `setting` - Plant setting key
    /// * `value` - New value
    /// * `old_value` - Previously cached value
    /// * `umsys` - Unit system the values are expressed in
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    async fn set_velis_plant_setting(
        &self,
        plant_data: PlantData,
        gw: &str,
        setting: &str,
        value: f64,
        old_value: f64,
        umsys: UnitSystem,
    ) -> Result<(), ApiError>;

    /// Fetches the live readings of a plant.
    ///
    /// Returns `None` if the cloud has nothing for this plant.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body is not an object.
    async fn get_velis_plant_data(
        &self,
        plant_data: PlantData,
        gw: &str,
        umsys: UnitSystem,
    ) -> Result<Option<Map<String, Value>>, ApiError>;

    /// Fetches the plant settings of a plant.
    ///
    /// Returns `None` if the cloud has nothing for this plant.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body is not an object.
    async fn get_velis_plant_settings(
        &self,
        plant_data: PlantData,
        gw: &str,
        umsys: UnitSystem,
    ) -> Result<Option<Map<String, Value>>, ApiError>;
}

/// Builds the request body of a plant setting write.
///
/// # Examples
///
/// ```
/// use velis_lib::protocol::plant_setting_body;
/// use serde_json::json;
///
/// let body = plant_setting_body("MedMaxSetpointTemperature", 65.0, 60.0);
/// assert_eq!(body, json!({"MedMaxSetpointTemperature": {"new": 65.0, "old": 60.0}}));
/// ```
#[must_use]
pub fn plant_setting_body(setting: &str, value: f64, old_value: f64) -> Value {
    let mut body = Map::new();
    body.insert(setting.to_string(), json!({ "new": value, "old": old_value }));
    Value::Object(body)
}
