// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Velis water heater proxies.
//!
//! A [`VelisDevice`] mirrors one plant of the cloud account. Reads come from
//! a local cache of live data and plant settings; writes go to the cloud
//! first and update the cache only once the cloud has accepted them.
//!
//! # Async and Blocking Use
//!
//! [`VelisDevice`] is async. [`BlockingVelisDevice`] wraps the same device
//! and drives each operation to completion on its own runtime.
//!
//! ```no_run
//! use std::sync::Arc;
//! use velis_lib::{VelisDevice, VelisFamily};
//! use velis_lib::protocol::ApiConfig;
//!
//! # async fn example() -> velis_lib::Result<()> {
//! let api = Arc::new(ApiConfig::new("user@example.com", "secret").into_client()?);
//! api.connect().await?;
//!
//! let device = VelisDevice::builder(api, VelisFamily::Med, "F0AD4E0A1B2C")
//!     .build_and_refresh()
//!     .await?;
//!
//! device.set_antilegionella(true).await?;
//! device.set_max_setpoint_temp(70.0).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Writes to the same device are serialized: each setter holds a per-device
//! gate while it reads the old value, calls the cloud and stores the new
//! value. Reads never wait for the gate.

mod blocking;
mod builder;
#[cfg(test)]
pub(crate) mod mock;
mod model;

pub use blocking::BlockingVelisDevice;
pub use builder::VelisDeviceBuilder;
pub use model::{PROC_REQ_TEMP, VelisFamily, VelisModel};

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::error::{DeviceError, Error, ParseError, ValueError};
use crate::protocol::{VelisApi, VelisPlantInfo};
use crate::state::{DeviceState, value_as_flag};
use crate::types::UnitSystem;

/// A Velis water heater reachable through the cloud.
///
/// # Type Parameters
///
/// - `A`: the cloud API, usually [`AristonClient`](crate::protocol::AristonClient)
/// - `M`: the family constants, [`VelisFamily`] unless a custom model is used
#[derive(Debug)]
pub struct VelisDevice<A, M = VelisFamily> {
    api: Arc<A>,
    model: M,
    gw: String,
    name: Option<String>,
    unit_system: UnitSystem,
    language_tag: String,
    state: Arc<RwLock<DeviceState>>,
    write_gate: Mutex<()>,
}

impl<A: VelisApi> VelisDevice<A, VelisFamily> {
    /// Creates a device builder from a plant listed by the cloud.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedModel` if the plant's water heater
    /// type does not belong to a known family.
    pub fn from_plant_info(
        api: Arc<A>,
        info: &VelisPlantInfo,
    ) -> Result<VelisDeviceBuilder<A, VelisFamily>, Error> {
        let family = VelisFamily::from_whe_type(info.whe_type).ok_or_else(|| {
            DeviceError::UnsupportedModel(format!("{} ({:?})", info.gw, info.whe_type))
        })?;

        let mut builder = VelisDeviceBuilder::new(api, family, info.gw.clone());
        if let Some(name) = &info.name {
            builder = builder.name(name.clone());
        }
        Ok(builder)
    }
}

impl<A: VelisApi, M: VelisModel> VelisDevice<A, M> {
    /// Creates a builder for a device behind the given gateway.
    pub fn builder(api: Arc<A>, model: M, gw: impl Into<String>) -> VelisDeviceBuilder<A, M> {
        VelisDeviceBuilder::new(api, model, gw.into())
    }

    pub(crate) fn new(
        api: Arc<A>,
        model: M,
        gw: String,
        name: Option<String>,
        unit_system: UnitSystem,
        language_tag: String,
    ) -> Self {
        Self {
            api,
            model,
            gw,
            name,
            unit_system,
            language_tag,
            state: Arc::new(RwLock::new(DeviceState::new())),
            write_gate: Mutex::new(()),
        }
    }

    // ========== Identity ==========

    /// Returns the gateway identifier.
    #[must_use]
    pub fn gw(&self) -> &str {
        &self.gw
    }

    /// Returns the plant name, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the family constants.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the unit system.
    #[must_use]
    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    /// Returns the language tag.
    #[must_use]
    pub fn language_tag(&self) -> &str {
        &self.language_tag
    }

    /// Returns a snapshot of the cached state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state.read().clone()
    }

    // ========== Cached Readings ==========

    /// Returns whether the anti-legionella cycle is enabled.
    #[must_use]
    pub fn water_anti_leg_value(&self) -> Option<bool> {
        self.state
            .read()
            .plant_setting_flag(self.model.anti_legionella_on_off())
    }

    /// Returns the process requested temperature.
    #[must_use]
    pub fn proc_req_temp_value(&self) -> Option<f64> {
        self.state.read().data_number(PROC_REQ_TEMP)
    }

    /// Returns the maximum setpoint temperature.
    #[must_use]
    pub fn water_heater_maximum_setpoint_temperature(&self) -> Option<f64> {
        self.state
            .read()
            .plant_setting_number(self.model.max_setpoint_temp())
    }

    /// Returns the lowest value the maximum setpoint may be set to.
    ///
    /// Echoed by the cloud; not enforced by the setters.
    #[must_use]
    pub fn water_heater_maximum_setpoint_temperature_minimum(&self) -> Option<f64> {
        self.state
            .read()
            .plant_setting_number(self.model.max_setpoint_temp_min())
    }

    /// Returns the highest value the maximum setpoint may be set to.
    ///
    /// Echoed by the cloud; not enforced by the setters.
    #[must_use]
    pub fn water_heater_maximum_setpoint_temperature_maximum(&self) -> Option<f64> {
        self.state
            .read()
            .plant_setting_number(self.model.max_setpoint_temp_max())
    }

    /// Returns the minimum water temperature.
    #[must_use]
    pub fn water_heater_minimum_temperature(&self) -> f64 {
        40.0
    }

    /// Returns the maximum water temperature, i.e. the maximum setpoint.
    #[must_use]
    pub fn water_heater_maximum_temperature(&self) -> Option<f64> {
        self.water_heater_maximum_setpoint_temperature()
    }

    /// Returns the setpoint step.
    #[must_use]
    pub fn water_heater_temperature_step(&self) -> u32 {
        1
    }

    /// Returns the number of decimals temperatures are shown with.
    #[must_use]
    pub fn water_heater_temperature_decimals(&self) -> u32 {
        0
    }

    /// Returns the temperature unit label, `°C` or `°F`.
    #[must_use]
    pub fn water_heater_temperature_unit(&self) -> &'static str {
        self.unit_system.unit_label()
    }

    // ========== Settings ==========

    /// Enables or disables the anti-legionella cycle.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSetting`] if the toggle is not cached yet; the
    ///   cloud is not called
    /// - [`Error::Api`] if the cloud rejects the write; the cache keeps its
    ///   previous value
    pub async fn set_antilegionella(&self, enabled: bool) -> Result<(), Error> {
        let key = self.model.anti_legionella_on_off();
        let _gate = self.write_gate.lock().await;

        let old = {
            let state = self.state.read();
            let cached = state.plant_setting(key).ok_or_else(|| missing(key))?;
            value_as_flag(cached).ok_or_else(|| invalid(key, cached, "an on/off flag"))?
        };

        self.write_plant_setting(key, flag_value(enabled), flag_value(old))
            .await?;
        self.state
            .write()
            .set_plant_setting(key, Value::Bool(enabled));
        Ok(())
    }

    /// Sets the maximum setpoint temperature.
    ///
    /// The value is sent as is, in the device's unit system.
    ///
    /// # Errors
    ///
    /// - [`Error::Value`] if `value` is NaN or infinite; the cloud is not
    ///   called
    /// - [`Error::MissingSetting`] if the setpoint is not cached yet; the
    ///   cloud is not called
    /// - [`Error::Api`] if the cloud rejects the write; the cache keeps its
    ///   previous value
    pub async fn set_max_setpoint_temp(&self, value: f64) -> Result<(), Error> {
        if !value.is_finite() {
            return Err(ValueError::NonFiniteTemperature(value).into());
        }
        let key = self.model.max_setpoint_temp();
        let _gate = self.write_gate.lock().await;

        let old = {
            let state = self.state.read();
            let cached = state.plant_setting(key).ok_or_else(|| missing(key))?;
            cached
                .as_f64()
                .ok_or_else(|| invalid(key, cached, "a number"))?
        };

        self.write_plant_setting(key, value, old).await?;
        self.state.write().set_plant_setting(key, Value::from(value));
        Ok(())
    }

    async fn write_plant_setting(&self, key: &str, value: f64, old_value: f64) -> Result<(), Error> {
        tracing::debug!(
            gw = %self.gw,
            setting = key,
            value,
            old_value,
            "Writing plant setting"
        );

        self.api
            .set_velis_plant_setting(
                self.model.plant_data(),
                &self.gw,
                key,
                value,
                old_value,
                self.unit_system,
            )
            .await?;
        Ok(())
    }

    // ========== Refresh ==========

    /// Refreshes live data and plant settings from the cloud.
    ///
    /// # Errors
    ///
    /// Returns error if either request fails. Live data already fetched is
    /// kept when the plant settings request fails.
    pub async fn refresh(&self) -> Result<(), Error> {
        self.update_state().await?;
        self.update_plant_settings().await
    }

    /// Refreshes live data from the cloud.
    ///
    /// The cache is left as is if the cloud has no data for the plant.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn update_state(&self) -> Result<(), Error> {
        let data = self
            .api
            .get_velis_plant_data(self.model.plant_data(), &self.gw, self.unit_system)
            .await?;

        match data {
            Some(data) => {
                tracing::debug!(gw = %self.gw, items = data.len(), "Updated live data");
                self.state.write().replace_data(data);
            }
            None => tracing::debug!(gw = %self.gw, "No live data reported"),
        }
        Ok(())
    }

    /// Refreshes plant settings from the cloud.
    ///
    /// Waits for in-flight setting writes so a refresh never interleaves
    /// with one. The cache is left as is if the cloud has no settings.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn update_plant_settings(&self) -> Result<(), Error> {
        let _gate = self.write_gate.lock().await;
        let settings = self
            .api
            .get_velis_plant_settings(self.model.plant_data(), &self.gw, self.unit_system)
            .await?;

        match settings {
            Some(settings) => {
                tracing::debug!(gw = %self.gw, items = settings.len(), "Updated plant settings");
                self.state.write().replace_plant_settings(settings);
            }
            None => tracing::debug!(gw = %self.gw, "No plant settings reported"),
        }
        Ok(())
    }

    /// Replaces the cached live data with readings obtained elsewhere.
    pub fn replace_data(&self, data: Map<String, Value>) {
        self.state.write().replace_data(data);
    }

    /// Replaces the cached plant settings with values obtained elsewhere.
    pub fn replace_plant_settings(&self, settings: Map<String, Value>) {
        self.state.write().replace_plant_settings(settings);
    }
}

fn flag_value(enabled: bool) -> f64 {
    if enabled { 1.0 } else { 0.0 }
}

fn missing(key: &str) -> Error {
    Error::MissingSetting {
        key: key.to_string(),
    }
}

fn invalid(key: &str, cached: &Value, expected: &str) -> Error {
    ParseError::InvalidValue {
        field: key.to_string(),
        message: format!("expected {expected}, found {cached}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::device::mock::{MockApi, SetCall};
    use crate::error::ApiError;
    use crate::types::{PlantData, WheType};

    /// Device in the state of the documented scenario: anti-legionella off,
    /// maximum setpoint at 60.
    fn scenario_device(api: MockApi) -> (Arc<MockApi>, VelisDevice<MockApi>) {
        let api = Arc::new(api);
        let device = VelisDevice::builder(Arc::clone(&api), VelisFamily::Med, "GW01").build();
        let mut settings = Map::new();
        settings.insert("MedAntilegionellaOnOff".to_string(), json!(false));
        settings.insert("MedMaxSetpointTemperature".to_string(), json!(60.0));
        settings.insert("MedMaxSetpointTemperatureMin".to_string(), json!(40.0));
        settings.insert("MedMaxSetpointTemperatureMax".to_string(), json!(80.0));
        device.replace_plant_settings(settings);
        (api, device)
    }

    #[tokio::test]
    async fn set_antilegionella_sends_new_and_old_values() {
        let (api, device) = scenario_device(MockApi::default());

        device.set_antilegionella(true).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![SetCall {
                plant_data: PlantData::Med,
                gw: "GW01".to_string(),
                setting: "MedAntilegionellaOnOff".to_string(),
                value: 1.0,
                old_value: 0.0,
                umsys: UnitSystem::Si,
            }]
        );
        assert_eq!(device.water_anti_leg_value(), Some(true));
    }

    #[tokio::test]
    async fn set_antilegionella_round_trips_both_flags() {
        let (api, device) = scenario_device(MockApi::default());

        device.set_antilegionella(true).await.unwrap();
        device.set_antilegionella(false).await.unwrap();

        assert_eq!(device.water_anti_leg_value(), Some(false));
        let calls = api.calls();
        assert_eq!((calls[1].value, calls[1].old_value), (0.0, 1.0));
    }

    #[tokio::test]
    async fn set_max_setpoint_temp_sends_raw_value() {
        let (api, device) = scenario_device(MockApi::default());

        device.set_max_setpoint_temp(65.0).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].setting, "MedMaxSetpointTemperature");
        assert_eq!(calls[0].value, 65.0);
        assert_eq!(calls[0].old_value, 60.0);
        assert_eq!(device.water_heater_maximum_setpoint_temperature(), Some(65.0));
        assert_eq!(device.water_heater_maximum_temperature(), Some(65.0));
    }

    #[tokio::test]
    async fn missing_key_fails_without_remote_call() {
        let api = Arc::new(MockApi::default());
        let device = VelisDevice::builder(Arc::clone(&api), VelisFamily::Slp, "GW01").build();

        let err = device.set_antilegionella(true).await.unwrap_err();

        assert!(matches!(
            err,
            Error::MissingSetting { ref key } if key == "SlpAntilegionellaOnOff"
        ));
        assert!(api.calls().is_empty());
        assert!(device.state().plant_setting("SlpAntilegionellaOnOff").is_none());
    }

    #[tokio::test]
    async fn missing_setpoint_fails() {
        let device =
            VelisDevice::builder(Arc::new(MockApi::default()), VelisFamily::Se, "GW01").build();

        let err = device.set_max_setpoint_temp(55.0).await.unwrap_err();
        assert!(matches!(err, Error::MissingSetting { .. }));
        assert!(device.water_heater_maximum_setpoint_temperature().is_none());
    }

    #[tokio::test]
    async fn remote_failure_leaves_cache_untouched() {
        let (_api, device) = scenario_device(MockApi::failing());
        let before = device.state();

        let err = device.set_antilegionella(true).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Status { status: 500, .. })));

        let err = device.set_max_setpoint_temp(70.0).await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));

        assert_eq!(device.state(), before);
        assert_eq!(device.water_anti_leg_value(), Some(false));
        assert_eq!(device.water_heater_maximum_setpoint_temperature(), Some(60.0));
    }

    #[tokio::test]
    async fn non_numeric_cached_setpoint_is_a_parse_error() {
        let (api, device) = scenario_device(MockApi::default());
        let mut settings = device.state().plant_settings().clone();
        settings.insert("MedMaxSetpointTemperature".to_string(), json!("hot"));
        device.replace_plant_settings(settings);

        let err = device.set_max_setpoint_temp(65.0).await.unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::InvalidValue { .. })));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn numeric_anti_legionella_flag_is_accepted() {
        let (api, device) = scenario_device(MockApi::default());
        let mut settings = device.state().plant_settings().clone();
        settings.insert("MedAntilegionellaOnOff".to_string(), json!(1));
        device.replace_plant_settings(settings);

        device.set_antilegionella(false).await.unwrap();

        assert_eq!(api.calls()[0].old_value, 1.0);
        assert_eq!(device.water_anti_leg_value(), Some(false));
    }

    #[tokio::test]
    async fn imperial_device_sends_us_unit_system() {
        let api = Arc::new(MockApi::default());
        let device = VelisDevice::builder(Arc::clone(&api), VelisFamily::Slp, "GW02")
            .metric(false)
            .build();
        let mut settings = Map::new();
        settings.insert("SlpMaxSetpointTemperature".to_string(), json!(140));
        device.replace_plant_settings(settings);

        device.set_max_setpoint_temp(150.0).await.unwrap();

        let call = &api.calls()[0];
        assert_eq!(call.umsys, UnitSystem::Us);
        assert_eq!(call.plant_data, PlantData::Slp);
        assert_eq!(call.old_value, 140.0);
        assert_eq!(device.water_heater_temperature_unit(), "°F");
    }

    #[tokio::test]
    async fn non_finite_setpoint_is_rejected_before_remote_call() {
        let (api, device) = scenario_device(MockApi::default());

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = device.set_max_setpoint_temp(value).await.unwrap_err();
            assert!(matches!(
                err,
                Error::Value(ValueError::NonFiniteTemperature(_))
            ));
        }

        assert!(api.calls().is_empty());
        assert_eq!(device.water_heater_maximum_setpoint_temperature(), Some(60.0));

        device.set_max_setpoint_temp(61.0).await.unwrap();
        assert_eq!(api.calls()[0].old_value, 60.0);
    }

    #[tokio::test]
    async fn concurrent_writes_chain_old_values() {
        // The mock suspends mid-write, so both setters are in flight at once.
        let (api, device) = scenario_device(MockApi::default());

        let (a, b) = tokio::join!(
            device.set_max_setpoint_temp(61.0),
            device.set_max_setpoint_temp(62.0)
        );
        a.unwrap();
        b.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!((calls[0].value, calls[0].old_value), (61.0, 60.0));
        assert_eq!((calls[1].value, calls[1].old_value), (62.0, 61.0));
        assert_eq!(
            device.water_heater_maximum_setpoint_temperature(),
            Some(calls[1].value)
        );
    }

    #[test]
    fn constant_readings() {
        let (_api, device) = scenario_device(MockApi::default());
        assert_eq!(device.water_heater_minimum_temperature(), 40.0);
        assert_eq!(device.water_heater_temperature_step(), 1);
        assert_eq!(device.water_heater_temperature_decimals(), 0);
        assert_eq!(device.water_heater_temperature_unit(), "°C");
    }

    #[test]
    fn empty_device_reads_none() {
        let device =
            VelisDevice::builder(Arc::new(MockApi::default()), VelisFamily::Med, "GW01").build();
        assert!(device.water_anti_leg_value().is_none());
        assert!(device.proc_req_temp_value().is_none());
        assert!(device.water_heater_maximum_setpoint_temperature().is_none());
        assert!(device.water_heater_maximum_temperature().is_none());
        assert!(device.water_heater_maximum_setpoint_temperature_minimum().is_none());
        assert_eq!(device.water_heater_minimum_temperature(), 40.0);
    }

    #[test]
    fn bounds_are_read_from_plant_settings() {
        let (_api, device) = scenario_device(MockApi::default());
        assert_eq!(
            device.water_heater_maximum_setpoint_temperature_minimum(),
            Some(40.0)
        );
        assert_eq!(
            device.water_heater_maximum_setpoint_temperature_maximum(),
            Some(80.0)
        );
    }

    #[tokio::test]
    async fn refresh_fills_data_and_settings() {
        let mut data = Map::new();
        data.insert("procReqTemp".to_string(), json!(52.5));
        let mut settings = Map::new();
        settings.insert("SeAntilegionellaOnOff".to_string(), json!(true));
        settings.insert("SeMaxSetpointTemperature".to_string(), json!(75));
        let api = MockApi {
            plant_data: Some(data),
            plant_settings: Some(settings),
            ..MockApi::default()
        };

        let device = VelisDevice::builder(Arc::new(api), VelisFamily::Se, "GW03")
            .build_and_refresh()
            .await
            .unwrap();

        assert_eq!(device.proc_req_temp_value(), Some(52.5));
        assert_eq!(device.water_anti_leg_value(), Some(true));
        assert_eq!(device.water_heater_maximum_setpoint_temperature(), Some(75.0));
    }

    #[tokio::test]
    async fn refresh_without_cloud_data_keeps_cache() {
        let (_api, device) = scenario_device(MockApi::default());
        let before = device.state();

        device.refresh().await.unwrap();

        assert_eq!(device.state(), before);
    }

    #[test]
    fn from_plant_info_picks_family() {
        let info = VelisPlantInfo {
            gw: "GW04".to_string(),
            name: Some("Cellar".to_string()),
            sn: None,
            whe_type: WheType::LydosHybrid,
            whe_model_type: None,
        };

        let device = VelisDevice::from_plant_info(Arc::new(MockApi::default()), &info)
            .unwrap()
            .build();

        assert_eq!(*device.model(), VelisFamily::Se);
        assert_eq!(device.gw(), "GW04");
        assert_eq!(device.name(), Some("Cellar"));
    }

    #[test]
    fn from_plant_info_rejects_unknown_type() {
        let info = VelisPlantInfo {
            gw: "GW05".to_string(),
            name: None,
            sn: None,
            whe_type: WheType::Unknown,
            whe_model_type: None,
        };

        let result = VelisDevice::from_plant_info(Arc::new(MockApi::default()), &info);
        assert!(matches!(
            result,
            Err(Error::Device(DeviceError::UnsupportedModel(_)))
        ));
    }
}
