// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached device state.

use serde_json::{Map, Value};

/// Cached state of a Velis device.
///
/// Holds two JSON maps mirrored from the cloud:
/// - `data`: live readings (temperatures, mode, ...), replaced on refresh
/// - `plant_settings`: configurable settings, replaced on refresh and
///   updated in place by successful setting writes
///
/// Both start empty. Values are kept as the cloud reported them; the typed
/// accessors interpret booleans and numbers leniently.
///
/// # Examples
///
/// ```
/// use velis_lib::state::DeviceState;
/// use serde_json::json;
///
/// let mut state = DeviceState::new();
/// assert!(state.plant_setting_flag("MedAntilegionellaOnOff").is_none());
///
/// state.set_plant_setting("MedAntilegionellaOnOff", json!(true));
/// assert_eq!(state.plant_setting_flag("MedAntilegionellaOnOff"), Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceState {
    data: Map<String, Value>,
    plant_settings: Map<String, Value>,
}

impl DeviceState {
    /// Creates a new empty device state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Live Data ==========

    /// Returns all cached live readings.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Returns a live reading as a number.
    #[must_use]
    pub fn data_number(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(Value::as_f64)
    }

    /// Replaces all live readings.
    pub fn replace_data(&mut self, data: Map<String, Value>) {
        self.data = data;
    }

    // ========== Plant Settings ==========

    /// Returns all cached plant settings.
    #[must_use]
    pub fn plant_settings(&self) -> &Map<String, Value> {
        &self.plant_settings
    }

    /// Returns a raw plant setting.
    #[must_use]
    pub fn plant_setting(&self, key: &str) -> Option<&Value> {
        self.plant_settings.get(key)
    }

    /// Returns a plant setting as an on/off flag.
    ///
    /// Numbers are read as `true` when non-zero.
    #[must_use]
    pub fn plant_setting_flag(&self, key: &str) -> Option<bool> {
        self.plant_settings.get(key).and_then(value_as_flag)
    }

    /// Returns a plant setting as a number.
    #[must_use]
    pub fn plant_setting_number(&self, key: &str) -> Option<f64> {
        self.plant_settings.get(key).and_then(Value::as_f64)
    }

    /// Sets a single plant setting.
    pub fn set_plant_setting(&mut self, key: impl Into<String>, value: Value) {
        self.plant_settings.insert(key.into(), value);
    }

    /// Replaces all plant settings.
    pub fn replace_plant_settings(&mut self, settings: Map<String, Value>) {
        self.plant_settings = settings;
    }
}

/// Interprets a JSON value as an on/off flag.
pub(crate) fn value_as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    }
}
