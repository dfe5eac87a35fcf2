// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recording in-memory cloud API for device tests.

use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::protocol::VelisApi;
use crate::types::{PlantData, UnitSystem};

/// A recorded `set_velis_plant_setting` call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SetCall {
    pub plant_data: PlantData,
    pub gw: String,
    pub setting: String,
    pub value: f64,
    pub old_value: f64,
    pub umsys: UnitSystem,
}

#[derive(Debug, Default)]
pub(crate) struct MockApi {
    pub calls: Mutex<Vec<SetCall>>,
    pub fail_writes: bool,
    pub plant_data: Option<Map<String, Value>>,
    pub plant_settings: Option<Map<String, Value>>,
}

impl MockApi {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<SetCall> {
        self.calls.lock().clone()
    }
}

impl VelisApi for MockApi {
    async fn set_velis_plant_setting(
        &self,
        plant_data: PlantData,
        gw: &str,
        setting: &str,
        value: f64,
        old_value: f64,
        umsys: UnitSystem,
    ) -> Result<(), ApiError> {
        self.calls.lock().push(SetCall {
            plant_data,
            gw: gw.to_string(),
            setting: setting.to_string(),
            value,
            old_value,
            umsys,
        });
        // Suspend like a real request so concurrent callers can interleave.
        tokio::task::yield_now().await;
        if self.fail_writes {
            return Err(ApiError::Status {
                status: 500,
                reason: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }

    async fn get_velis_plant_data(
        &self,
        _plant_data: PlantData,
        _gw: &str,
        _umsys: UnitSystem,
    ) -> Result<Option<Map<String, Value>>, ApiError> {
        Ok(self.plant_data.clone())
    }

    async fn get_velis_plant_settings(
        &self,
        _plant_data: PlantData,
        _gw: &str,
        _umsys: UnitSystem,
    ) -> Result<Option<Map<String, Value>>, ApiError> {
        Ok(self.plant_settings.clone())
    }
}
