// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Velis device builder.

use std::sync::Arc;

use crate::device::{VelisDevice, VelisFamily, VelisModel};
use crate::error::Error;
use crate::protocol::VelisApi;
use crate::types::UnitSystem;

/// Builder for creating Velis devices.
///
/// Unit system and language are fixed once the device is built.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use velis_lib::{VelisDevice, VelisFamily};
/// use velis_lib::protocol::ApiConfig;
///
/// # async fn example() -> velis_lib::Result<()> {
/// let api = Arc::new(ApiConfig::new("user@example.com", "secret").into_client()?);
/// api.connect().await?;
///
/// // Imperial units, cache filled from the cloud
/// let device = VelisDevice::builder(api, VelisFamily::Med, "F0AD4E0A1B2C")
///     .metric(false)
///     .language_tag("en-GB")
///     .build_and_refresh()
///     .await?;
///
/// assert_eq!(device.water_heater_temperature_unit(), "°F");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct VelisDeviceBuilder<A, M = VelisFamily> {
    api: Arc<A>,
    model: M,
    gw: String,
    name: Option<String>,
    unit_system: UnitSystem,
    language_tag: String,
}

impl<A: VelisApi, M: VelisModel> VelisDeviceBuilder<A, M> {
    /// Default language tag sent with localized requests.
    pub const DEFAULT_LANGUAGE_TAG: &'static str = "en-US";

    /// Creates a new builder for a device behind the given gateway.
    pub(crate) fn new(api: Arc<A>, model: M, gw: String) -> Self {
        Self {
            api,
            model,
            gw,
            name: None,
            unit_system: UnitSystem::Si,
            language_tag: Self::DEFAULT_LANGUAGE_TAG.to_string(),
        }
    }

    /// Selects metric (`°C`, default) or imperial (`°F`) units.
    #[must_use]
    pub fn metric(mut self, is_metric: bool) -> Self {
        self.unit_system = UnitSystem::from_metric(is_metric);
        self
    }

    /// Sets the language tag, e.g. `en-US`.
    #[must_use]
    pub fn language_tag(mut self, language_tag: impl Into<String>) -> Self {
        self.language_tag = language_tag.into();
        self
    }

    /// Sets the plant name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the unit system the device will use.
    #[must_use]
    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    /// Builds the device with an empty cache.
    ///
    /// Setters fail with [`Error::MissingSetting`] until the cache has been
    /// filled, e.g. by [`VelisDevice::refresh`].
    #[must_use]
    pub fn build(self) -> VelisDevice<A, M> {
        VelisDevice::new(
            self.api,
            self.model,
            self.gw,
            self.name,
            self.unit_system,
            self.language_tag,
        )
    }

    /// Builds the device and fills its cache from the cloud.
    ///
    /// # Errors
    ///
    /// Returns error if the live data or plant settings cannot be fetched.
    pub async fn build_and_refresh(self) -> Result<VelisDevice<A, M>, Error> {
        let device = self.build();
        device.refresh().await?;
        Ok(device)
    }
}
