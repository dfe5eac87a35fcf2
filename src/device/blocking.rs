// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blocking facade over [`VelisDevice`].

use serde_json::{Map, Value};
use tokio::runtime::{Builder, Runtime};

use crate::device::{VelisDevice, VelisFamily, VelisModel};
use crate::error::Error;
use crate::protocol::VelisApi;

/// A Velis device for synchronous callers.
///
/// Runs each operation of the wrapped [`VelisDevice`] to completion on an
/// owned single-threaded runtime. Reads go straight to the cache.
///
/// Must not be used from within an async runtime: blocking on a runtime
/// inside another one panics.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use velis_lib::{BlockingVelisDevice, VelisDevice, VelisFamily};
/// use velis_lib::protocol::ApiConfig;
///
/// # fn example() -> velis_lib::Result<()> {
/// let api = Arc::new(ApiConfig::new("user@example.com", "secret").into_client()?);
/// let device = BlockingVelisDevice::new(
///     VelisDevice::builder(Arc::clone(&api), VelisFamily::Med, "F0AD4E0A1B2C").build(),
/// )?;
///
/// device.block_on(api.connect())?;
/// device.refresh()?;
/// device.set_antilegionella(true)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BlockingVelisDevice<A, M = VelisFamily> {
    inner: VelisDevice<A, M>,
    runtime: Runtime,
}

impl<A: VelisApi, M: VelisModel> BlockingVelisDevice<A, M> {
    /// Wraps a device.
    ///
    /// # Errors
    ///
    /// Returns `Error::Runtime` if the runtime cannot be started.
    pub fn new(device: VelisDevice<A, M>) -> Result<Self, Error> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            inner: device,
            runtime,
        })
    }

    /// Returns the wrapped device for cached reads.
    #[must_use]
    pub fn device(&self) -> &VelisDevice<A, M> {
        &self.inner
    }

    /// Unwraps the async device.
    #[must_use]
    pub fn into_inner(self) -> VelisDevice<A, M> {
        self.inner
    }

    /// Runs any future, e.g. a login, on the device's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Blocking version of [`VelisDevice::set_antilegionella`].
    ///
    /// # Errors
    ///
    /// Same as the async version.
    pub fn set_antilegionella(&self, enabled: bool) -> Result<(), Error> {
        self.runtime.block_on(self.inner.set_antilegionella(enabled))
    }

    /// Blocking version of [`VelisDevice::set_max_setpoint_temp`].
    ///
    /// # Errors
    ///
    /// Same as the async version.
    pub fn set_max_setpoint_temp(&self, value: f64) -> Result<(), Error> {
        self.runtime.block_on(self.inner.set_max_setpoint_temp(value))
    }

    /// Blocking version of [`VelisDevice::refresh`].
    ///
    /// # Errors
    ///
    /// Same as the async version.
    pub fn refresh(&self) -> Result<(), Error> {
        self.runtime.block_on(self.inner.refresh())
    }

    /// See [`VelisDevice::replace_plant_settings`].
    pub fn replace_plant_settings(&self, settings: Map<String, Value>) {
        self.inner.replace_plant_settings(settings);
    }
}
