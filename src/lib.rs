// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `velis_lib` - A Rust library to control Ariston Velis water heaters.
//!
//! This library provides client-side proxies for the Velis line of water
//! heaters, backed by the Ariston NET cloud API.
//!
//! # Supported Features
//!
//! - **Live readings**: process requested temperature and other plant data
//! - **Plant settings**: anti-legionella cycle, maximum setpoint temperature
//! - **Setpoint bounds**: as echoed by the cloud
//! - **Async and blocking use**: [`VelisDevice`] and [`BlockingVelisDevice`]
//!
//! # Supported Families
//!
//! - `Med`: Velis Evo, Evo 2, Lydos, Andris 2, Lux, Lux 2
//! - `Se`: Lydos Hybrid
//! - `Slp`: Nuos Split
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use velis_lib::VelisDevice;
//! use velis_lib::protocol::ApiConfig;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> velis_lib::Result<()> {
//!     let api = Arc::new(ApiConfig::new("user@example.com", "secret").into_client()?);
//!     api.connect().await?;
//!
//!     for plant in api.get_detailed_velis_devices().await? {
//!         let device = VelisDevice::from_plant_info(Arc::clone(&api), &plant)?
//!             .build_and_refresh()
//!             .await?;
//!
//!         println!(
//!             "{}: anti-legionella {:?}, max setpoint {:?} {}",
//!             device.gw(),
//!             device.water_anti_leg_value(),
//!             device.water_heater_maximum_setpoint_temperature(),
//!             device.water_heater_temperature_unit(),
//!         );
//!
//!         device.set_antilegionella(true).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

mod device;
pub mod error;
pub mod protocol;
pub mod state;
pub mod types;

pub use device::{
    BlockingVelisDevice, PROC_REQ_TEMP, VelisDevice, VelisDeviceBuilder, VelisFamily, VelisModel,
};
pub use error::{ApiError, DeviceError, Error, ParseError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{ApiConfig, AristonClient};
pub use protocol::{VelisApi, VelisPlantInfo};
pub use state::DeviceState;
pub use types::{PlantData, UnitSystem, WheType};
