// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the cloud API and the device proxies.
//!
//! # Types
//!
//! - [`PlantData`] - Endpoint family of a plant (`medPlantData`, ...)
//! - [`UnitSystem`] - Metric or imperial units (`si` / `us`)
//! - [`WheType`] - Water heater model type reported by the cloud

mod plant_data;
mod unit_system;
mod whe_type;

pub use plant_data::PlantData;
pub use unit_system::UnitSystem;
pub use whe_type::WheType;
