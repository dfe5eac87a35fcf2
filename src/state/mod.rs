// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state cache.
//!
//! The [`DeviceState`] struct mirrors what the cloud last reported for a
//! device: live readings and plant settings.

mod device_state;

pub use device_state::DeviceState;
pub(crate) use device_state::value_as_flag;
