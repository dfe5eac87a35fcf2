// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plant data endpoint selector.

use std::fmt;

/// Path segment selecting which plant data endpoint a device is served by.
///
/// # Examples
///
/// ```
/// use velis_lib::types::PlantData;
///
/// assert_eq!(PlantData::Med.as_str(), "medPlantData");
/// assert_eq!(PlantData::Slp.to_string(), "slpPlantData");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlantData {
    /// Generic remote plants.
    Pd,
    /// Velis Evo, Lydos and Lux water heaters.
    Med,
    /// Lydos Hybrid water heaters.
    Se,
    /// Nuos Split heat pump water heaters.
    Slp,
    /// BSB bus plants.
    Bsb,
}

impl PlantData {
    /// Returns the API path segment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pd => "plantData",
            Self::Med => "medPlantData",
            Self::Se => "sePlantData",
            Self::Slp => "slpPlantData",
            Self::Bsb => "bsbPlantData",
        }
    }
}

impl fmt::Display for PlantData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
