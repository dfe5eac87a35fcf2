// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Measurement unit system reported to and requested from the cloud.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Unit system of a device: metric (`si`) or imperial (`us`).
///
/// The cloud takes the unit system as the `umsys` query parameter and
/// returns temperatures in the matching unit.
///
/// # Examples
///
/// ```
/// use velis_lib::types::UnitSystem;
///
/// let metric = UnitSystem::from_metric(true);
/// assert_eq!(metric.as_str(), "si");
/// assert_eq!(metric.unit_label(), "°C");
///
/// let imperial: UnitSystem = "us".parse().unwrap();
/// assert_eq!(imperial.unit_label(), "°F");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    /// Metric units, temperatures in degrees Celsius.
    #[default]
    Si,
    /// Imperial units, temperatures in degrees Fahrenheit.
    Us,
}

impl UnitSystem {
    /// Picks the unit system from a metric flag.
    #[must_use]
    pub const fn from_metric(is_metric: bool) -> Self {
        if is_metric { Self::Si } else { Self::Us }
    }

    /// Returns the `umsys` value used by the cloud API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Si => "si",
            Self::Us => "us",
        }
    }

    /// Returns the temperature unit label for display.
    #[must_use]
    pub const fn unit_label(&self) -> &'static str {
        match self {
            Self::Si => "°C",
            Self::Us => "°F",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "si" => Ok(Self::Si),
            "us" => Ok(Self::Us),
            _ => Err(ValueError::InvalidUnitSystem(s.to_string())),
        }
    }
}
