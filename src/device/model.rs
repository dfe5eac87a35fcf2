// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Velis device families and their plant setting keys.

use std::fmt;

use crate::types::{PlantData, WheType};

/// Live data key of the process requested temperature.
pub const PROC_REQ_TEMP: &str = "procReqTemp";

/// Family-specific constants every Velis device model must supply.
///
/// The cloud serves each family from its own plant data endpoint and names
/// its plant settings with a family prefix (`Med...`, `Se...`, `Slp...`).
pub trait VelisModel {
    /// Endpoint family the plant is served by.
    fn plant_data(&self) -> PlantData;

    /// Plant setting key of the anti-legionella toggle.
    fn anti_legionella_on_off(&self) -> &str;

    /// Plant setting key of the maximum setpoint temperature.
    fn max_setpoint_temp(&self) -> &str;

    /// Plant setting key under which the cloud echoes the lowest allowed
    /// maximum setpoint.
    fn max_setpoint_temp_min(&self) -> &str;

    /// Plant setting key under which the cloud echoes the highest allowed
    /// maximum setpoint.
    fn max_setpoint_temp_max(&self) -> &str;
}

/// The Velis device families.
///
/// # Examples
///
/// ```
/// use velis_lib::{VelisFamily, VelisModel};
/// use velis_lib::types::{PlantData, WheType};
///
/// let family = VelisFamily::from_whe_type(WheType::NuosSplit).unwrap();
/// assert_eq!(family, VelisFamily::Slp);
/// assert_eq!(family.plant_data(), PlantData::Slp);
/// assert_eq!(family.max_setpoint_temp(), "SlpMaxSetpointTemperature");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VelisFamily {
    /// Velis Evo, Evo 2, Lydos, Andris 2, Lux and Lux 2.
    Med,
    /// Lydos Hybrid.
    Se,
    /// Nuos Split.
    Slp,
}

impl VelisFamily {
    /// Returns the family serving a water heater type.
    ///
    /// Returns `None` for [`WheType::Unknown`].
    #[must_use]
    pub const fn from_whe_type(whe_type: WheType) -> Option<Self> {
        match whe_type {
            WheType::Evo
            | WheType::Evo2
            | WheType::Lydos
            | WheType::Andris2
            | WheType::Lux
            | WheType::Lux2 => Some(Self::Med),
            WheType::LydosHybrid => Some(Self::Se),
            WheType::NuosSplit => Some(Self::Slp),
            WheType::Unknown => None,
        }
    }

    /// Returns the family name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Med => "Med",
            Self::Se => "Se",
            Self::Slp => "Slp",
        }
    }
}

impl fmt::Display for VelisFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl VelisModel for VelisFamily {
    fn plant_data(&self) -> PlantData {
        match self {
            Self::Med => PlantData::Med,
            Self::Se => PlantData::Se,
            Self::Slp => PlantData::Slp,
        }
    }

    fn anti_legionella_on_off(&self) -> &str {
        match self {
            Self::Med => "MedAntilegionellaOnOff",
            Self::Se => "SeAntilegionellaOnOff",
            Self::Slp => "SlpAntilegionellaOnOff",
        }
    }

    fn max_setpoint_temp(&self) -> &str {
        match self {
            Self::Med => "MedMaxSetpointTemperature",
            Self::Se => "SeMaxSetpointTemperature",
            Self::Slp => "SlpMaxSetpointTemperature",
        }
    }

    fn max_setpoint_temp_min(&self) -> &str {
        match self {
            Self::Med => "MedMaxSetpointTemperatureMin",
            Self::Se => "SeMaxSetpointTemperatureMin",
            Self::Slp => "SlpMaxSetpointTemperatureMin",
        }
    }

    fn max_setpoint_temp_max(&self) -> &str {
        match self {
            Self::Med => "MedMaxSetpointTemperatureMax",
            Self::Se => "SeMaxSetpointTemperatureMax",
            Self::Slp => "SlpMaxSetpointTemperatureMax",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILIES: [VelisFamily; 3] = [VelisFamily::Med, VelisFamily::Se, VelisFamily::Slp];

    #[test]
    fn whe_type_mapping() {
        assert_eq!(VelisFamily::from_whe_type(WheType::Evo), Some(VelisFamily::Med));
        assert_eq!(VelisFamily::from_whe_type(WheType::Lux2), Some(VelisFamily::Med));
        assert_eq!(
            VelisFamily::from_whe_type(WheType::LydosHybrid),
            Some(VelisFamily::Se)
        );
        assert_eq!(
            VelisFamily::from_whe_type(WheType::NuosSplit),
            Some(VelisFamily::Slp)
        );
        assert_eq!(VelisFamily::from_whe_type(WheType::Unknown), None);
    }

    #[test]
    fn setting_keys_carry_family_prefix() {
        for family in FAMILIES {
            let prefix = family.as_str();
            assert!(family.anti_legionella_on_off().starts_with(prefix));
            assert!(family.max_setpoint_temp().starts_with(prefix));
            assert_eq!(
                family.max_setpoint_temp_min(),
                format!("{}Min", family.max_setpoint_temp())
            );
            assert_eq!(
                family.max_setpoint_temp_max(),
                format!("{}Max", family.max_setpoint_temp())
            );
        }
    }

    #[test]
    fn plant_data_per_family() {
        assert_eq!(VelisFamily::Med.plant_data(), PlantData::Med);
        assert_eq!(VelisFamily::Se.plant_data(), PlantData::Se);
        assert_eq!(VelisFamily::Slp.plant_data(), PlantData::Slp);
    }
}
