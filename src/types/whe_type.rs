// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Water heater model type as reported by the cloud.

use serde::{Deserialize, Deserializer};

use crate::error::ValueError;

/// Water heater type (`wheType`) of a Velis plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WheType {
    /// Type not reported.
    #[default]
    Unknown,
    /// Velis Evo.
    Evo,
    /// Lydos Hybrid.
    LydosHybrid,
    /// Lydos.
    Lydos,
    /// Nuos Split.
    NuosSplit,
    /// Andris 2.
    Andris2,
    /// Velis Evo 2.
    Evo2,
    /// Lux 2.
    Lux2,
    /// Lux.
    Lux,
}

impl WheType {
    /// Converts the numeric code used by the cloud.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownWheType` for codes outside the known set.
    pub fn from_code(code: i64) -> Result<Self, ValueError> {
        match code {
            -1 => Ok(Self::Unknown),
            1 => Ok(Self::Evo),
            2 => Ok(Self::LydosHybrid),
            3 => Ok(Self::Lydos),
            4 => Ok(Self::NuosSplit),
            5 => Ok(Self::Andris2),
            6 => Ok(Self::Evo2),
            7 => Ok(Self::Lux2),
            8 => Ok(Self::Lux),
            other => Err(ValueError::UnknownWheType(other)),
        }
    }

    /// Returns the numeric code used by the cloud.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Unknown => -1,
            Self::Evo => 1,
            Self::LydosHybrid => 2,
            Self::Lydos => 3,
            Self::NuosSplit => 4,
            Self::Andris2 => 5,
            Self::Evo2 => 6,
            Self::Lux2 => 7,
            Self::Lux => 8,
        }
    }
}

/// Codes outside the known set and `null` read as [`WheType::Unknown`], so
/// one unexpected plant never hides the rest of a listing.
impl<'de> Deserialize<'de> for WheType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(code) = Option::<i64>::deserialize(deserializer)? else {
            return Ok(Self::Unknown);
        };
        Ok(Self::from_code(code).unwrap_or_else(|err| {
            tracing::debug!(code, error = %err, "Unrecognized wheType");
            Self::Unknown
        }))
    }
}
