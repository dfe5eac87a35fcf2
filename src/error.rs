// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `velis_lib` library.
//!
//! This module provides the error hierarchy for the library: value
//! validation, cloud API communication, JSON parsing, and device operations.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the cloud API.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Error occurred while parsing a response or a cached value.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// A setter was called before the plant settings held its key.
    ///
    /// Usually means the device has not been refreshed yet.
    #[error("plant setting {key} is not cached")]
    MissingSetting {
        /// The plant setting key that was looked up.
        key: String,
    },

    /// The runtime backing the blocking device could not be created.
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Errors related to value validation and conversion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// An unknown unit system string was provided.
    #[error("invalid unit system: {0}")]
    InvalidUnitSystem(String),

    /// The cloud reported a water heater type this library does not know.
    #[error("unknown water heater type: {0}")]
    UnknownWheType(i64),

    /// A temperature was NaN or infinite.
    #[error("temperature must be a finite number, got {0}")]
    NonFiniteTemperature(f64),
}

/// Errors related to the cloud API transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The canonical reason phrase.
        reason: String,
    },

    /// The response body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server throttled the client.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Login failed or the token was rejected after re-authentication.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Invalid API URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing cloud responses and cached values.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to interpret a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to device construction.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The plant is not a Velis family this library can drive.
    #[error("unsupported water heater model: {0}")]
    UnsupportedModel(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
