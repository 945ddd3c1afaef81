// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `netio_lib` library.
//!
//! This module provides the error hierarchy for value validation, HTTP
//! communication with the device, and JSON decoding of its responses.

use thiserror::Error;

use crate::types::OutputId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u8,
        /// Maximum allowed value.
        max: u8,
        /// The actual value that was provided.
        actual: u8,
    },

    /// An output selector string could not be parsed.
    #[error("invalid output: {0}")]
    InvalidOutput(String),

    /// An action name could not be parsed.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// An output state could not be parsed.
    #[error("invalid output state: {0}")]
    InvalidOutputState(String),

    /// The selector does not address a single physical output.
    #[error("{0} does not address a single output")]
    NotAnOutput(OutputId),
}

/// Errors related to HTTP communication with the device.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The device rejected the credentials.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The device answered with a status other than 200.
    #[error("unexpected HTTP status {status} - {reason}")]
    UnexpectedStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },
}

/// Errors related to decoding device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
