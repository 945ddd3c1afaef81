// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport for the NETIO JSON API.
//!
//! The device exposes one endpoint, `/netio.json`: a GET returns the
//! status document and a POST applies output actions. [`HttpClient`] is the
//! HTTP implementation of [`Protocol`].

mod http;

pub use http::{Credentials, HttpClient, HttpConfig, JSON_PATH};

use crate::command::ControlRequest;
use crate::error::ProtocolError;

/// Response from a status query.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    /// The raw JSON response body.
    body: String,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Trait for transports that can reach a NETIO device.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Reads the status document.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the device does not
    /// answer with HTTP 200.
    async fn fetch_status(&self) -> Result<CommandResponse, ProtocolError>;

    /// Sends an output control request.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the device does not
    /// answer with HTTP 200.
    async fn send_control(&self, request: &ControlRequest) -> Result<(), ProtocolError>;
}
