// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level device abstraction for NETIO power distribution units.
//!
//! Each method performs one independent request/response cycle. There is
//! no retry, no caching and no background work.
//!
//! ```no_run
//! use netio_lib::Device;
//! use netio_lib::types::{Action, OutputId};
//!
//! # async fn example() -> netio_lib::Result<()> {
//! let device = Device::http("192.168.11.250")
//!     .with_credentials("netio", "netio")
//!     .build()?;
//!
//! device.set_outputs(OutputId::Output2, Action::On).await?;
//! let snapshot = device.fetch_snapshot().await?;
//! println!("{} outputs", snapshot.outputs().len());
//! # Ok(())
//! # }
//! ```
//!
//! # Sentinel compatibility
//!
//! The `*_or_sentinel`, `*_or_default` and `*_succeeded` variants never
//! fail. They report failure through placeholder values
//! ([`DeviceSnapshot::sentinel`], [`OutputStatus::default`], `false`) for
//! callers that only need the yes/no decision.

mod http_builder;

pub use http_builder::HttpDeviceBuilder;

use crate::command::ControlRequest;
use crate::error::{Error, ValueError};
use crate::protocol::{HttpConfig, Protocol};
use crate::response::{Agent, DeviceSnapshot, OutputStatus};
use crate::types::{Action, OutputId};

/// A NETIO device reachable through protocol `P`.
#[derive(Debug)]
pub struct Device<P: Protocol> {
    protocol: P,
}

impl Device<crate::protocol::HttpClient> {
    /// Starts building an HTTP device for `host`.
    #[must_use]
    pub fn http(host: impl Into<String>) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(HttpConfig::new(host))
    }

    /// Starts building an HTTP device from a full configuration.
    #[must_use]
    pub fn http_config(config: HttpConfig) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(config)
    }
}

impl<P: Protocol> Device<P> {
    /// Wraps an existing protocol implementation.
    #[must_use]
    pub fn new(protocol: P) -> Self {
        Self { protocol }
    }

    /// Returns the underlying protocol.
    #[must_use]
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    // ========== Status ==========

    /// Fetches the agent block and every output state in one request.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` on transport, auth or status failures and
    /// `Error::Parse` if the body cannot be decoded.
    pub async fn fetch_snapshot(&self) -> Result<DeviceSnapshot, Error> {
        let response = self.protocol.fetch_status().await?;
        let snapshot = DeviceSnapshot::parse(response.body())?;
        tracing::debug!(
            model = %snapshot.agent().model,
            outputs = snapshot.outputs().len(),
            "Fetched device snapshot"
        );
        Ok(snapshot)
    }

    /// Fetches the agent block.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_snapshot`](Self::fetch_snapshot).
    pub async fn fetch_agent(&self) -> Result<Agent, Error> {
        Ok(self.fetch_snapshot().await?.into_parts().0)
    }

    /// Fetches the state of every output, ordered by id.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_snapshot`](Self::fetch_snapshot).
    pub async fn fetch_outputs(&self) -> Result<Vec<OutputStatus>, Error> {
        Ok(self.fetch_snapshot().await?.into_parts().1)
    }

    /// Fetches a fresh snapshot and returns the record of output `id`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if `id` is not a physical output or the
    /// snapshot has no record for it, otherwise the errors of
    /// [`fetch_snapshot`](Self::fetch_snapshot).
    pub async fn fetch_output(&self, id: OutputId) -> Result<OutputStatus, Error> {
        if !id.is_physical() {
            return Err(ValueError::NotAnOutput(id).into());
        }
        let snapshot = self.fetch_snapshot().await?;
        snapshot
            .output(id)
            .cloned()
            .ok_or_else(|| ValueError::NotAnOutput(id).into())
    }

    // ========== Control ==========

    /// Applies `action` to `target`.
    ///
    /// `OutputId::All` applies the action to outputs 1-4 in a single request.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for `OutputId::Unknown` (nothing is sent) and
    /// `Error::Protocol` unless the device answers HTTP 200.
    pub async fn set_outputs(&self, target: OutputId, action: Action) -> Result<(), Error> {
        let request = ControlRequest::new(target, action)?;
        self.send(&request).await
    }

    /// Sends a prepared control request.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` unless the device answers HTTP 200.
    pub async fn send(&self, request: &ControlRequest) -> Result<(), Error> {
        self.protocol.send_control(request).await?;
        Ok(())
    }

    // ========== Sentinel compatibility ==========

    /// Like [`fetch_snapshot`](Self::fetch_snapshot), returning
    /// [`DeviceSnapshot::sentinel`] on any failure.
    pub async fn fetch_snapshot_or_sentinel(&self) -> DeviceSnapshot {
        self.fetch_snapshot().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Status query failed");
            DeviceSnapshot::sentinel()
        })
    }

    /// Like [`set_outputs`](Self::set_outputs), reporting only whether the
    /// device answered HTTP 200.
    pub async fn set_outputs_succeeded(&self, target: OutputId, action: Action) -> bool {
        match self.set_outputs(target, action).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, output = %target, action = %action, "Set outputs failed");
                false
            }
        }
    }

    /// Like [`fetch_output`](Self::fetch_output), returning
    /// [`OutputStatus::default`] on any failure.
    pub async fn fetch_output_or_default(&self, id: OutputId) -> OutputStatus {
        self.fetch_output(id).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, output = %id, "Output query failed");
            OutputStatus::default()
        })
    }
}
