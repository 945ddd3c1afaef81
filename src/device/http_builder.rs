// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP device builder.

use std::time::Duration;

use crate::device::Device;
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};
use crate::response::DeviceSnapshot;

/// Builder for HTTP-based devices.
///
/// # Examples
///
/// ```no_run
/// use netio_lib::Device;
///
/// # async fn example() -> netio_lib::Result<()> {
/// // No network traffic until the first call
/// let device = Device::http("192.168.11.250")
///     .with_credentials("netio", "netio")
///     .build()?;
///
/// // Probe the device and keep the first snapshot
/// let (device, snapshot) = Device::http("192.168.11.250")
///     .with_credentials("netio", "netio")
///     .connect()
///     .await?;
/// println!("{}", snapshot.agent().model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpDeviceBuilder {
    config: HttpConfig,
}

impl HttpDeviceBuilder {
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Sets the JSON API credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.config = self.config.with_credentials(username, password);
        self
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the device without contacting it.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn build(self) -> Result<Device<HttpClient>, Error> {
        let client = self.config.into_client()?;
        Ok(Device::new(client))
    }

    /// Builds the device and fetches an initial snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be built, reached, or its status
    /// decoded.
    pub async fn connect(self) -> Result<(Device<HttpClient>, DeviceSnapshot), Error> {
        let device = self.build()?;
        let snapshot = device.fetch_snapshot().await?;
        tracing::info!(
            url = %device.protocol().url(),
            model = %snapshot.agent().model,
            "Connected to device"
        );
        Ok((device, snapshot))
    }
}
