// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Front-end independent control panel.
//!
//! [`ControlPanel`] holds what a NETIO control screen shows: whether a
//! device is connected, its identity fields and one indicator lamp per
//! output. Front ends forward user actions to it and render its results.
//!
//! The panel starts [`PanelState::Disabled`] and becomes
//! [`PanelState::Enabled`] after the first successful
//! [`connect`](ControlPanel::connect). Later failures are reported but
//! never disable it again.
//!
//! ```no_run
//! use netio_lib::Device;
//! use netio_lib::panel::{Button, ControlPanel};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut panel = ControlPanel::new();
//! let device = Device::http("192.168.11.250")
//!     .with_credentials("netio", "netio")
//!     .build()?;
//!
//! let info = panel.connect(device).await?;
//! println!("{info}");
//!
//! let lamps = panel.press(Button::AllOn).await?;
//! assert_eq!(lamps, [true; 4]);
//! # Ok(())
//! # }
//! ```

mod button;

pub use button::Button;

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::device::Device;
use crate::error::Error;
use crate::protocol::Protocol;
use crate::response::{Agent, OutputStatus};
use crate::types::{Action, OutputId};

/// Library version shown by [`about`].
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Failure of a panel action.
///
/// The message names the action that failed. The underlying error is
/// available through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum PanelError {
    /// An action that needs a device was used before connecting.
    #[error("Not connected to a NETIO device.")]
    NotConnected,

    /// The connect probe failed.
    #[error(
        "Could not find/connect to NETIO device. Make sure IP address, username and/or password is correct."
    )]
    Connect(#[source] Error),

    /// The device did not accept a control request.
    #[error("Failed to set output: {output} and action = {action}")]
    SetOutput {
        /// Requested output.
        output: OutputId,
        /// Requested action.
        action: Action,
        /// Underlying failure.
        #[source]
        source: Error,
    },

    /// Output states could not be read.
    #[error("Failed to get output status!")]
    Status(#[source] Error),
}

impl PanelError {
    /// Returns a short title for a message box.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::NotConnected | Self::Connect(_) => "Connect error",
            Self::SetOutput { .. } => "Control error",
            Self::Status(_) => "Status error",
        }
    }
}

/// Connection state of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// No device connected; controls are inactive.
    Disabled,
    /// A device answered; controls are active.
    Enabled,
}

/// Agent fields formatted for the info display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInfo {
    /// Model name.
    pub model: String,
    /// Firmware version.
    pub firmware: String,
    /// JSON API version.
    pub json_version: String,
    /// Device name.
    pub device_name: String,
    /// OEM id.
    pub oem_id: String,
    /// Serial number.
    pub serial_number: String,
    /// Number of outputs.
    pub outputs: String,
}

impl From<&Agent> for AgentInfo {
    fn from(agent: &Agent) -> Self {
        Self {
            model: agent.model.clone(),
            firmware: agent.version.clone(),
            json_version: agent.json_ver.clone(),
            device_name: agent.device_name.clone(),
            oem_id: agent.oem_id.to_string(),
            serial_number: agent.serial_number.clone(),
            outputs: agent.num_outputs.to_string(),
        }
    }
}

impl fmt::Display for AgentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Firmware: {}", self.firmware)?;
        writeln!(f, "JSON version: {}", self.json_version)?;
        writeln!(f, "Device name: {}", self.device_name)?;
        writeln!(f, "OEM id: {}", self.oem_id)?;
        writeln!(f, "Serial number: {}", self.serial_number)?;
        write!(f, "Outputs: {}", self.outputs)
    }
}

/// Renders the output status listing shown by the status action.
///
/// # Examples
///
/// ```
/// use netio_lib::panel::render_status;
/// use netio_lib::response::OutputStatus;
///
/// let text = render_status(&[OutputStatus::default()]);
/// assert!(text.starts_with("Current output status:"));
/// assert!(text.contains("Name: NA"));
/// ```
#[must_use]
pub fn render_status(outputs: &[OutputStatus]) -> String {
    let mut text = String::from("Current output status:\n\n");
    for output in outputs {
        text.push_str(&format!(
            "ID: {}\nName: {}\nAction: {}\nState: {}\n\n",
            output.id.name(),
            output.name,
            output.action,
            output.state
        ));
    }
    text
}

/// Returns the about text.
#[must_use]
pub fn about() -> String {
    format!("NETIO JSON control, version {VERSION}")
}

/// Control panel for one NETIO device.
#[derive(Debug)]
pub struct ControlPanel<P: Protocol> {
    device: Option<Device<P>>,
    info: Option<AgentInfo>,
    lamps: [bool; 4],
    settle_delay: Duration,
}

impl<P: Protocol> Default for ControlPanel<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Protocol> ControlPanel<P> {
    /// Time the relays need to settle after a switch request before the
    /// state is read back. The device sends no completion event.
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(666);

    /// Creates a disabled panel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            device: None,
            info: None,
            lamps: [false; 4],
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
        }
    }

    /// Overrides the post-switch settle delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Returns the post-switch settle delay.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Returns the connection state.
    #[must_use]
    pub fn state(&self) -> PanelState {
        if self.device.is_some() {
            PanelState::Enabled
        } else {
            PanelState::Disabled
        }
    }

    /// Returns the info fields of the connected device.
    #[must_use]
    pub fn info(&self) -> Option<&AgentInfo> {
        self.info.as_ref()
    }

    /// Returns the indicator lamps, one per output, lit when on.
    #[must_use]
    pub fn lamps(&self) -> [bool; 4] {
        self.lamps
    }

    /// Probes `device` and, on success, makes it the panel's device.
    ///
    /// A failed probe leaves the panel as it was, including any previously
    /// connected device.
    ///
    /// # Errors
    ///
    /// Returns `PanelError::Connect` if the status query fails.
    pub async fn connect(&mut self, device: Device<P>) -> Result<&AgentInfo, PanelError> {
        let snapshot = device.fetch_snapshot().await.map_err(|e| {
            tracing::debug!(error = %e, "Connect probe failed");
            PanelError::Connect(e)
        })?;

        self.lamps = snapshot.lamps();
        self.device = Some(device);
        Ok(&*self.info.insert(AgentInfo::from(snapshot.agent())))
    }

    /// Presses a panel button.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn press(&mut self, button: Button) -> Result<[bool; 4], PanelError> {
        let (output, action) = button.command();
        self.apply(output, action).await
    }

    /// Applies `action` to `output`, waits the settle delay and refreshes
    /// the lamps.
    ///
    /// # Errors
    ///
    /// Returns `PanelError::NotConnected` before a successful connect,
    /// `PanelError::SetOutput` if the device rejects the request and
    /// `PanelError::Status` if the state cannot be read back.
    pub async fn apply(
        &mut self,
        output: OutputId,
        action: Action,
    ) -> Result<[bool; 4], PanelError> {
        let device = self.device.as_ref().ok_or(PanelError::NotConnected)?;

        device.set_outputs(output, action).await.map_err(|source| {
            tracing::debug!(error = %source, %output, %action, "Set outputs failed");
            PanelError::SetOutput {
                output,
                action,
                source,
            }
        })?;

        tokio::time::sleep(self.settle_delay).await;

        self.refresh().await
    }

    /// Reads the output states and updates the lamps.
    ///
    /// # Errors
    ///
    /// Returns `PanelError::NotConnected` before a successful connect and
    /// `PanelError::Status` if the query fails.
    pub async fn refresh(&mut self) -> Result<[bool; 4], PanelError> {
        let device = self.device.as_ref().ok_or(PanelError::NotConnected)?;
        let snapshot = device.fetch_snapshot().await.map_err(|e| {
            tracing::debug!(error = %e, "Status refresh failed");
            PanelError::Status(e)
        })?;
        self.lamps = snapshot.lamps();
        Ok(self.lamps)
    }

    /// Reads every output and renders the status listing.
    ///
    /// # Errors
    ///
    /// Returns `PanelError::NotConnected` before a successful connect and
    /// `PanelError::Status` if the query fails.
    pub async fn status_report(&self) -> Result<String, PanelError> {
        let device = self.device.as_ref().ok_or(PanelError::NotConnected)?;
        let outputs = device.fetch_outputs().await.map_err(|e| {
            tracing::debug!(error = %e, "Status query failed");
            PanelError::Status(e)
        })?;
        Ok(render_status(&outputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use crate::protocol::HttpClient;
    use crate::types::OutputState;

    #[test]
    fn new_panel_is_disabled() {
        let panel: ControlPanel<HttpClient> = ControlPanel::new();
        assert_eq!(panel.state(), PanelState::Disabled);
        assert!(panel.info().is_none());
        assert_eq!(panel.lamps(), [false; 4]);
        assert_eq!(panel.settle_delay(), Duration::from_millis(666));
    }

    #[tokio::test]
    async fn actions_require_connection() {
        let mut panel: ControlPanel<HttpClient> = ControlPanel::new();
        assert!(matches!(
            panel.press(Button::AllOn).await,
            Err(PanelError::NotConnected)
        ));
        assert!(matches!(
            panel.status_report().await,
            Err(PanelError::NotConnected)
        ));
    }

    #[test]
    fn agent_info_formats_numbers() {
        let agent = Agent {
            model: "NETIO 4".to_string(),
            oem_id: 5,
            num_outputs: 4,
            ..Agent::default()
        };
        let info = AgentInfo::from(&agent);
        assert_eq!(info.oem_id, "5");
        assert_eq!(info.outputs, "4");
        assert_eq!(info.firmware, "Error");
        assert!(info.to_string().starts_with("Model: NETIO 4\n"));
    }

    #[test]
    fn status_listing() {
        let outputs = [OutputStatus {
            id: OutputId::Output2,
            action: Action::Ignore,
            name: "router".to_string(),
            state: OutputState::On,
            delay: 5000,
        }];
        assert_eq!(
            render_status(&outputs),
            "Current output status:\n\nID: Output_2\nName: router\nAction: Ignore\nState: On\n\n"
        );
    }

    #[test]
    fn set_output_message_names_action() {
        let err = PanelError::SetOutput {
            output: OutputId::All,
            action: Action::Off,
            source: Error::Protocol(ProtocolError::AuthenticationFailed),
        };
        assert_eq!(err.to_string(), "Failed to set output: all and action = Off");
        assert_eq!(err.title(), "Control error");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn about_mentions_version() {
        assert!(about().contains(VERSION));
    }
}
