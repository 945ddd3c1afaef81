// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status snapshot parsing.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ParseError;
use crate::types::{Action, DeviceTime, OutputId, OutputState};

/// Value every text field of [`Agent::default`] carries.
pub const ERROR_SENTINEL: &str = "Error";

/// Device identity block (`Agent`).
///
/// Fields missing from a response keep their [`Default`] values, which are
/// the error sentinels: `"Error"` for text and `-1` for numbers.
///
/// # Examples
///
/// ```
/// use netio_lib::response::Agent;
///
/// let json = r#"{"Model": "NETIO 4", "Version": "3.4.0", "NumOutputs": 4}"#;
/// let agent: Agent = serde_json::from_str(json).unwrap();
/// assert_eq!(agent.model, "NETIO 4");
/// assert_eq!(agent.num_outputs, 4);
/// assert_eq!(agent.serial_number, "Error");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Agent {
    /// Model name, e.g. `"NETIO 4"`.
    pub model: String,
    /// Firmware version.
    pub version: String,
    /// JSON API version.
    #[serde(rename = "JSONVer")]
    pub json_ver: String,
    /// User-configured device name.
    pub device_name: String,
    /// Vendor id.
    #[serde(rename = "VendorID")]
    pub vendor_id: i64,
    /// OEM id.
    #[serde(rename = "OemID")]
    pub oem_id: i64,
    /// Serial number (the MAC address on current firmware).
    pub serial_number: String,
    /// Seconds since boot.
    pub uptime: i64,
    /// Device clock.
    pub time: Option<DeviceTime>,
    /// Number of outputs the device reports.
    pub num_outputs: i32,
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            model: ERROR_SENTINEL.to_string(),
            version: ERROR_SENTINEL.to_string(),
            json_ver: ERROR_SENTINEL.to_string(),
            device_name: ERROR_SENTINEL.to_string(),
            vendor_id: -1,
            oem_id: -1,
            serial_number: ERROR_SENTINEL.to_string(),
            uptime: -1,
            time: None,
            num_outputs: -1,
        }
    }
}

impl Agent {
    /// Returns true if this is the error placeholder rather than device data.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.model == ERROR_SENTINEL
    }

    /// Returns the uptime as a duration, if the device reported one.
    #[must_use]
    pub fn uptime(&self) -> Option<Duration> {
        u64::try_from(self.uptime).ok().map(Duration::from_secs)
    }
}

/// Full state of one output as returned by a status query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OutputStatus {
    /// Output id (1-4).
    #[serde(rename = "ID")]
    pub id: OutputId,
    /// Last requested action, usually [`Action::Ignore`].
    pub action: Action,
    /// User-configured output name.
    pub name: String,
    /// Current relay state.
    pub state: OutputState,
    /// Duration of short on/off pulses in milliseconds.
    pub delay: i64,
}

impl Default for OutputStatus {
    fn default() -> Self {
        Self {
            id: OutputId::Unknown,
            action: Action::None,
            name: "NA".to_string(),
            state: OutputState::Off,
            delay: -1,
        }
    }
}

impl OutputStatus {
    /// Returns the pulse delay, if the device reported one.
    #[must_use]
    pub fn delay(&self) -> Option<Duration> {
        u64::try_from(self.delay).ok().map(Duration::from_millis)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawSnapshot {
    agent: Agent,
    outputs: Vec<OutputStatus>,
}

/// Agent and output states from a single status query.
///
/// Outputs are ordered by id and each id appears at most once.
///
/// # Examples
///
/// ```
/// use netio_lib::response::DeviceSnapshot;
/// use netio_lib::types::{OutputId, OutputState};
///
/// let json = r#"{
///     "Agent": {"Model": "NETIO 4", "NumOutputs": 2},
///     "Outputs": [
///         {"ID": 2, "Name": "lamp", "State": 0, "Action": 6, "Delay": 2000},
///         {"ID": 1, "Name": "router", "State": 1, "Action": 6, "Delay": 2000}
///     ]
/// }"#;
/// let snapshot = DeviceSnapshot::parse(json).unwrap();
/// assert_eq!(snapshot.outputs()[0].name, "router");
/// assert_eq!(snapshot.output(OutputId::Output2).unwrap().state, OutputState::Off);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceSnapshot {
    agent: Agent,
    outputs: Vec<OutputStatus>,
}

impl DeviceSnapshot {
    /// Parses and validates a `GET /netio.json` body.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` for malformed JSON and
    /// `ParseError::UnexpectedFormat` if an output id is not 1-4 or repeats.
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        let raw: RawSnapshot = serde_json::from_str(body)?;
        Self::new(raw.agent, raw.outputs)
    }

    /// Builds a snapshot, sorting outputs by id.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if an output id is not 1-4 or
    /// repeats.
    pub fn new(agent: Agent, mut outputs: Vec<OutputStatus>) -> Result<Self, ParseError> {
        if let Some(bad) = outputs.iter().find(|o| !o.id.is_physical()) {
            return Err(ParseError::UnexpectedFormat(format!(
                "output id {} in status response",
                bad.id.code()
            )));
        }

        outputs.sort_by_key(|o| o.id);
        if let Some(pair) = outputs.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(ParseError::UnexpectedFormat(format!(
                "duplicate output id {}",
                pair[0].id
            )));
        }

        Ok(Self { agent, outputs })
    }

    /// Returns the placeholder snapshot used when a query fails: a default
    /// [`Agent`] and no outputs.
    #[must_use]
    pub fn sentinel() -> Self {
        Self::default()
    }

    /// Returns true if this is the failure placeholder.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.agent.is_sentinel()
    }

    /// Returns the agent block.
    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Returns the outputs ordered by id.
    #[must_use]
    pub fn outputs(&self) -> &[OutputStatus] {
        &self.outputs
    }

    /// Consumes the snapshot and returns its parts.
    #[must_use]
    pub fn into_parts(self) -> (Agent, Vec<OutputStatus>) {
        (self.agent, self.outputs)
    }

    /// Returns the record for `id`.
    ///
    /// `None` for `All`, `Unknown`, or an output the device did not report.
    #[must_use]
    pub fn output(&self, id: OutputId) -> Option<&OutputStatus> {
        self.outputs.iter().find(|o| o.id == id)
    }

    /// Returns the relay state of each physical output, `false` where the
    /// snapshot has no record.
    #[must_use]
    pub fn lamps(&self) -> [bool; 4] {
        OutputId::OUTPUTS.map(|id| self.output(id).is_some_and(|o| o.state.is_on()))
    }
}
