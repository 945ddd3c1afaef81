// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for NETIO output control.
//!
//! # Types
//!
//! - [`OutputId`] - Output selector (1-4, or all)
//! - [`OutputState`] - Relay state reported by the device
//! - [`Action`] - Operation requested for an output
//! - [`DeviceTime`] - Device clock from the agent block

mod action;
mod datetime;
mod output;

pub use action::Action;
pub use datetime::{DateTimeParseError, DeviceTime};
pub use output::{OutputId, OutputState};

use serde::Deserialize;

/// Enumerated value as it may appear in a response: the firmware's numeric
/// code, or its case-sensitive name.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum WireCode {
    Code(i64),
    Name(String),
}
