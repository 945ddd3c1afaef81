// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for the NETIO JSON API.
//!
//! A status query returns one document holding the device identity
//! (`Agent`) and the state of every output (`Outputs`).

mod snapshot;

pub use snapshot::{Agent, DeviceSnapshot, ERROR_SENTINEL, OutputStatus};
