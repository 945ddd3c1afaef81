// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request bodies sent to the NETIO JSON API.
//!
//! The device accepts a single write shape: a list of `{ID, Action}` pairs
//! posted to `/netio.json`. Reads are a plain GET with no body.
//!
//! # Examples
//!
//! ```
//! use netio_lib::command::ControlRequest;
//! use netio_lib::types::{Action, OutputId};
//!
//! // Switch every output off in one request
//! let request = ControlRequest::new(OutputId::All, Action::Off).unwrap();
//! let ids: Vec<u8> = request.outputs().iter().map(|c| c.id.code()).collect();
//! assert_eq!(ids, vec![1, 2, 3, 4]);
//! ```

mod control;

pub use control::{ControlRequest, OutputCommand};
