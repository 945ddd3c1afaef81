// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `netio_lib` - A Rust library to control NETIO power distribution units.
//!
//! The library talks to the device's JSON API at `http://<host>/netio.json`:
//! a GET returns the device identity and every output state, a POST
//! switches outputs.
//!
//! # Supported Features
//!
//! - **Status queries**: model, firmware, serial number, uptime, device clock
//! - **Output control**: on, off, short on/off pulses, toggle, for one
//!   output or all four at once
//! - **Control panel**: front-end independent connect/press/status logic
//!
//! # Quick Start
//!
//! ```no_run
//! use netio_lib::Device;
//! use netio_lib::types::{Action, OutputId};
//!
//! #[tokio::main]
//! async fn main() -> netio_lib::Result<()> {
//!     let (device, snapshot) = Device::http("192.168.11.250")
//!         .with_credentials("netio", "netio")
//!         .connect()
//!         .await?;
//!
//!     println!("Connected to {}", snapshot.agent().model);
//!
//!     device.set_outputs(OutputId::Output2, Action::On).await?;
//!
//!     let output = device.fetch_output(OutputId::Output2).await?;
//!     println!("{} is {}", output.name, output.state);
//!     Ok(())
//! }
//! ```
//!
//! ## Sentinel-style calls
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
//! let snapshot = device.fetch_snapshot_or_sentinel().await;
//! if !snapshot.is_sentinel() {
//!     let ok = device.set_outputs_succeeded(OutputId::All, Action::Off).await;
//!     println!("switched off: {ok}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
mod device;
pub mod error;
pub mod panel;
pub mod protocol;
pub mod response;
pub mod types;

pub use command::{ControlRequest, OutputCommand};
pub use device::{Device, HttpDeviceBuilder};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use panel::{Button, ControlPanel, PanelError, PanelState};
pub use protocol::{HttpClient, HttpConfig, Protocol};
pub use response::{Agent, DeviceSnapshot, OutputStatus};
pub use types::{Action, DeviceTime, OutputId, OutputState};
