// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output addressing and relay state types.
//!
//! A NETIO 4 exposes four switchable outputs, addressed on the wire by the
//! numeric ids 1 to 4. Id 5 selects all outputs at once and only ever
//! appears in requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::ValueError;
use crate::types::WireCode;

/// Selects one output of the device, or all of them.
///
/// # Examples
///
/// ```
/// use netio_lib::types::OutputId;
///
/// let id = OutputId::new(2).unwrap();
/// assert_eq!(id, OutputId::Output2);
/// assert_eq!(id.code(), 2);
/// assert_eq!(id.index(), Some(1));
///
/// assert_eq!(OutputId::All.code(), 5);
/// assert!(OutputId::new(5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum OutputId {
    /// Placeholder id of an empty record. Never sent to the device.
    #[default]
    Unknown,
    /// Output 1.
    Output1,
    /// Output 2.
    Output2,
    /// Output 3.
    Output3,
    /// Output 4.
    Output4,
    /// All four outputs. Request-only.
    All,
}

impl OutputId {
    /// Number of physical outputs.
    pub const COUNT: u8 = 4;

    /// The four physical outputs in id order.
    pub const OUTPUTS: [Self; 4] = [Self::Output1, Self::Output2, Self::Output3, Self::Output4];

    /// Creates the id of a single physical output (1-4).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `id` is not in 1..=4.
    pub fn new(id: u8) -> Result<Self, ValueError> {
        match id {
            1 => Ok(Self::Output1),
            2 => Ok(Self::Output2),
            3 => Ok(Self::Output3),
            4 => Ok(Self::Output4),
            _ => Err(ValueError::OutOfRange {
                min: 1,
                max: Self::COUNT,
                actual: id,
            }),
        }
    }

    /// Returns the id for a wire code, including `All` (5) and `Unknown` (0).
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Output1),
            2 => Some(Self::Output2),
            3 => Some(Self::Output3),
            4 => Some(Self::Output4),
            5 => Some(Self::All),
            _ => None,
        }
    }

    /// Returns the numeric id used on the wire.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Output1 => 1,
            Self::Output2 => 2,
            Self::Output3 => 3,
            Self::Output4 => 4,
            Self::All => 5,
        }
    }

    /// Returns the symbolic name, e.g. `Output_2`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Output1 => "Output_1",
            Self::Output2 => "Output_2",
            Self::Output3 => "Output_3",
            Self::Output4 => "Output_4",
            Self::All => "All",
        }
    }

    /// Returns the zero-based position of a physical output, e.g. in a lamp array.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Output1 => Some(0),
            Self::Output2 => Some(1),
            Self::Output3 => Some(2),
            Self::Output4 => Some(3),
            Self::Unknown | Self::All => None,
        }
    }

    /// Returns true for outputs 1-4.
    #[must_use]
    pub const fn is_physical(&self) -> bool {
        self.index().is_some()
    }

    /// Expands the selector into the physical outputs it addresses.
    ///
    /// `All` fans out to outputs 1-4; a physical output yields itself;
    /// `Unknown` addresses nothing.
    #[must_use]
    pub fn targets(&self) -> Vec<Self> {
        match self {
            Self::All => Self::OUTPUTS.to_vec(),
            Self::Unknown => Vec::new(),
            single => vec![*single],
        }
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::All => write!(f, "all"),
            output => write!(f, "{}", output.code()),
        }
    }
}

impl FromStr for OutputId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let digits = s
            .strip_prefix("Output_")
            .or_else(|| s.strip_prefix("output"))
            .unwrap_or(s);
        let id: u8 = digits
            .parse()
            .map_err(|_| ValueError::InvalidOutput(s.to_string()))?;
        Self::new(id)
    }
}

impl Serialize for OutputId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for OutputId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match WireCode::deserialize(deserializer)? {
            WireCode::Code(code) => u8::try_from(code)
                .ok()
                .and_then(Self::from_code)
                .ok_or_else(|| de::Error::custom(format!("unknown output id {code}"))),
            WireCode::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}

/// Relay state of an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputState {
    /// Relay open, no power on the socket.
    #[default]
    Off,
    /// Relay closed, socket powered.
    On,
}

impl OutputState {
    /// Returns the name of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::On => "On",
        }
    }

    /// Returns the numeric state used on the wire.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Returns true if the output is powered.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for OutputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Off" => Ok(Self::Off),
            "On" => Ok(Self::On),
            _ => Err(ValueError::InvalidOutputState(s.to_string())),
        }
    }
}

impl From<bool> for OutputState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl Serialize for OutputState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for OutputState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match WireCode::deserialize(deserializer)? {
            WireCode::Code(0) => Ok(Self::Off),
            WireCode::Code(1) => Ok(Self::On),
            WireCode::Code(code) => Err(de::Error::custom(format!(
                "unknown output state {code}"
            ))),
            WireCode::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_id_valid() {
        for (i, expected) in (1..=4).zip(OutputId::OUTPUTS) {
            let id = OutputId::new(i).unwrap();
            assert_eq!(id, expected);
            assert_eq!(id.code(), i);
            assert_eq!(id.index(), Some(usize::from(i - 1)));
        }
    }

    #[test]
    fn output_id_out_of_range() {
        assert!(matches!(
            OutputId::new(0),
            Err(ValueError::OutOfRange { actual: 0, .. })
        ));
        assert!(OutputId::new(5).is_err());
    }

    #[test]
    fn all_fans_out_in_order() {
        assert_eq!(
            OutputId::All.targets(),
            vec![
                OutputId::Output1,
                OutputId::Output2,
                OutputId::Output3,
                OutputId::Output4
            ]
        );
        assert_eq!(OutputId::Output3.targets(), vec![OutputId::Output3]);
        assert!(OutputId::Unknown.targets().is_empty());
    }

    #[test]
    fn output_id_from_str() {
        assert_eq!("2".parse::<OutputId>().unwrap(), OutputId::Output2);
        assert_eq!("ALL".parse::<OutputId>().unwrap(), OutputId::All);
        assert_eq!("Output_4".parse::<OutputId>().unwrap(), OutputId::Output4);
        assert_eq!(OutputId::Output2.name().parse::<OutputId>().unwrap(), OutputId::Output2);
        assert_eq!("output1".parse::<OutputId>().unwrap(), OutputId::Output1);
        assert!(matches!(
            "socket".parse::<OutputId>(),
            Err(ValueError::InvalidOutput(_))
        ));
        assert!("9".parse::<OutputId>().is_err());
    }

    #[test]
    fn output_id_display() {
        assert_eq!(OutputId::Output1.to_string(), "1");
        assert_eq!(OutputId::All.to_string(), "all");
        assert_eq!(OutputId::Unknown.to_string(), "unknown");
    }

    #[test]
    fn output_id_wire_format() {
        assert_eq!(serde_json::to_string(&OutputId::Output2).unwrap(), "2");
        assert_eq!(
            serde_json::from_str::<OutputId>("5").unwrap(),
            OutputId::All
        );
        assert!(serde_json::from_str::<OutputId>("6").is_err());
        assert!(serde_json::from_str::<OutputId>("-1").is_err());
    }

    #[test]
    fn output_state_names_are_case_sensitive() {
        assert_eq!("On".parse::<OutputState>().unwrap(), OutputState::On);
        assert_eq!("Off".parse::<OutputState>().unwrap(), OutputState::Off);
        assert!("on".parse::<OutputState>().is_err());
    }

    #[test]
    fn output_state_wire_format() {
        assert_eq!(
            serde_json::from_str::<OutputState>("1").unwrap(),
            OutputState::On
        );
        assert_eq!(
            serde_json::from_str::<OutputState>("\"Off\"").unwrap(),
            OutputState::Off
        );
        assert!(serde_json::from_str::<OutputState>("2").is_err());
        assert_eq!(serde_json::to_string(&OutputState::On).unwrap(), "1");
    }

    #[test]
    fn output_state_from_bool() {
        assert_eq!(OutputState::from(true), OutputState::On);
        assert!(!OutputState::from(false).is_on());
    }
}
