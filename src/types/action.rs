// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output actions understood by the NETIO JSON API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::ValueError;
use crate::types::WireCode;

/// Operation requested for an output.
///
/// The firmware encodes actions as the numeric codes 0-6. Names are
/// case-sensitive.
///
/// # Examples
///
/// ```
/// use netio_lib::types::Action;
///
/// assert_eq!(Action::Toggle.code(), 4);
/// assert_eq!(Action::ShortOff.as_str(), "ShortOff");
/// assert_eq!("On".parse::<Action>().unwrap(), Action::On);
/// assert!("on".parse::<Action>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Turn the output off.
    Off,
    /// Turn the output on.
    On,
    /// Switch off for the output's delay, then back on (restart).
    ShortOff,
    /// Switch on for the output's delay, then back off.
    ShortOn,
    /// Invert the current state.
    Toggle,
    /// Leave the output unchanged.
    #[default]
    None,
    /// Reported by status queries; ignored when sent.
    Ignore,
}

impl Action {
    /// All actions in code order.
    pub const ALL: [Self; 7] = [
        Self::Off,
        Self::On,
        Self::ShortOff,
        Self::ShortOn,
        Self::Toggle,
        Self::None,
        Self::Ignore,
    ];

    /// Returns the action name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::On => "On",
            Self::ShortOff => "ShortOff",
            Self::ShortOn => "ShortOn",
            Self::Toggle => "Toggle",
            Self::None => "None",
            Self::Ignore => "Ignore",
        }
    }

    /// Returns the numeric code used on the wire.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
            Self::ShortOff => 2,
            Self::ShortOn => 3,
            Self::Toggle => 4,
            Self::None => 5,
            Self::Ignore => 6,
        }
    }

    /// Returns the action for a wire code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::ShortOff),
            3 => Some(Self::ShortOn),
            4 => Some(Self::Toggle),
            5 => Some(Self::None),
            6 => Some(Self::Ignore),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ValueError::InvalidAction(s.to_string()))
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match WireCode::deserialize(deserializer)? {
            WireCode::Code(code) => u8::try_from(code)
                .ok()
                .and_then(Self::from_code)
                .ok_or_else(|| de::Error::custom(format!("unknown action code {code}"))),
            WireCode::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_firmware_enumeration() {
        for (code, action) in (0u8..).zip(Action::ALL) {
            assert_eq!(action.code(), code);
            assert_eq!(Action::from_code(code), Some(action));
        }
        assert_eq!(Action::from_code(7), None);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn from_str_is_case_sensitive() {
        assert!(matches!(
            "toggle".parse::<Action>(),
            Err(ValueError::InvalidAction(_))
        ));
        assert!("SHORTOFF".parse::<Action>().is_err());
    }

    #[test]
    fn deserializes_code_or_name() {
        assert_eq!(serde_json::from_str::<Action>("6").unwrap(), Action::Ignore);
        assert_eq!(
            serde_json::from_str::<Action>("\"ShortOn\"").unwrap(),
            Action::ShortOn
        );
        assert!(serde_json::from_str::<Action>("\"on\"").is_err());
        assert!(serde_json::from_str::<Action>("9").is_err());
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Action::Toggle).unwrap(), "4");
    }
}
