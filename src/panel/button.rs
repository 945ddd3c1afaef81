// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control buttons of the panel.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;
use crate::types::{Action, OutputId};

/// One of the panel's on/off buttons.
///
/// # Examples
///
/// ```
/// use netio_lib::panel::Button;
/// use netio_lib::types::{Action, OutputId};
///
/// assert_eq!(Button::Output3Off.command(), (OutputId::Output3, Action::Off));
/// assert_eq!("all-on".parse::<Button>().unwrap(), Button::AllOn);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Output 1 on.
    Output1On,
    /// Output 1 off.
    Output1Off,
    /// Output 2 on.
    Output2On,
    /// Output 2 off.
    Output2Off,
    /// Output 3 on.
    Output3On,
    /// Output 3 off.
    Output3Off,
    /// Output 4 on.
    Output4On,
    /// Output 4 off.
    Output4Off,
    /// All outputs on.
    AllOn,
    /// All outputs off.
    AllOff,
}

impl Button {
    /// Every button, in panel order.
    pub const ALL: [Self; 10] = [
        Self::Output1On,
        Self::Output1Off,
        Self::Output2On,
        Self::Output2Off,
        Self::Output3On,
        Self::Output3Off,
        Self::Output4On,
        Self::Output4Off,
        Self::AllOn,
        Self::AllOff,
    ];

    /// Returns the output and action this button applies.
    #[must_use]
    pub const fn command(&self) -> (OutputId, Action) {
        match self {
            Self::Output1On => (OutputId::Output1, Action::On),
            Self::Output1Off => (OutputId::Output1, Action::Off),
            Self::Output2On => (OutputId::Output2, Action::On),
            Self::Output2Off => (OutputId::Output2, Action::Off),
            Self::Output3On => (OutputId::Output3, Action::On),
            Self::Output3Off => (OutputId::Output3, Action::Off),
            Self::Output4On => (OutputId::Output4, Action::On),
            Self::Output4Off => (OutputId::Output4, Action::Off),
            Self::AllOn => (OutputId::All, Action::On),
            Self::AllOff => (OutputId::All, Action::Off),
        }
    }

    /// Returns the button label, e.g. `output2-on`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Output1On => "output1-on",
            Self::Output1Off => "output1-off",
            Self::Output2On => "output2-on",
            Self::Output2Off => "output2-off",
            Self::Output3On => "output3-on",
            Self::Output3Off => "output3-off",
            Self::Output4On => "output4-on",
            Self::Output4Off => "output4-off",
            Self::AllOn => "all-on",
            Self::AllOff => "all-off",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Button {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|button| button.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::InvalidOutput(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_output_has_on_and_off() {
        for output in OutputId::OUTPUTS.into_iter().chain([OutputId::All]) {
            for action in [Action::On, Action::Off] {
                assert_eq!(
                    Button::ALL
                        .iter()
                        .filter(|b| b.command() == (output, action))
                        .count(),
                    1,
                    "{output} {action}"
                );
            }
        }
    }

    #[test]
    fn labels_parse_back() {
        for button in Button::ALL {
            assert_eq!(button.label().parse::<Button>().unwrap(), button);
        }
        assert_eq!("ALL-OFF".parse::<Button>().unwrap(), Button::AllOff);
    }

    #[test]
    fn unknown_label() {
        assert!(matches!(
            "output5-on".parse::<Button>(),
            Err(ValueError::InvalidOutput(_))
        ));
    }
}
