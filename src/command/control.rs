// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output control request body.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::types::{Action, OutputId};

/// One `{ID, Action}` entry of a control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputCommand {
    /// The output to act on.
    #[serde(rename = "ID")]
    pub id: OutputId,
    /// The action to apply.
    #[serde(rename = "Action")]
    pub action: Action,
}

impl OutputCommand {
    /// Creates a command for a single physical output.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotAnOutput` for `All` and `Unknown`.
    pub fn new(id: OutputId, action: Action) -> Result<Self, ValueError> {
        if !id.is_physical() {
            return Err(ValueError::NotAnOutput(id));
        }
        Ok(Self { id, action })
    }
}

/// Body of the `POST /netio.json` request.
///
/// # Examples
///
/// ```
/// use netio_lib::command::ControlRequest;
/// use netio_lib::types::{Action, OutputId};
///
/// let request = ControlRequest::new(OutputId::Output2, Action::Toggle).unwrap();
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"Outputs":[{"ID":2,"Action":4}]}"#
/// );
///
/// let all = ControlRequest::new(OutputId::All, Action::On).unwrap();
/// assert_eq!(all.outputs().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRequest {
    #[serde(rename = "Outputs")]
    outputs: Vec<OutputCommand>,
}

impl ControlRequest {
    /// Builds the request applying `action` to `target`.
    ///
    /// `All` expands to outputs 1-4 in id order within one request.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotAnOutput` if `target` is `Unknown`.
    pub fn new(target: OutputId, action: Action) -> Result<Self, ValueError> {
        let outputs = target
            .targets()
            .into_iter()
            .map(|id| OutputCommand { id, action })
            .collect::<Vec<_>>();

        if outputs.is_empty() {
            return Err(ValueError::NotAnOutput(target));
        }

        Ok(Self { outputs })
    }

    /// Builds a request from individual per-output commands.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotAnOutput` if `commands` is empty.
    pub fn from_commands(commands: Vec<OutputCommand>) -> Result<Self, ValueError> {
        if commands.is_empty() {
            return Err(ValueError::NotAnOutput(OutputId::Unknown));
        }
        Ok(Self { outputs: commands })
    }

    /// Returns the per-output commands in send order.
    #[must_use]
    pub fn outputs(&self) -> &[OutputCommand] {
        &self.outputs
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn all_on_fans_out_to_four_outputs() {
        let request = ControlRequest::new(OutputId::All, Action::On).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"Outputs": [
                {"ID": 1, "Action": 1},
                {"ID": 2, "Action": 1},
                {"ID": 3, "Action": 1},
                {"ID": 4, "Action": 1},
            ]})
        );
    }

    #[test]
    fn single_output_toggle() {
        let request = ControlRequest::new(OutputId::Output2, Action::Toggle).unwrap();
        assert_eq!(
            request.outputs(),
            &[OutputCommand {
                id: OutputId::Output2,
                action: Action::Toggle
            }]
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"Outputs": [{"ID": 2, "Action": 4}]})
        );
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert_eq!(
            ControlRequest::new(OutputId::Unknown, Action::On),
            Err(ValueError::NotAnOutput(OutputId::Unknown))
        );
    }

    #[test]
    fn output_command_requires_physical_output() {
        assert!(OutputCommand::new(OutputId::All, Action::Off).is_err());
        assert!(OutputCommand::new(OutputId::Output4, Action::ShortOff).is_ok());
    }

    #[test]
    fn mixed_commands_keep_order() {
        let request = ControlRequest::from_commands(vec![
            OutputCommand::new(OutputId::Output3, Action::Off).unwrap(),
            OutputCommand::new(OutputId::Output1, Action::On).unwrap(),
        ])
        .unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"Outputs": [{"ID": 3, "Action": 0}, {"ID": 1, "Action": 1}]})
        );
        assert!(ControlRequest::from_commands(Vec::new()).is_err());
    }
}
