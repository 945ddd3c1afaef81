// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the control panel using wiremock.

use std::time::{Duration, Instant};

use netio_lib::panel::{Button, ControlPanel, PanelError, PanelState};
use netio_lib::types::{Action, OutputId};
use netio_lib::{Device, HttpClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SETTLE: Duration = Duration::from_millis(20);

fn status_body(states: [u8; 4]) -> serde_json::Value {
    let outputs: Vec<_> = (1u8..=4)
        .zip(states)
        .map(|(id, state)| {
            json!({"ID": id, "Name": format!("socket {id}"), "State": state, "Action": 6, "Delay": 2000})
        })
        .collect();
    json!({
        "Agent": {
            "Model": "NETIO 4",
            "Version": "3.4.0",
            "JSONVer": "2.1",
            "DeviceName": "bench",
            "VendorID": 0,
            "OemID": 5,
            "SerialNumber": "24:A4:2C:39:0D:10",
            "Uptime": 120,
            "Time": "2021-03-17T10:34:52+01:00",
            "NumOutputs": 4
        },
        "Outputs": outputs
    })
}

fn panel() -> ControlPanel<HttpClient> {
    ControlPanel::new().with_settle_delay(SETTLE)
}

fn device_for(server: &MockServer) -> Device<HttpClient> {
    Device::http(server.uri())
        .with_credentials("netio", "netio")
        .build()
        .unwrap()
}

/// Serves `first` for one status query and `then` afterwards.
async fn mount_status_sequence(server: &MockServer, first: [u8; 4], then: [u8; 4]) {
    Mock::given(method("GET"))
        .and(path("/netio.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(first)))
        .up_to_n_times(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/netio.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(then)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn connect_enables_panel() {
    let server = MockServer::start().await;
    mount_status_sequence(&server, [1, 0, 0, 1], [1, 0, 0, 1]).await;

    let mut panel = panel();
    let info = panel.connect(device_for(&server)).await.unwrap().clone();

    assert_eq!(info.model, "NETIO 4");
    assert_eq!(info.device_name, "bench");
    assert_eq!(info.oem_id, "5");
    assert_eq!(info.outputs, "4");
    assert_eq!(panel.state(), PanelState::Enabled);
    assert_eq!(panel.lamps(), [true, false, false, true]);
}

#[tokio::test]
async fn failed_connect_stays_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut panel = panel();
    let err = panel.connect(device_for(&server)).await.unwrap_err();

    assert!(matches!(err, PanelError::Connect(_)));
    assert_eq!(err.title(), "Connect error");
    assert!(err.to_string().starts_with("Could not find/connect"));
    assert_eq!(panel.state(), PanelState::Disabled);
    assert!(panel.info().is_none());
}

#[tokio::test]
async fn press_switches_waits_and_refreshes() {
    let server = MockServer::start().await;
    mount_status_sequence(&server, [0, 0, 0, 0], [1, 1, 1, 1]).await;

    Mock::given(method("POST"))
        .and(path("/netio.json"))
        .and(body_json(json!({"Outputs": [
            {"ID": 1, "Action": 1},
            {"ID": 2, "Action": 1},
            {"ID": 3, "Action": 1},
            {"ID": 4, "Action": 1}
        ]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut panel = panel();
    panel.connect(device_for(&server)).await.unwrap();
    assert_eq!(panel.lamps(), [false; 4]);

    let started = Instant::now();
    let lamps = panel.press(Button::AllOn).await.unwrap();

    assert!(started.elapsed() >= SETTLE);
    assert_eq!(lamps, [true; 4]);
    assert_eq!(panel.lamps(), [true; 4]);
}

#[tokio::test]
async fn rejected_press_names_action_and_stays_enabled() {
    let server = MockServer::start().await;
    mount_status_sequence(&server, [0, 1, 0, 0], [0, 1, 0, 0]).await;

    Mock::given(method("POST"))
        .and(path("/netio.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut panel = panel();
    panel.connect(device_for(&server)).await.unwrap();

    let err = panel.press(Button::Output2Off).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to set output: 2 and action = Off");
    assert!(matches!(
        err,
        PanelError::SetOutput {
            output: OutputId::Output2,
            action: Action::Off,
            ..
        }
    ));
    assert_eq!(panel.state(), PanelState::Enabled);
    assert_eq!(panel.lamps(), [false, true, false, false]);
}

#[tokio::test]
async fn status_report_lists_outputs() {
    let server = MockServer::start().await;
    mount_status_sequence(&server, [1, 0, 1, 0], [1, 0, 1, 0]).await;

    let mut panel = panel();
    panel.connect(device_for(&server)).await.unwrap();

    let report = panel.status_report().await.unwrap();
    assert!(report.starts_with("Current output status:\n\n"));
    assert!(report.contains("ID: Output_1\nName: socket 1\nAction: Ignore\nState: On\n"));
    assert!(report.contains("ID: Output_4\nName: socket 4\nAction: Ignore\nState: Off\n"));
}

#[tokio::test]
async fn later_status_failure_keeps_panel_enabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/netio.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body([0, 0, 1, 0])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/netio.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut panel = panel();
    panel.connect(device_for(&server)).await.unwrap();

    let err = panel.status_report().await.unwrap_err();
    assert!(matches!(err, PanelError::Status(_)));
    assert_eq!(err.to_string(), "Failed to get output status!");
    assert_eq!(panel.state(), PanelState::Enabled);
    assert_eq!(panel.info().unwrap().model, "NETIO 4");
}

#[tokio::test]
async fn reconnect_failure_keeps_previous_device() {
    let good = MockServer::start().await;
    mount_status_sequence(&good, [1, 1, 0, 0], [1, 1, 0, 0]).await;

    let bad = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&bad)
        .await;

    let mut panel = panel();
    panel.connect(device_for(&good)).await.unwrap();
    assert!(panel.connect(device_for(&bad)).await.is_err());

    assert_eq!(panel.state(), PanelState::Enabled);
    assert_eq!(panel.refresh().await.unwrap(), [true, true, false, false]);
}
