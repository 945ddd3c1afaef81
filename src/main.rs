// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `netio` - command-line front end for NETIO power distribution units.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use netio_lib::panel::{self, Button, ControlPanel, PanelError};
use netio_lib::types::{Action, OutputId};
use netio_lib::{Device, HttpClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Device address, optionally with `:port`
    #[arg(long, env = "NETIO_HOST", value_name = "HOST")]
    host: Option<String>,

    /// JSON API username
    #[arg(short, long, env = "NETIO_USER", default_value = "netio")]
    user: String,

    /// JSON API password
    #[arg(
        short,
        long,
        env = "NETIO_PASSWORD",
        default_value = "netio",
        hide_env_values = true
    )]
    password: String,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    timeout_ms: u64,

    /// Wait after switching before reading the state back, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 666)]
    settle_ms: u64,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show device identity
    Info,
    /// List every output with name, action and state
    Status,
    /// Apply an action (Off, On, ShortOff, ShortOn, Toggle, None) to an output (1-4 or all)
    Set {
        /// Output id, 1-4 or `all`
        output: OutputId,
        /// Action name, case-sensitive
        action: Action,
    },
    /// Press a panel button, e.g. `output2-on` or `all-off`
    Press {
        /// Button label
        button: Button,
    },
    /// Show version information
    About,
}

/// Log level used when `RUST_LOG` is unset.
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn render_lamps(lamps: [bool; 4]) -> String {
    OutputId::OUTPUTS
        .iter()
        .zip(lamps)
        .map(|(id, on)| format!("{id}:{}", if on { "on" } else { "off" }))
        .collect::<Vec<_>>()
        .join(" ")
}

async fn run(args: Args) -> anyhow::Result<()> {
    if matches!(args.command, Command::About) {
        println!("{}", panel::about());
        return Ok(());
    }

    let host = args
        .host
        .context("device address required (--host or NETIO_HOST)")?;

    let device = Device::http(host)
        .with_credentials(args.user, args.password)
        .with_timeout(Duration::from_millis(args.timeout_ms))
        .build()?;

    let mut control: ControlPanel<HttpClient> =
        ControlPanel::new().with_settle_delay(Duration::from_millis(args.settle_ms));
    let info = control.connect(device).await?.clone();

    match args.command {
        Command::Info => println!("{info}"),
        Command::Status => print!("{}", control.status_report().await?),
        Command::Set { output, action } => {
            let lamps = control.apply(output, action).await?;
            println!("{}", render_lamps(lamps));
        }
        Command::Press { button } => {
            let lamps = control.press(button).await?;
            println!("{}", render_lamps(lamps));
        }
        Command::About => println!("{}", panel::about()),
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<PanelError>() {
                Some(panel_err) => eprintln!("{}: {panel_err}", panel_err.title()),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
