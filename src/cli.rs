/*
 * This file is part of Adaptive MIPI.
 *
 * Copyright (C) 2025 Adaptive MIPI contributors
 *
 * Adaptive MIPI is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Adaptive MIPI is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Adaptive MIPI. If not, see <https://www.gnu.org/licenses/>.
 */

//! Command Line Interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use am_core::constants::paths;
use am_core::RadioChannelDescriptor;
use am_protocol::{parse_hex, Request};

use crate::client::DaemonClient;
use crate::commands::{classify_name, decode_frame, parse_sensor_id, resolve_offline, ResolveOptions};

#[derive(Parser)]
#[command(name = "amctl")]
#[command(version)]
#[command(about = "Adaptive MIPI - RF channel aware camera MIPI clock selection")]
#[command(long_about = "Adaptive MIPI - RF channel aware camera MIPI clock selection

EXAMPLES:
    amctl decode \"10 00 AA BB 27 01 03 03 07 00 00 00 2C 01 00 00\"
    amctl resolve --sensor 0x08E3 --mode 0 --rat 3 --band 1 --channel 300
    amctl classify 0x0374
    amctl daemon ping
    amctl daemon override 12

ENVIRONMENT VARIABLES:
    RUST_LOG=debug         Enable debug logging")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Daemon socket path
    #[arg(long, global = true, default_value = paths::SOCKET_PATH)]
    pub socket: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a raw modem IPC frame given as hex
    Decode {
        /// Frame bytes, e.g. "10 00 AA BB 27 01 03 ..."
        hex: String,
    },

    /// Resolve the MIPI clock for a sensor and RF channel using the built-in tables
    Resolve(ResolveArgs),

    /// Show the camera type for a sensor id
    Classify {
        /// Sensor id (hex with 0x prefix, or decimal)
        #[arg(value_parser = parse_sensor_id)]
        sensor_id: u16,
    },

    /// Talk to a running adaptive-mipid
    #[command(subcommand)]
    Daemon(DaemonCommands),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Sensor id (hex with 0x prefix, or decimal)
    #[arg(long, value_parser = parse_sensor_id)]
    pub sensor: u16,

    /// Requested sensor mode (0-3 select tables A-D)
    #[arg(long, default_value_t = 0)]
    pub mode: u32,

    /// Radio access technology code
    #[arg(long)]
    pub rat: u8,

    #[arg(long)]
    pub band: u32,

    #[arg(long)]
    pub channel: u32,

    /// Engineering override (10+ forces setting index value - 10)
    #[arg(long = "override", default_value_t = 0, allow_hyphen_values = true)]
    pub adaptive_mipi_mode: i32,

    /// Behave like a factory build
    #[arg(long)]
    pub factory: bool,
}

#[derive(Subcommand)]
pub enum DaemonCommands {
    /// Check the daemon is alive
    Ping,
    /// Show the last RF channel the daemon received
    Rf,
    /// Push a raw modem frame (hex) into the daemon
    Notify { hex: String },
    /// Show or set the engineering clock override
    Override {
        #[arg(allow_hyphen_values = true)]
        value: Option<i32>,
    },
}

pub fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Decode { hex } => {
            let report = decode_frame(hex)?;
            if cli.json {
                return print_json(&report);
            }
            println!("main_cmd: {:#04x}, sub_cmd: {:#04x}", report.main_cmd, report.sub_cmd);
            println!("dev_id: {}, data_len: {}", report.dev_id, report.data_len);
            match report.channel {
                Some(channel) => println!("cp channel info: {}", channel),
                None => println!("not a CP channel info notification"),
            }
            Ok(())
        }
        Commands::Resolve(args) => {
            let report = resolve_offline(&ResolveOptions {
                sensor_id: args.sensor,
                mode: args.mode,
                rf: RadioChannelDescriptor::new(args.rat, args.band, args.channel),
                adaptive_mipi_mode: args.adaptive_mipi_mode,
                factory: args.factory,
            })?;
            if cli.json {
                return print_json(&report);
            }
            println!(
                "{} ({:#06x}) mode {} on {}: index {} ({})",
                report.camera_type,
                report.sensor_id,
                report.mode,
                report.rf,
                report.setting_index,
                report.label
            );
            Ok(())
        }
        Commands::Classify { sensor_id } => {
            let name = classify_name(*sensor_id);
            if cli.json {
                return print_json(&serde_json::json!({ "sensor_id": sensor_id, "camera_type": name }));
            }
            println!("{:#06x}: {}", sensor_id, name);
            Ok(())
        }
        Commands::Daemon(sub) => cmd_daemon(cli, sub),
    }
}

fn cmd_daemon(cli: &Cli, sub: &DaemonCommands) -> anyhow::Result<()> {
    debug!("connecting to {}", cli.socket.display());
    let mut client = DaemonClient::connect(&cli.socket)?;

    match sub {
        DaemonCommands::Ping => {
            let data = client.request_data(Request::Ping)?;
            println!("{}", data.value.unwrap_or_default());
        }
        DaemonCommands::Rf => {
            let data = client.request_data(Request::GetRfInfo)?;
            let rf = data.rf_info.unwrap_or_default();
            if cli.json {
                return print_json(&rf);
            }
            println!("rf channel: {}", rf);
        }
        DaemonCommands::Notify { hex } => {
            // Validate locally so malformed dumps never reach the daemon
            parse_hex(hex)?;
            let data = client.request_data(Request::NotifyFrame { hex: hex.clone() })?;
            println!("handled: {}", data.handled.unwrap_or(false));
        }
        DaemonCommands::Override { value } => {
            let request = match value {
                Some(v) => Request::SetOverride { value: *v },
                None => Request::GetOverride,
            };
            let data = client.request_data(request)?;
            println!("adaptive_mipi_mode: {}", data.override_mode.unwrap_or_default());
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
