// MINI - Sectioned documents with inheritance and derived values
//
// Copyright (c) 2025 The MINI contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! MINI Command Line Interface

use clap::Parser;
use mini_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// MINI - sectioned documents with inheritance and derived values
///
/// # Examples
///
/// ```bash
/// # Check a file
/// mini validate units.mini
///
/// # Rewrite a file with every inherited value spelled out
/// mini resave units.mini units.full.mini
///
/// # Trace section construction
/// RUST_LOG=mini_core=debug mini show units.mini
/// ```
#[derive(Parser)]
#[command(name = "mini")]
#[command(author, version, about = "MINI - sectioned documents with inheritance and derived values", long_about = None)]
struct Cli {
    /// Log section construction and saves to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
