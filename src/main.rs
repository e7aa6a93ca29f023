// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use quietretry::commands::arch::ArchCommand;
use quietretry::commands::config::ConfigCommand;
use quietretry::commands::file::{FileAction, FileCommand};
use quietretry::commands::split::SplitCommand;
use quietretry::commands::wait::WaitCommand;
use quietretry::config::new_quietretry_config;
use quietretry::error::{Result, format_error_chain, get_exit_code};
use quietretry::logging;
use quietretry::split::SplitOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quietretry")]
#[command(author, version, about = "Retrying system helpers", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the processor architecture
    Arch {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Split text on a literal separator
    Split {
        /// Text to split
        input: String,

        /// Separator, matched as plain text
        separator: String,

        /// Maximum number of parts (0 = unlimited)
        #[arg(long, value_name = "N")]
        max: Option<usize>,

        /// Match the separator ignoring case
        #[arg(short, long)]
        ignore_case: bool,

        /// Drop empty parts
        #[arg(long)]
        remove_empty: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Wait until a path exists
    Wait {
        path: PathBuf,

        /// Number of checks before giving up
        #[arg(long, value_name = "N")]
        attempts: Option<usize>,

        /// Delay between checks in milliseconds
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
    },

    /// Create an empty file, retrying on failure
    Touch { path: PathBuf },

    /// Remove a file, retrying on failure
    #[command(visible_alias = "rm")]
    Remove { path: PathBuf },

    /// Print the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match new_quietretry_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = match cli.command {
        Commands::Arch { json } => ArchCommand.execute(json),
        Commands::Split {
            input,
            separator,
            max,
            ignore_case,
            remove_empty,
            json,
        } => {
            let options = SplitOptions {
                max_parts: max,
                ignore_case,
                remove_empty,
            };
            SplitCommand.execute(&input, &separator, &options, json)
        }
        Commands::Wait {
            path,
            attempts,
            interval_ms,
        } => WaitCommand::new(&config).and_then(|command| command.execute(&path, attempts, interval_ms)),
        Commands::Touch { path } => {
            FileCommand::new(&config).and_then(|command| command.execute(FileAction::Create, &path))
        }
        Commands::Remove { path } => {
            FileCommand::new(&config).and_then(|command| command.execute(FileAction::Remove, &path))
        }
        Commands::Config => ConfigCommand::new(&config).and_then(|command| command.execute()),
    };

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }
}
