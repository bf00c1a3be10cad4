// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Kernup.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Kernup - entry point for the kernup binary

use clap::{ArgGroup, Parser};
use kernup::config::load_config;
use kernup::{commands, host, menu};

#[derive(Parser)]
#[command(
    name = "kernup",
    about = "Linux kernel management for Debian-based systems",
    disable_version_flag = true
)]
#[command(group(ArgGroup::new("command").args(["update", "list", "get", "clean", "version"])))]
struct Cli {
    /// Update to the latest RC kernel
    #[arg(short, long)]
    update: bool,

    /// List available kernels
    #[arg(short, long)]
    list: bool,

    /// Number of kernels to list (only with --list)
    #[arg(short, long, default_value_t = 5)]
    number: usize,

    /// Download the packages for a specific kernel version
    #[arg(short, long, value_name = "VERSION")]
    get: Option<String>,

    /// Remove old kernels via the cleanup script
    #[arg(short, long)]
    clean: bool,

    /// Report version and system information
    #[arg(short = 'v', long)]
    version: bool,
}

/// Every invocation resolves to exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Update,
    List { count: usize },
    Get { version: String },
    Clean,
    Version,
    Menu,
}

impl Cli {
    fn command(&self) -> Command {
        if self.update {
            Command::Update
        } else if self.list {
            Command::List { count: self.number }
        } else if let Some(ref version) = self.get {
            Command::Get {
                version: version.clone(),
            }
        } else if self.clean {
            Command::Clean
        } else if self.version {
            Command::Version
        } else {
            Command::Menu
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kernup=info".parse().unwrap()),
        )
        .init();

    if !host::is_debian_family() {
        eprintln!("This system is not a Debian-based system, exiting");
        std::process::exit(1);
    }

    let cli = Cli::parse();
    let config = load_config()?;

    match cli.command() {
        Command::Update => commands::update(&config).await?,
        Command::List { count } => commands::list(&config, count).await?,
        Command::Get { version } => commands::get(&config, &version).await?,
        Command::Clean => commands::clean(&config)?,
        Command::Version => commands::version_report()?,
        Command::Menu => menu::run(&config).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_resolve_to_commands() {
        let cli = Cli::try_parse_from(["kernup", "--update"]).unwrap();
        assert_eq!(cli.command(), Command::Update);

        let cli = Cli::try_parse_from(["kernup", "-l", "-n", "3"]).unwrap();
        assert_eq!(cli.command(), Command::List { count: 3 });

        let cli = Cli::try_parse_from(["kernup", "--get", "6.6-rc1"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Get {
                version: "6.6-rc1".to_string()
            }
        );

        let cli = Cli::try_parse_from(["kernup", "--clean"]).unwrap();
        assert_eq!(cli.command(), Command::Clean);

        let cli = Cli::try_parse_from(["kernup", "--version"]).unwrap();
        assert_eq!(cli.command(), Command::Version);
    }

    #[test]
    fn no_flags_opens_the_menu() {
        let cli = Cli::try_parse_from(["kernup"]).unwrap();
        assert_eq!(cli.command(), Command::Menu);
    }

    #[test]
    fn list_number_defaults_to_five() {
        let cli = Cli::try_parse_from(["kernup", "--list"]).unwrap();
        assert_eq!(cli.command(), Command::List { count: 5 });
    }

    #[test]
    fn commands_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["kernup", "--update", "--list"]).is_err());
        assert!(Cli::try_parse_from(["kernup", "--clean", "--get", "6.5"]).is_err());
    }
}
