// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Interactive menu loop

use crate::commands;
use crate::config::Config;
use crate::error::Result;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Update,
    List,
    Get,
    Clean,
    Version,
    Exit,
}

fn parse_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Update),
        "2" => Some(MenuChoice::List),
        "3" => Some(MenuChoice::Get),
        "4" => Some(MenuChoice::Clean),
        "5" => Some(MenuChoice::Version),
        "6" | "q" | "e" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Run the menu until the user exits.
pub async fn run(config: &Config) -> Result<()> {
    loop {
        clear_screen();
        print_menu();

        print!("\n{} ", "Enter your choice (1-6/q/e):".cyan());
        std::io::stdout().flush()?;
        let Some(line) = read_line()? else {
            break; // EOF
        };

        let Some(choice) = parse_choice(&line) else {
            println!(
                "{}",
                "Invalid choice. Please enter a number between 1 and 6.".red()
            );
            pause()?;
            continue;
        };

        match choice {
            MenuChoice::Update => {
                println!("\n{}", "Updating to the latest RC kernel...".cyan());
                report(commands::update(config).await);
                pause()?;
            }
            MenuChoice::List => {
                println!("\n{}", "Listing available RC kernels...".cyan());
                report(commands::list(config, config.list_count).await);
                pause()?;
            }
            MenuChoice::Get => {
                print!("{} ", "Enter the kernel version to get:".yellow());
                std::io::stdout().flush()?;
                let Some(version) = read_line()? else {
                    break;
                };
                let version = version.trim().to_string();
                if version.is_empty() {
                    continue;
                }
                println!("\n{}", "Getting a specific RC kernel...".cyan());
                report(commands::get(config, &version).await);
                pause()?;
            }
            MenuChoice::Clean => {
                println!("\n{}", "Cleaning up old kernels...".cyan());
                report(commands::clean(config));
                pause()?;
            }
            MenuChoice::Version => {
                println!("\n{}", "Displaying version information...".cyan());
                report(commands::version_report());
                pause()?;
            }
            MenuChoice::Exit => {
                println!("\n{}", "Exiting...".red());
                break;
            }
        }
    }
    Ok(())
}

fn print_menu() {
    println!("\n{}\n", " Linux Kernel Management ".yellow().on_blue().bold());
    println!("  {}     Update to the latest RC kernel", "1.".green());
    println!("  {}     List available RC kernels", "2.".green());
    println!("  {}     Get a specific RC kernel", "3.".green());
    println!("  {}     Cleanup: remove old kernels", "4.".green());
    println!("  {}     Report version information", "5.".green());
    println!("  {} Exit", "6/q/e.".red());
}

/// Command failures are shown, not fatal; the menu keeps running.
fn report(result: Result<()>) {
    if let Err(e) = result {
        println!("{}", format!("Error: {e}").red());
    }
}

fn pause() -> Result<()> {
    print!("\n{}", "Press Enter to continue...".green());
    std::io::stdout().flush()?;
    let _ = read_line()?;
    Ok(())
}

fn clear_screen() {
    let _ = execute!(std::io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

/// None on EOF.
fn read_line() -> Result<Option<String>> {
    let mut line = String::new();
    let read = std::io::stdin().read_line(&mut line)?;
    if read == 0 { Ok(None) } else { Ok(Some(line)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_choices_map_to_entries() {
        assert_eq!(parse_choice("1"), Some(MenuChoice::Update));
        assert_eq!(parse_choice("2"), Some(MenuChoice::List));
        assert_eq!(parse_choice("3"), Some(MenuChoice::Get));
        assert_eq!(parse_choice("4"), Some(MenuChoice::Clean));
        assert_eq!(parse_choice("5"), Some(MenuChoice::Version));
        assert_eq!(parse_choice("6"), Some(MenuChoice::Exit));
    }

    #[test]
    fn letter_aliases_exit() {
        assert_eq!(parse_choice("q"), Some(MenuChoice::Exit));
        assert_eq!(parse_choice("e"), Some(MenuChoice::Exit));
    }

    #[test]
    fn whitespace_is_tolerated() {
        assert_eq!(parse_choice(" 2 \n"), Some(MenuChoice::List));
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        assert_eq!(parse_choice("7"), None);
        assert_eq!(parse_choice("x"), None);
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("12"), None);
    }
}
