//! Command-line argument parsing and help for dirpilot.
//!
//! When invoked with no args (dp), dirpilot simply launches the TUI in the current
//! working directory. The only flags are informational.

use crate::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    Exit,
    Fail,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

pub fn parse_args(args: &[String]) -> CliAction {
    let Some(first) = args.first() else {
        return CliAction::RunApp;
    };

    if args.len() > 1 {
        eprintln!("Error: dirpilot accepts at most one option.");
        eprintln!("Usage: dp [OPTION]");
        return CliAction::Fail;
    }

    match first.as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("dirpilot always starts in the current directory. Try --help.");
            CliAction::Fail
        }
    }
}

fn print_version() {
    println!("dirpilot {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"dirpilot - A small terminal directory browser

USAGE:
  dp              Browse the current working directory

OPTIONS:
  -h, --help      Print help information
  -v, --version   Display the current installed version of dirpilot

ENVIRONMENT:
  DIRPILOT_CONFIG     Override the default config path ({})
  DIRPILOT_LOG        Write a debug log to this file
  DIRPILOT_LOG_LEVEL  Log level for DIRPILOT_LOG (trace, debug, info, warn, error)
{}"#,
        Config::default_path().display(),
        KEYBINDS_TEXT
    );
}

const KEYBINDS_TEXT: &str = r##"
KEY BINDINGS (defaults, see [keys] in dirpilot.toml):
  quit        ["q"]
  up / down   ["Up"] / ["Down"]
  page_up     ["PageUp"]
  page_down   ["PageDown"]
  open        ["Enter", "Right"]   open directory, run script, view file
  parent      ["Backspace", "Left", "u"]
  delete      ["d"]                asks for confirmation
  rename      ["r"]                name or path, relative to the current directory
  copy        ["c"]                single files only, asks before overwriting
"##;
