//! typin CLI (made by FontLab https://www.fontlab.com/)

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueHint};

use typin_core::manage::FontManager;
use typin_core::output::{write_json_line, ErrorReport, FontListing, OperationReport};
use typin_core::platform::Platform;

pub mod server;

const USAGE: &str = "typin [activate|deactivate|list|serve] [font_path]";

/// CLI entrypoint for typin.
#[derive(Debug, Parser)]
#[command(
    name = "typin",
    about = "Per-user font install/uninstall (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Install a font for the current user
    Activate {
        /// Path to the font file
        #[arg(value_hint = ValueHint::FilePath)]
        font_path: PathBuf,
    },
    /// Uninstall a font for the current user
    Deactivate {
        /// Path to the font file
        #[arg(value_hint = ValueHint::FilePath)]
        font_path: PathBuf,
    },
    /// List font files installed in the user fonts directory
    List,
    /// Serve the font operations over HTTP
    Serve {
        /// Address to bind
        #[arg(long = "bind", default_value = "127.0.0.1:8787")]
        bind: String,
    },
    #[command(external_subcommand)]
    Unknown(Vec<OsString>),
}

/// Parse CLI args and execute the selected command.
///
/// Every outcome short of a stdout write failure is reported as a single
/// JSON line with exit status 0; operation failures ride inside the payload.
pub fn run() -> Result<()> {
    let stdout = io::stdout();
    let handle = stdout.lock();
    run_with(std::env::args_os(), handle)
}

fn run_with<I, T>(args: I, mut w: impl Write) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(());
        }
        Err(_) => {
            return write_json_line(&ErrorReport::with_usage("Missing command", USAGE), &mut w);
        }
    };

    match cli.command {
        Command::Activate { font_path } => {
            write_json_line(&report_from(manager().activate(&font_path)), &mut w)
        }
        Command::Deactivate { font_path } => {
            write_json_line(&report_from(manager().deactivate(&font_path)), &mut w)
        }
        Command::List => match manager().list() {
            Ok(fonts) => write_json_line(&FontListing { fonts }, &mut w),
            Err(err) => write_json_line(&ErrorReport::new(format!("{err:#}")), &mut w),
        },
        Command::Serve { bind } => server::serve_blocking(&bind),
        Command::Unknown(args) => {
            let name = args
                .first()
                .map(|a| a.to_string_lossy().into_owned())
                .unwrap_or_default();
            write_json_line(
                &ErrorReport::with_usage(format!("Unknown command: {name}"), USAGE),
                &mut w,
            )
        }
    }
}

fn manager() -> FontManager {
    FontManager::new(Platform::detect())
}

fn report_from(result: Result<()>) -> OperationReport {
    match result {
        Ok(()) => OperationReport::ok(),
        // `{:#}` keeps the context chain on one line.
        Err(err) => OperationReport::failed(format!("{err:#}")),
    }
}

#[cfg(test)]
pub(crate) static TEST_ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
