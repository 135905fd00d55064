mod compare;

use std::process;

use anyhow::Result;
use clap::{error::ErrorKind, Parser};

use compare::CompareArgs;

/// Exit status for errors: bad arguments, unreadable files, invalid patterns.
const EXIT_TROUBLE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "dcmp",
    about = "Compare two files line by line",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[command(flatten)]
    args: CompareArgs,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(EXIT_TROUBLE),
            }
        }
    };

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("dcmp: {e}");
            process::exit(EXIT_TROUBLE);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    compare::run(&cli.args)
}
