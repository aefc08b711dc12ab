mod cli;
mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgMatches;

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();

    let code = match matches.subcommand() {
        Some(("run", m)) => commands::run::run(&file(m)),
        Some(("lex", m)) => commands::lex::run(&file(m)),
        Some(("parse", m)) => commands::parse::run(&file(m)),
        Some(("format", m)) => commands::format::run(&file(m), m.get_flag("write")),
        Some(("check", m)) => commands::check::run(&file(m)),
        _ => unreachable!("clap should have caught this"),
    };

    ExitCode::from(code)
}

fn file(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<PathBuf>("file")
        .cloned()
        .expect("FILE is a required argument")
}
