//! Command-line definition for the `suru` binary.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("suru")
        .about("Toolchain for the Suru language")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Execute a source file's main function")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("lex")
                .about("Dump the token stream")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("parse")
                .about("Dump the parse tree")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("format")
                .about("Pretty-print a source file")
                .arg(file_arg())
                .arg(
                    Arg::new("write")
                        .long("write")
                        .action(ArgAction::SetTrue)
                        .help("Overwrite the file with the formatted output"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a source file and report syntax errors")
                .arg(file_arg()),
        )
}

/// Source file (positional).
fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Suru source file")
}
