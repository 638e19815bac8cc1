mod ast;
mod error;
mod evaluator;
mod lexer;
mod parser;
mod repl;
mod runner;
mod value;

use clap::{Arg, Command};
use runner::Mode;
use std::fs;
use std::path::Path;

fn main() {
    let matches = Command::new("kea")
        .about("A C-like expression language interpreter with rich error diagnostics")
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the parsed program instead of evaluating it")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token stream instead of evaluating it")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let mode = if matches.get_flag("tokens") {
        Mode::PrintTokens
    } else if matches.get_flag("ast") {
        Mode::PrintAst
    } else {
        Mode::Evaluate
    };

    if let Some(file_path) = matches.get_one::<String>("file") {
        run_file(file_path, mode);
    } else if matches.get_flag("interactive") || matches.get_one::<String>("file").is_none() {
        repl::start(mode);
    }
}

fn run_file(file_path: &str, mode: Mode) {
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        std::process::exit(1);
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            runner::run(&source, Some(file_path), mode);
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
