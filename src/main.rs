use std::env;
use std::process::ExitCode;

use minchess::cli;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("{}", cli::USAGE);
            ExitCode::FAILURE
        }
    }
}
