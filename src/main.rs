// treenotes/src/main.rs

use std::process::ExitCode;

use treenotes::commands;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match commands::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("treenotes: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
