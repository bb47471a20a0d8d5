use i18n_catalog::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command line arguments and process the command
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
