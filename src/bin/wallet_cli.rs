use std::process::ExitCode;

fn main() -> ExitCode {
    wallet_core::init();
    match wallet_core::cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("wallet_cli: {err}");
            ExitCode::FAILURE
        }
    }
}
