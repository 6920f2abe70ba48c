use std::process::ExitCode;

use gitlet::ui::output;

fn main() -> ExitCode {
    match gitlet::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
