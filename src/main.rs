use std::process::ExitCode;

use batch_mover::BatchMoverError;
use batch_mover::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = batch_mover::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            let code = e
                .downcast_ref::<BatchMoverError>()
                .map(BatchMoverError::code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}
