use std::process::ExitCode;

fn main() -> ExitCode {
    match protocol_gen::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
