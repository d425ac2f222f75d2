use std::process::ExitCode;

fn main() -> ExitCode {
    match tyo_directory::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(tyo_directory::exit_code(&err))
        }
    }
}
