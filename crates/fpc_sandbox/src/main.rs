mod app;

use std::process::ExitCode;

fn main() -> ExitCode {
    app::run_from_env()
}
