use std::process::ExitCode;
use talec::cli;

fn main() -> ExitCode {
    cli::run()
}
