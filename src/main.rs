use clap::Parser;
use ribbontrader::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
