use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cpu_sched_sim::{Args, Error, Input, Sim, sim::report};
use env_logger::{Builder, Target};

fn main() -> ExitCode {
    let args = Args::parse();
    // stdout carries only the report
    Builder::new()
        .filter_level(args.log_level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .target(Target::Stderr)
        .init();

    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let message = match err.downcast_ref::<Error>() {
                Some(err) => report::render_failure(err),
                None => format!("\nError in function main\n\t {err:#}\nThe program will terminate.\n\n"),
            };
            print!("{message}");
            ExitCode::FAILURE
        }
    }
}

// Results are rendered in full before anything reaches stdout
fn run(args: &Args) -> Result<String> {
    let path = args.input.as_deref().ok_or(Error::MissingInput)?;
    let input = Input::from_path(path)?;
    let reports = Sim::new(input).run_all();
    Ok(report::render(&reports))
}
