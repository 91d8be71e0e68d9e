use std::{fs, path::PathBuf, process};

use bf_vm::{error::Result, Config, Executor, InputMode, Program, UnderflowPolicy};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bf-vm")]
#[command(about = "Compile and run a program for the eight-command tape machine")]
struct Args {
    /// Path to the program source
    file: PathBuf,

    /// Let `,` read bytes from standard input instead of doing nothing
    #[arg(long)]
    read_input: bool,

    /// Fail instead of halting quietly when the data pointer moves left of the first cell
    #[arg(long)]
    strict_underflow: bool,

    /// Give up after executing this many instructions
    #[arg(long, value_name = "N")]
    step_limit: Option<u64>,

    /// Log compilation and execution details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config::new()
            .with_input(if self.read_input {
                InputMode::Read
            } else {
                InputMode::Ignore
            })
            .with_underflow(if self.strict_underflow {
                UnderflowPolicy::Error
            } else {
                UnderflowPolicy::Halt
            })
            .with_step_limit(self.step_limit)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "bf_vm=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let source = fs::read(&args.file)?;
    info!(path = %args.file.display(), bytes = source.len(), "loaded source");

    let program = Program::new(&source)?;
    let mut executor = Executor::new_stdio(&program).with_config(args.config());
    let result = executor.run();

    // flush whatever was printed before reporting a runtime error
    executor.into_output().finish()?;
    result?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
