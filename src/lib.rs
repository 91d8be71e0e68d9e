//! A virtual machine for the eight-command byte-tape language.
//!
//! Source is compiled by [`program::parse`] into a run-length-encoded [`Program`] and then
//! interpreted by an [`Executor`] over a growable tape of wrapping byte cells.

pub mod config;
pub mod error;
pub mod executor;
pub mod input;
pub mod output;
pub mod program;
pub mod tape;

pub use config::{Config, InputMode, UnderflowPolicy};
pub use error::{Error, Result};
pub use executor::{Executor, RunError, State};
pub use program::{parse, CompileError, Instruction, Program};
pub use tape::Tape;

/// Compiles `source` and runs it with no input, returning everything it printed.
pub fn run_source(source: impl AsRef<[u8]>, config: Config) -> Result<Vec<u8>> {
    let program = Program::new(source)?;
    let mut executor =
        Executor::new(&program, input::NoInput::new(), Vec::new()).with_config(config);
    executor.run()?;
    Ok(executor.into_output())
}
