use std::io;

use thiserror::Error;

use crate::{executor::RunError, program::CompileError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),
    #[error("runtime error: {0}")]
    Run(#[from] RunError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
