//! Execution settings. The defaults reproduce the reference machine: `,` does nothing, moving
//! left of the first cell quietly stops the program, and there is no step limit.

/// What `,` does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// `,` is a no-op and the input source is never read.
    #[default]
    Ignore,
    /// `,` stores the next input byte in the current cell. At end of input the cell is unchanged.
    Read,
}

/// What happens when the data pointer is moved left of the first cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnderflowPolicy {
    /// Stop the program as if it had finished normally.
    #[default]
    Halt,
    /// Stop the program with [`RunError::TapeUnderflow`](crate::executor::RunError::TapeUnderflow).
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub input: InputMode,
    pub underflow: UnderflowPolicy,
    /// Maximum number of instructions to execute before giving up.
    pub step_limit: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: InputMode) -> Self {
        self.input = input;
        self
    }

    pub fn with_underflow(mut self, underflow: UnderflowPolicy) -> Self {
        self.underflow = underflow;
        self
    }

    pub fn with_step_limit(mut self, step_limit: Option<u64>) -> Self {
        self.step_limit = step_limit;
        self
    }
}
