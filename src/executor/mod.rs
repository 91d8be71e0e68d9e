use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    config::{Config, InputMode, UnderflowPolicy},
    input::{NoInput, Stdin},
    output::{IgnoreOutput, Output, Stdout},
    program::{Instruction, Program},
    tape::Tape,
};

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RunError {
    /// Only raised under [`UnderflowPolicy::Error`].
    #[error("instruction {ip} moved the data pointer {amount} cells left from cell {dp}")]
    TapeUnderflow { ip: usize, dp: usize, amount: usize },
    #[error("program did not finish within {limit} steps")]
    StepLimitExceeded { limit: u64 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Running,
    /// The data pointer was moved left of the first cell.
    Halted,
    /// The instruction pointer ran off the end of the program.
    Terminated,
}

#[derive(Clone, Debug)]
pub struct Executor<'a, I, O> {
    program: &'a Program,
    instruction_index: usize,
    tape: Tape,
    input: I,
    output: O,
    config: Config,
    state: State,
    steps: u64,
}

impl<'a, I, O> Executor<'a, I, O> {
    pub fn new(program: &'a Program, input: I, output: O) -> Self {
        Self {
            program,
            instruction_index: 0,
            tape: Tape::new(),
            input,
            output,
            config: Config::default(),
            state: if program.is_empty() {
                State::Terminated
            } else {
                State::Running
            },
            steps: 0,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state != State::Running
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_index
    }

    /// Number of instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Executes a single instruction and returns the state afterwards. Once execution has stopped
    /// this does nothing.
    pub fn step(&mut self) -> Result<State, RunError>
    where
        I: Iterator<Item = u8>,
        O: Output,
    {
        if self.state != State::Running {
            return Ok(self.state);
        }

        let ip = self.instruction_index;
        let Some(&current) = self.program.get(ip) else {
            self.state = State::Terminated;
            return Ok(self.state);
        };

        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                return Err(RunError::StepLimitExceeded { limit });
            }
        }
        self.steps += 1;

        match current {
            Instruction::MoveLeft(amount) => {
                if self.tape.shift_left(amount).is_err() {
                    self.state = State::Halted;
                    return match self.config.underflow {
                        UnderflowPolicy::Halt => Ok(self.state),
                        UnderflowPolicy::Error => Err(RunError::TapeUnderflow {
                            ip,
                            dp: self.tape.pointer(),
                            amount,
                        }),
                    };
                }
            }
            Instruction::MoveRight(amount) => self.tape.shift_right(amount),
            Instruction::Add(amount) => self.tape.add(amount),
            Instruction::Subtract(amount) => self.tape.subtract(amount),
            Instruction::Print => self.output.push(*self.tape),
            Instruction::Input => {
                if self.config.input == InputMode::Read {
                    // a prompt without a trailing newline must be visible before we block
                    self.output.flush();
                    if let Some(value) = self.input.next() {
                        *self.tape = value;
                    }
                }
            }
            Instruction::LoopStart => {
                if *self.tape == 0 {
                    self.instruction_index = self
                        .program
                        .loop_end(ip)
                        .expect("parsed programs map every loop start to its end");
                }
            }
            Instruction::LoopEnd => {
                if *self.tape != 0 {
                    self.instruction_index = self
                        .program
                        .loop_start(ip)
                        .expect("parsed programs map every loop end to its start");
                }
            }
            Instruction::ClearCell => *self.tape = 0,
        }

        // a taken jump lands one past its target
        self.instruction_index += 1;
        if self.instruction_index >= self.program.len() {
            self.state = State::Terminated;
        }

        Ok(self.state)
    }

    /// Runs this executor until the program finishes or halts.
    ///
    /// Halting on underflow under [`UnderflowPolicy::Halt`] returns `Ok(())` just like finishing
    /// does; check [`Executor::state`] to tell them apart.
    #[instrument(skip_all, fields(instructions = self.program.len()))]
    pub fn run(&mut self) -> Result<(), RunError>
    where
        I: Iterator<Item = u8>,
        O: Output,
    {
        while self.step()? == State::Running {}

        debug!(
            state = ?self.state,
            steps = self.steps,
            tape_len = self.tape.len(),
            "execution stopped"
        );
        Ok(())
    }
}

impl<'a> Executor<'a, Stdin, Stdout> {
    pub fn new_stdio(program: &'a Program) -> Self {
        Self::new(program, Stdin::new(), Stdout::new())
    }
}

impl<'a> Executor<'a, NoInput, IgnoreOutput> {
    pub fn new_without_io(program: &'a Program) -> Self {
        Self::new(program, NoInput::new(), IgnoreOutput)
    }
}
