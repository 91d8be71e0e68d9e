use std::{collections::HashMap, str::FromStr};

use thiserror::Error;
use tracing::debug;

use crate::program::{Instruction, Program};

/// A bracket without a partner. `offset` is the byte offset of the offending bracket in the
/// source.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("`[` at byte {offset} found without corresponding `]`")]
    UnmatchedLoopStart { offset: usize },
    #[error("`]` at byte {offset} found without corresponding `[`")]
    UnmatchedLoopEnd { offset: usize },
}

/// Compiles source bytes into a [`Program`].
///
/// Adjacent `<`/`>` and `+`/`-` bytes are folded into a single instruction carrying their net
/// count, `[-]` becomes [`Instruction::ClearCell`], and every other bracket pair is recorded in the
/// jump table. Bytes outside the eight commands are ignored.
pub fn parse(source: &[u8]) -> Result<Program, CompileError> {
    let mut output = Vec::new();
    let mut loop_start_to_end = HashMap::new();
    let mut loop_end_to_start = HashMap::new();
    // (instruction index, source offset) of each open `[`
    let mut loop_starts: Vec<(usize, usize)> = Vec::new();

    let mut index = 0;
    while index < source.len() {
        let byte = source[index];

        match byte {
            b'<' | b'>' => {
                let (net, end) = fold_run(source, index, b'>', b'<');
                index = end;
                output.push(if net < 0 {
                    Instruction::MoveLeft(net.unsigned_abs())
                } else {
                    Instruction::MoveRight(net.unsigned_abs())
                });
                continue;
            }
            b'+' | b'-' => {
                let (net, end) = fold_run(source, index, b'+', b'-');
                index = end;
                output.push(if net < 0 {
                    Instruction::Subtract(net.unsigned_abs())
                } else {
                    Instruction::Add(net.unsigned_abs())
                });
                continue;
            }
            b'.' => output.push(Instruction::Print),
            b',' => output.push(Instruction::Input),
            b'[' => {
                if source.get(index + 1..index + 3) == Some(&b"-]"[..]) {
                    output.push(Instruction::ClearCell);
                    index += 3;
                    continue;
                }
                loop_starts.push((output.len(), index));
                output.push(Instruction::LoopStart);
            }
            b']' => {
                let Some((loop_start, _)) = loop_starts.pop() else {
                    return Err(CompileError::UnmatchedLoopEnd { offset: index });
                };
                let loop_end = output.len();
                loop_start_to_end.insert(loop_start, loop_end);
                loop_end_to_start.insert(loop_end, loop_start);
                output.push(Instruction::LoopEnd);
            }
            _ => {}
        }

        index += 1;
    }

    if let Some(&(_, offset)) = loop_starts.last() {
        return Err(CompileError::UnmatchedLoopStart { offset });
    }

    debug!(
        instructions = output.len(),
        loops = loop_start_to_end.len(),
        source_len = source.len(),
        "compiled program"
    );

    Ok(Program {
        data: output,
        loop_start_to_end,
        loop_end_to_start,
    })
}

/// Sums a maximal run of `up`/`down` bytes starting at `start`, returning the net count and the
/// index just past the run.
fn fold_run(source: &[u8], start: usize, up: u8, down: u8) -> (isize, usize) {
    let mut net: isize = 0;
    let mut index = start;

    while let Some(&byte) = source.get(index) {
        if byte == up {
            net += 1;
        } else if byte == down {
            net -= 1;
        } else {
            break;
        }
        index += 1;
    }

    (net, index)
}

impl Program {
    pub fn new(source: impl AsRef<[u8]>) -> Result<Self, CompileError> {
        parse(source.as_ref())
    }
}

impl FromStr for Program {
    type Err = CompileError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        parse(source.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::*;

    #[test]
    fn folds_pointer_runs_by_net_direction() {
        assert_eq!(*Program::new("<<>").unwrap(), [MoveLeft(1)]);
        assert_eq!(*Program::new(">>>").unwrap(), [MoveRight(3)]);
        assert_eq!(*Program::new("<><>").unwrap(), [MoveRight(0)]);
    }

    #[test]
    fn folds_arithmetic_runs_by_net_direction() {
        assert_eq!(*Program::new("+-+").unwrap(), [Add(1)]);
        assert_eq!(*Program::new("---+").unwrap(), [Subtract(2)]);
        assert_eq!(*Program::new("+-").unwrap(), [Add(0)]);
    }

    #[test]
    fn comments_split_runs() {
        assert_eq!(*Program::new("++ ++").unwrap(), [Add(2), Add(2)]);
        assert_eq!(
            *Program::new("hello > world .").unwrap(),
            [MoveRight(1), Print]
        );
    }

    #[test]
    fn runs_of_different_families_stay_separate() {
        assert_eq!(
            *Program::new("++>>--<").unwrap(),
            [Add(2), MoveRight(2), Subtract(2), MoveLeft(1)]
        );
    }

    #[test]
    fn clear_cell_idiom_is_rewritten() {
        let program = Program::new("[-]").unwrap();
        assert_eq!(*program, [ClearCell]);
        assert!(program.loop_start_to_end().is_empty());
        assert!(program.loop_end_to_start().is_empty());
    }

    #[test]
    fn clear_cell_inside_loop() {
        let program = Program::new("+[>[-]<-]").unwrap();
        assert_eq!(
            *program,
            [
                Add(1),
                LoopStart,
                MoveRight(1),
                ClearCell,
                MoveLeft(1),
                Subtract(1),
                LoopEnd
            ]
        );
        assert_eq!(program.loop_end(1), Some(6));
        assert_eq!(program.loop_start(6), Some(1));
        assert_eq!(program.loop_count(), 1);
    }

    #[test]
    fn similar_idioms_are_not_rewritten() {
        assert_eq!(
            *Program::new("[+]").unwrap(),
            [LoopStart, Add(1), LoopEnd]
        );
        assert_eq!(
            *Program::new("[--]").unwrap(),
            [LoopStart, Subtract(2), LoopEnd]
        );
        // the peek looks at raw bytes, so a comment in between defeats it
        assert_eq!(
            *Program::new("[ -]").unwrap(),
            [LoopStart, Subtract(1), LoopEnd]
        );
    }

    #[test]
    fn nested_loops_match_innermost_first() {
        let program = Program::new("[[][]]").unwrap();
        assert_eq!(program.loop_end(0), Some(5));
        assert_eq!(program.loop_end(1), Some(2));
        assert_eq!(program.loop_end(3), Some(4));

        for (&end, &start) in program.loop_end_to_start() {
            assert_eq!(program.loop_start_to_end()[&start], end);
        }
        for (&start, &end) in program.loop_start_to_end() {
            assert_eq!(program.loop_end_to_start()[&end], start);
        }
    }

    #[test]
    fn unmatched_loop_end_is_an_error() {
        assert_eq!(
            Program::new("+]").unwrap_err(),
            CompileError::UnmatchedLoopEnd { offset: 1 }
        );
        assert_eq!(
            Program::new("[]]").unwrap_err(),
            CompileError::UnmatchedLoopEnd { offset: 2 }
        );
    }

    #[test]
    fn unmatched_loop_start_is_an_error() {
        assert_eq!(
            Program::new("[[]").unwrap_err(),
            CompileError::UnmatchedLoopStart { offset: 0 }
        );
        assert_eq!(
            Program::new("[ [").unwrap_err(),
            CompileError::UnmatchedLoopStart { offset: 2 }
        );
    }

    #[test]
    fn truncated_idiom_at_end_of_input() {
        assert_eq!(
            Program::new("[-").unwrap_err(),
            CompileError::UnmatchedLoopStart { offset: 0 }
        );
        assert_eq!(
            Program::new("[").unwrap_err(),
            CompileError::UnmatchedLoopStart { offset: 0 }
        );
    }

    #[test]
    fn empty_source_compiles_to_empty_program() {
        let program: Program = "no commands here".parse().unwrap();
        assert!(program.is_empty());
    }
}
