#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Moves the data pointer left by the given number of cells.
    MoveLeft(usize),
    /// Moves the data pointer right by the given number of cells. A run of `<` and `>` which
    /// cancels out still compiles to `MoveRight(0)`.
    MoveRight(usize),
    Add(usize),
    Subtract(usize),
    Print,
    Input,
    LoopStart,
    LoopEnd,
    /// Compiled from `[-]`.
    ClearCell,
}

impl Instruction {
    /// The merged run length of a counted instruction, or `0` for everything else.
    pub fn magnitude(self) -> usize {
        match self {
            Self::MoveLeft(n) | Self::MoveRight(n) | Self::Add(n) | Self::Subtract(n) => n,
            Self::Print
            | Self::Input
            | Self::LoopStart
            | Self::LoopEnd
            | Self::ClearCell => 0,
        }
    }
}
