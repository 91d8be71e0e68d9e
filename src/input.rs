use std::io::{self, Read};

/// An input source which is always exhausted.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl NoInput {
    pub fn new() -> Self {
        Self
    }
}

impl Iterator for NoInput {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        None
    }
}

/// The bytes of standard input. A read error ends the input.
#[derive(Debug)]
pub struct Stdin(io::Bytes<io::Stdin>);

impl Default for Stdin {
    fn default() -> Self {
        Self::new()
    }
}

impl Stdin {
    pub fn new() -> Self {
        Self(io::stdin().bytes())
    }
}

impl Iterator for Stdin {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()?.ok()
    }
}
