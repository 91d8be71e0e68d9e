use std::ops::{Deref, DerefMut};

use tracing::trace;

/// The data pointer was asked to move left of the first cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Underflow;

/// A zero-initialized row of byte cells which grows to the right on demand.
///
/// Dereferences to the cell under the data pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tape {
    data: Vec<u8>,
    index: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    pub fn new() -> Self {
        Self {
            data: vec![0],
            index: 0,
        }
    }

    /// Current data pointer.
    pub fn pointer(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; a tape holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn cells(&self) -> &[u8] {
        &self.data
    }

    /// Moves the data pointer `amount` cells left. On underflow the pointer is left where it was.
    pub fn shift_left(&mut self, amount: usize) -> Result<(), Underflow> {
        self.index = self.index.checked_sub(amount).ok_or(Underflow)?;
        Ok(())
    }

    /// Moves the data pointer `amount` cells right, growing the tape when the pointer leaves it.
    pub fn shift_right(&mut self, amount: usize) {
        self.index = self.index.saturating_add(amount);

        if self.index >= self.data.len() {
            // one spare cell past the pointer
            let new_len = self.index.saturating_add(2);
            trace!(from = self.data.len(), to = new_len, "growing tape");
            self.data.resize(new_len, 0);
        }
    }

    pub fn add(&mut self, amount: usize) {
        let cell = &mut **self;
        *cell = cell.wrapping_add(amount as u8);
    }

    pub fn subtract(&mut self, amount: usize) {
        let cell = &mut **self;
        *cell = cell.wrapping_sub(amount as u8);
    }
}

impl Deref for Tape {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.data[self.index]
    }
}

impl DerefMut for Tape {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data[self.index]
    }
}
