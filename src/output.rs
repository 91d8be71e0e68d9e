use std::io::{self, BufWriter, Write};

use tracing::warn;

/// Receives one byte per executed `Print`, in program order.
pub trait Output {
    fn push(&mut self, value: u8);

    /// Makes everything pushed so far visible. Called before the program blocks on input.
    fn flush(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreOutput;

impl Output for IgnoreOutput {
    fn push(&mut self, _: u8) {}
}

impl Output for Vec<u8> {
    fn push(&mut self, value: u8) {
        Vec::push(self, value);
    }
}

impl<O: Output + ?Sized> Output for &mut O {
    fn push(&mut self, value: u8) {
        (**self).push(value);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}

/// Buffered output, flushed after every newline and whenever the program is about to read input.
///
/// Writing never fails from the executor's point of view. The first error is logged and kept,
/// later bytes are dropped, and [`Stdout::finish`] reports it.
#[derive(Debug)]
pub struct Stdout<W: Write = io::Stdout> {
    writer: BufWriter<W>,
    error: Option<io::Error>,
}

impl Default for Stdout {
    fn default() -> Self {
        Self::new()
    }
}

impl Stdout {
    pub fn new() -> Self {
        Self::from_writer(io::stdout())
    }
}

impl<W: Write> Stdout<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            error: None,
        }
    }

    /// Flushes anything still buffered and returns the first write error, if any.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer.flush()
    }

    fn write(&mut self, value: u8) -> io::Result<()> {
        self.writer.write_all(&[value])?;
        if value == b'\n' {
            self.writer.flush()?;
        }
        Ok(())
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(error) = result {
            warn!(%error, "failed to write output, dropping further output");
            self.error = Some(error);
        }
    }
}

impl<W: Write> Output for Stdout<W> {
    fn push(&mut self, value: u8) {
        if self.error.is_some() {
            return;
        }

        let result = self.write(value);
        self.record(result);
    }

    fn flush(&mut self) {
        if self.error.is_some() {
            return;
        }

        let result = self.writer.flush();
        self.record(result);
    }
}
