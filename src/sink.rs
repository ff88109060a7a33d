//! Where discovered primes go.
//!
//! A [`Sink`] is either count-only or bound to a writer that receives one
//! prime per line, in the order the sieve finds them (ascending). Output
//! trouble never stops a sieve: if the destination cannot be opened or a
//! write fails, the sink logs a warning, drops the writer and keeps the
//! error around for [`Sink::finish`] to hand back.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use crate::error::Error;

/// Destination for primes found by a sieve run.
pub struct Sink<'a> {
    out: Option<BufWriter<Box<dyn Write + 'a>>>,
    written: u64,
    warning: Option<Error>,
}

impl<'a> Sink<'a> {
    /// A sink that drops every prime. Only the count survives.
    pub fn count_only() -> Self {
        Self { out: None, written: 0, warning: None }
    }

    /// A sink that writes primes to `writer`, buffered.
    pub fn writer<W: Write + 'a>(writer: W) -> Self {
        Self {
            out: Some(BufWriter::new(Box::new(writer))),
            written: 0,
            warning: None,
        }
    }

    /// Whether primes are still being written anywhere.
    pub fn is_emitting(&self) -> bool {
        self.out.is_some()
    }

    /// Number of primes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    #[inline]
    pub(crate) fn emit(&mut self, prime: u64) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        match writeln!(out, "{prime}") {
            Ok(()) => self.written += 1,
            Err(error) => self.degrade(Error::SinkWrite(error, prime)),
        }
    }

    fn degrade(&mut self, error: Error) {
        tracing::warn!(%error, written = self.written, "output disabled, continuing count-only");
        self.out = None;
        self.warning.get_or_insert(error);
    }

    /// Flushes and closes the destination. Returns the first problem the
    /// sink ran into, if any.
    pub fn finish(mut self) -> Option<Error> {
        if let Some(mut out) = self.out.take() {
            if let Err(error) = out.flush() {
                self.degrade(Error::SinkFlush(error));
            }
        }
        self.warning
    }
}

impl Sink<'static> {
    /// Opens `path` for writing, truncating it. If the file cannot be
    /// created the sink falls back to count-only and remembers why.
    pub fn create(path: &Path) -> Self {
        match File::create(path) {
            Ok(file) => Self::writer(file),
            Err(error) => {
                let mut sink = Self::count_only();
                sink.degrade(Error::SinkOpen(path.to_path_buf(), error));
                sink
            }
        }
    }
}

impl std::fmt::Debug for Sink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("emitting", &self.is_emitting())
            .field("written", &self.written)
            .field("warning", &self.warning)
            .finish()
    }
}
