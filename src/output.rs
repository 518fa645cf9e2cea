// src/output.rs

//! Output sink for command output and run reports.
//!
//! An [`Outputter`] has two channels, `info` and `error`. Each channel is an
//! [`OutputStream`] that fans every write out to its registered
//! destinations (process stdout/stderr, log files, in-memory buffers in
//! tests).

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use crate::errors::{RadishError, Result};

type Destination = Box<dyn Write + Send>;

/// One logical output channel backed by zero or more writers.
///
/// A `write` holds the channel lock for the whole fan-out, so text from one
/// call is never interleaved with text from a concurrent call.
pub struct OutputStream {
    name: &'static str,
    destinations: Mutex<Vec<Destination>>,
}

impl fmt::Debug for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputStream")
            .field("name", &self.name)
            .field("destinations", &self.len())
            .finish()
    }
}

impl OutputStream {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            destinations: Mutex::new(Vec::new()),
        }
    }

    pub fn add(&self, writer: impl Write + Send + 'static) {
        self.lock().push(Box::new(writer));
    }

    /// Register a destination by name.
    ///
    /// Accepts `"stdout"` (or `"-"`), `"stderr"`, or a file path which is
    /// opened for appending and created if missing. Anything that cannot be
    /// opened for writing is rejected here, not at the first write.
    pub fn add_destination(&self, dest: &str) -> Result<()> {
        match dest {
            "" => Err(RadishError::InvalidStream(
                "empty destination name: expected \"stdout\", \"-\", \"stderr\" or a file path"
                    .to_string(),
            )),
            "stdout" | "-" => {
                self.add(io::stdout());
                Ok(())
            }
            "stderr" => {
                self.add(io::stderr());
                Ok(())
            }
            path => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        RadishError::InvalidStream(format!(
                            "file destination \"{path}\" is not writable: {e}"
                        ))
                    })?;
                self.add(file);
                Ok(())
            }
        }
    }

    /// Write `text` to every destination. A no-op with no destinations.
    pub fn write(&self, text: &str) {
        let mut destinations = self.lock();
        for (i, dest) in destinations.iter_mut().enumerate() {
            if let Err(e) = dest.write_all(text.as_bytes()).and_then(|_| dest.flush()) {
                warn!(stream = self.name, destination = i, error = %e, "failed to write output");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Destination>> {
        self.destinations.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// The pair of channels every component writes through.
#[derive(Debug)]
pub struct Outputter {
    pub info: OutputStream,
    pub error: OutputStream,
}

impl Default for Outputter {
    fn default() -> Self {
        Self::new()
    }
}

impl Outputter {
    /// An outputter with no destinations; writes are discarded.
    pub fn new() -> Self {
        Self {
            info: OutputStream::new("info"),
            error: OutputStream::new("error"),
        }
    }

    /// `info` to the process stdout, `error` to the process stderr.
    pub fn stdio() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }

    pub fn with_writers(
        info: impl Write + Send + 'static,
        error: impl Write + Send + 'static,
    ) -> Self {
        let out = Self::new();
        out.info.add(info);
        out.error.add(error);
        out
    }
}
