use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use radish::output::Outputter;

/// A cloneable in-memory writer; every clone appends to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An outputter writing into two fresh buffers: `(outputter, info, error)`.
pub fn captured_outputter() -> (Arc<Outputter>, SharedBuffer, SharedBuffer) {
    let info = SharedBuffer::new();
    let error = SharedBuffer::new();
    let outputter = Outputter::with_writers(info.clone(), error.clone());
    (Arc::new(outputter), info, error)
}
