use std::{cell::RefCell, io, rc::Rc};

/// An in-memory output sink for `echo`.
///
/// Clones share one buffer: hand a clone to
/// [`Interpreter::with_output`](crate::interpreter::evaluator::core::Interpreter::with_output)
/// and read the text back from the original.
///
/// # Example
/// ```
/// use std::io::Write;
///
/// use blast::interpreter::evaluator::output::OutputBuffer;
///
/// let buffer = OutputBuffer::new();
/// let mut sink = buffer.clone();
/// writeln!(sink, "hello").unwrap();
///
/// assert_eq!(buffer.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer(Rc<RefCell<Vec<u8>>>);

impl OutputBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, with invalid UTF-8 replaced.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl io::Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
