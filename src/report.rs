use std::io::Write;

/// Writes one-line diagnostics of the form `"<operation> error: <message>"`.
pub struct ErrorReporter<W: Write> {
    sink: W,
}

impl ErrorReporter<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> ErrorReporter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn report(&mut self, operation: &str, message: &str) {
        tracing::debug!(operation, message, "reporting backend failure");
        // Nothing sensible to do if the diagnostic stream itself is gone.
        let _ = writeln!(self.sink, "{operation} error: {message}");
        let _ = self.sink.flush();
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
