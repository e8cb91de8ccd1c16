/// Destination for translation anomaly reports.
///
/// The translator never fails outright; anything inconsistent in the input
/// (a start tag with no matching end tag, a report body of an unknown kind)
/// is reported here and the translation degrades to a best-effort result.
pub trait DiagnosticSink {
    fn warn(&mut self, message: &str);
}

/// Production sink: forwards warnings to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&mut self, message: &str) {
        tracing::warn!("[Translate] {}", message);
    }
}

/// Collects warnings in memory, for tests and for callers that want the
/// warning list back instead of log output.
#[derive(Debug, Default)]
pub struct VecSink {
    pub messages: Vec<String>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for VecSink {
    fn warn(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
