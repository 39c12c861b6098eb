use tracing::{debug, warn};

/// Accumulator threaded through the decision path.
///
/// Live rolls use a silent accumulator and only emit tracing events; explain
/// queries collect the same messages for display.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Option<Vec<String>>,
}

impl Diagnostics {
    pub fn silent() -> Self {
        Self { entries: None }
    }

    pub fn collecting() -> Self {
        Self {
            entries: Some(Vec::new()),
        }
    }

    pub fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(target: "loot_arbiter::diagnostics", "{message}");
        self.push(message);
    }

    /// Same as [`note`](Self::note) but always surfaces in the log.
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(target: "loot_arbiter::diagnostics", "{message}");
        self.push(message);
    }

    pub fn entries(&self) -> &[String] {
        self.entries.as_deref().unwrap_or_default()
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries.unwrap_or_default()
    }

    fn push(&mut self, message: String) {
        if let Some(entries) = self.entries.as_mut() {
            entries.push(message);
        }
    }
}
