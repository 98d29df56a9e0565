/// Per-component logging handles
///
/// Components receive an explicit `ComponentLog` at construction instead of
/// sharing a process-global logger object. The handle carries the log target
/// and forwards to the `log` facade; the binary decides where records go.

use log::{log, Level};

/// A cheap, cloneable logging handle scoped to one component instance.
#[derive(Debug, Clone)]
pub struct ComponentLog {
    target: String,
}

impl ComponentLog {
    /// Create a handle emitting under the given log target.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// The log target this handle emits under.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn debug(&self, message: &str) {
        log!(target: self.target.as_str(), Level::Debug, "{}", message);
    }

    pub fn info(&self, message: &str) {
        log!(target: self.target.as_str(), Level::Info, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        log!(target: self.target.as_str(), Level::Warn, "{}", message);
    }

    pub fn error(&self, message: &str) {
        log!(target: self.target.as_str(), Level::Error, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_is_kept() {
        let log = ComponentLog::new("parser");
        assert_eq!(log.target(), "parser");
    }
}
