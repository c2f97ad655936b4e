use std::sync::Mutex;

use tracing::info;

/// Router capability the widget hands link targets to. The widget never
/// navigates by itself.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

/// Logs every navigation request; used by the CLI where there is no router.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, target: &str) {
        info!(%target, "navigate");
    }
}

/// Keeps the requested targets in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    targets: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> Vec<String> {
        self.targets
            .lock()
            .map(|t| t.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) {
        let mut t = self
            .targets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        t.push(target.to_string());
    }
}
