use log::info;
use std::collections::VecDeque;
use std::sync::Mutex;

const HISTORY_LIMIT: usize = 20;

/// Bounded record of recent host activity, mirrored to the log facade.
pub struct ActivityLog {
    entries: Mutex<VecDeque<String>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(HISTORY_LIMIT)),
        }
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() == HISTORY_LIMIT {
                entries.pop_front();
            }
            entries.push_back(message.to_string());
        }
    }

    /// Recent entries, oldest first.
    pub fn recent(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}
