//! In-app activity log
//!
//! A bounded ring of recent events shown in the console's activity panel.
//! Every entry is mirrored to `tracing`, so the terminal log and the panel
//! agree.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugLevel::Debug => write!(f, "DEBUG"),
            DebugLevel::Info => write!(f, "INFO"),
            DebugLevel::Warn => write!(f, "WARN"),
            DebugLevel::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugCategory {
    Network,
    Auth,
    Session,
    Routing,
    Ui,
}

impl DebugCategory {
    pub const ALL: [DebugCategory; 5] = [
        DebugCategory::Network,
        DebugCategory::Auth,
        DebugCategory::Session,
        DebugCategory::Routing,
        DebugCategory::Ui,
    ];
}

impl fmt::Display for DebugCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugCategory::Network => write!(f, "NET"),
            DebugCategory::Auth => write!(f, "AUTH"),
            DebugCategory::Session => write!(f, "SESSION"),
            DebugCategory::Routing => write!(f, "ROUTE"),
            DebugCategory::Ui => write!(f, "UI"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DebugEntry {
    pub timestamp: String,
    pub level: DebugLevel,
    pub category: DebugCategory,
    pub message: String,
}

impl fmt::Display for DebugEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} {}",
            self.timestamp, self.level, self.category, self.message
        )
    }
}

pub struct DebugLogger {
    entries: Arc<Mutex<VecDeque<DebugEntry>>>,
    max_entries: usize,
}

impl DebugLogger {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(max_entries))),
            max_entries,
        }
    }

    pub fn log(&self, level: DebugLevel, category: DebugCategory, message: impl Into<String>) {
        let entry = DebugEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
            level,
            category,
            message: message.into(),
        };

        match level {
            DebugLevel::Debug => tracing::debug!(category = %category, "{}", entry.message),
            DebugLevel::Info => tracing::info!(category = %category, "{}", entry.message),
            DebugLevel::Warn => tracing::warn!(category = %category, "{}", entry.message),
            DebugLevel::Error => tracing::error!(category = %category, "{}", entry.message),
        }

        if let Ok(mut entries) = self.entries.lock() {
            entries.push_back(entry);
            while entries.len() > self.max_entries {
                entries.pop_front();
            }
        }
    }

    pub fn debug(&self, category: DebugCategory, msg: impl Into<String>) {
        self.log(DebugLevel::Debug, category, msg);
    }

    pub fn info(&self, category: DebugCategory, msg: impl Into<String>) {
        self.log(DebugLevel::Info, category, msg);
    }

    pub fn warn(&self, category: DebugCategory, msg: impl Into<String>) {
        self.log(DebugLevel::Warn, category, msg);
    }

    pub fn error(&self, category: DebugCategory, msg: impl Into<String>) {
        self.log(DebugLevel::Error, category, msg);
    }

    pub fn get_entries(&self) -> Vec<DebugEntry> {
        self.entries
            .lock()
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get_entries_by_category(&self, category: DebugCategory) -> Vec<DebugEntry> {
        self.entries
            .lock()
            .map(|e| {
                e.iter()
                    .filter(|entry| entry.category == category)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn count_by_level(&self, level: DebugLevel) -> usize {
        self.entries
            .lock()
            .map(|e| e.iter().filter(|entry| entry.level == level).count())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn count(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }
}

impl Clone for DebugLogger {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            max_entries: self.max_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_is_bounded() {
        let logger = DebugLogger::new(3);
        for i in 0..5 {
            logger.info(DebugCategory::Network, format!("event {}", i));
        }
        let messages: Vec<String> = logger.get_entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["event 2", "event 3", "event 4"]);
    }

    #[test]
    fn test_filters() {
        let logger = DebugLogger::new(10);
        logger.info(DebugCategory::Auth, "signed in");
        logger.error(DebugCategory::Network, "refused");
        logger.warn(DebugCategory::Auth, "token unreadable");

        assert_eq!(logger.get_entries_by_category(DebugCategory::Auth).len(), 2);
        assert_eq!(logger.count_by_level(DebugLevel::Error), 1);

        let shared = logger.clone();
        shared.clear();
        assert_eq!(logger.count(), 0);
    }

    #[test]
    fn test_entry_display() {
        let entry = DebugEntry {
            timestamp: "10:00:00.000".to_string(),
            level: DebugLevel::Warn,
            category: DebugCategory::Session,
            message: "401 received".to_string(),
        };
        assert_eq!(entry.to_string(), "10:00:00.000 [WARN] SESSION 401 received");
    }
}
