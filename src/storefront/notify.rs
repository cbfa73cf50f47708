//! Toast-style status messages that dismiss themselves.

use std::{
    collections::VecDeque,
    fmt,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use serde::{Deserialize, Serialize};

pub const DISPLAY_FOR: Duration = Duration::from_millis(2000);
pub const EXIT_TRANSITION: Duration = Duration::from_millis(200);
pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Error,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub phase: Phase,
}

#[derive(Debug, Default)]
struct Stack {
    next_id: u64,
    shown: VecDeque<Notification>,
}

/// Stack of live notifications. Each one is visible for [`DISPLAY_FOR`],
/// then spends [`EXIT_TRANSITION`] leaving, then disappears. When the stack
/// is full the oldest notification is evicted.
///
/// Timers run on the tokio runtime; `show` must be called from inside one.
#[derive(Debug, Clone)]
pub struct Notifier {
    stack: Arc<Mutex<Stack>>,
    capacity: usize,
    display_for: Duration,
    exit_transition: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `capacity` is clamped to at least 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Arc::new(Mutex::new(Stack::default())),
            capacity: capacity.max(1),
            display_for: DISPLAY_FOR,
            exit_transition: EXIT_TRANSITION,
        }
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Info)
    }

    /// Push a notification and schedule its removal. Returns its id.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let message = message.into();
        let id = {
            let mut stack = self.lock();
            let id = stack.next_id;
            stack.next_id += 1;
            while stack.shown.len() >= self.capacity {
                if let Some(evicted) = stack.shown.pop_front() {
                    tracing::debug!(id = evicted.id, "notification evicted");
                }
            }
            stack.shown.push_back(Notification {
                id,
                message: message.clone(),
                severity,
                phase: Phase::Visible,
            });
            id
        };

        match severity {
            Severity::Error => tracing::warn!(id, %severity, "{message}"),
            _ => tracing::info!(id, %severity, "{message}"),
        }

        let stack = Arc::clone(&self.stack);
        let display_for = self.display_for;
        let exit_transition = self.exit_transition;
        tokio::spawn(async move {
            tokio::time::sleep(display_for).await;
            {
                let mut stack = stack.lock().unwrap_or_else(PoisonError::into_inner);
                match stack.shown.iter_mut().find(|n| n.id == id) {
                    Some(n) => n.phase = Phase::Leaving,
                    None => return,
                }
            }
            tokio::time::sleep(exit_transition).await;
            let mut stack = stack.lock().unwrap_or_else(PoisonError::into_inner);
            stack.shown.retain(|n| n.id != id);
        });

        id
    }

    /// Notifications currently on screen, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.lock().shown.iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Stack> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
