use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::EditorError;

/// An action control (button) that disables itself while its operation is
/// pending. Clones share state, so a UI can observe it mid-operation.
#[derive(Debug, Clone)]
pub struct Trigger {
    action: &'static str,
    enabled: Arc<AtomicBool>,
}

impl Trigger {
    pub fn new(action: &'static str) -> Self {
        Self {
            action,
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    #[allow(dead_code)]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Disables the trigger until the returned guard is dropped.
    pub fn engage(&self) -> Result<TriggerGuard, EditorError> {
        if self.enabled.swap(false, Ordering::SeqCst) {
            Ok(TriggerGuard {
                enabled: Arc::clone(&self.enabled),
            })
        } else {
            Err(EditorError::Busy(self.action))
        }
    }
}

/// Re-enables its trigger on every exit path.
#[derive(Debug)]
pub struct TriggerGuard {
    enabled: Arc<AtomicBool>,
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        self.enabled.store(true, Ordering::SeqCst);
    }
}
