//! Recent panel activity: toggle audit trail and the AI queue
//!
//! Both are bounded, newest first, and live only in memory.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use shared::models::{AuditEntry, IntentRecord, Role, ToggleValue};
use shared::util::now_millis;

pub const AUDIT_CAPACITY: usize = 200;
pub const INTENT_QUEUE_CAPACITY: usize = 50;

#[derive(Clone)]
pub struct PanelActivity {
    inner: Arc<Inner>,
}

struct Inner {
    audit: Mutex<VecDeque<AuditEntry>>,
    intents: Mutex<VecDeque<IntentRecord>>,
    next_id: AtomicU64,
    extractions: AtomicU64,
    failures: AtomicU64,
}

/// Counters shown in the AI panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentStats {
    pub total: u64,
    pub failed: u64,
}

impl Default for PanelActivity {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelActivity {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                audit: Mutex::new(VecDeque::with_capacity(AUDIT_CAPACITY)),
                intents: Mutex::new(VecDeque::with_capacity(INTENT_QUEUE_CAPACITY)),
                next_id: AtomicU64::new(1),
                extractions: AtomicU64::new(0),
                failures: AtomicU64::new(0),
            }),
        }
    }

    fn next_id(&self) -> u64 {
        self.inner.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn record_toggle(
        &self,
        role: Role,
        key: &str,
        previous: ToggleValue,
        value: ToggleValue,
        at: i64,
    ) -> AuditEntry {
        let entry = AuditEntry {
            id: self.next_id(),
            timestamp: at,
            role,
            action: "toggle.set".to_string(),
            key: key.to_string(),
            previous,
            value,
        };
        push_bounded(&mut self.inner.audit.lock(), entry.clone(), AUDIT_CAPACITY);
        entry
    }

    pub fn record_intent(&self, input: &str, outcome: Result<&str, &str>) -> IntentRecord {
        self.inner.extractions.fetch_add(1, Ordering::Relaxed);
        let (reply, error) = match outcome {
            Ok(reply) => (Some(reply.to_string()), None),
            Err(error) => {
                self.inner.failures.fetch_add(1, Ordering::Relaxed);
                (None, Some(error.to_string()))
            }
        };
        let record = IntentRecord {
            id: self.next_id(),
            timestamp: now_millis(),
            input: input.to_string(),
            reply,
            error,
        };
        push_bounded(
            &mut self.inner.intents.lock(),
            record.clone(),
            INTENT_QUEUE_CAPACITY,
        );
        record
    }

    /// Newest first, at most `limit`
    pub fn audit(&self, limit: usize) -> Vec<AuditEntry> {
        self.inner.audit.lock().iter().take(limit).cloned().collect()
    }

    /// Newest first, at most `limit`
    pub fn intent_queue(&self, limit: usize) -> Vec<IntentRecord> {
        self.inner.intents.lock().iter().take(limit).cloned().collect()
    }

    pub fn intent_stats(&self) -> IntentStats {
        IntentStats {
            total: self.inner.extractions.load(Ordering::Relaxed),
            failed: self.inner.failures.load(Ordering::Relaxed),
        }
    }
}

fn push_bounded<T>(ring: &mut VecDeque<T>, item: T, capacity: usize) {
    ring.push_front(item);
    ring.truncate(capacity);
}
