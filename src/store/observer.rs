//! Change notification for store subscribers.

use std::sync::{Arc, Mutex};

/// A state transition of the graph store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    /// A new graph was installed.
    GraphReplaced,
    /// The graph was removed.
    GraphCleared,
    SelectionChanged,
    HoverChanged,
    SearchChanged,
    NodeTypesChanged,
    EdgeTypesChanged,
    /// The annotation of a node (by id) changed.
    AnnotationChanged(String),
}

impl StoreChange {
    /// Whether this change alters the filtered views.
    pub fn affects_filter(&self) -> bool {
        matches!(
            self,
            StoreChange::GraphReplaced
                | StoreChange::GraphCleared
                | StoreChange::SearchChanged
                | StoreChange::NodeTypesChanged
                | StoreChange::EdgeTypesChanged
        )
    }
}

/// Receives store changes synchronously, right after each mutation.
///
/// Observers run on the mutating thread and must not call back into the store.
pub trait StoreObserver: Send + Sync {
    fn on_change(&self, change: &StoreChange);
}

/// Handle returned by `GraphStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Observer that queues changes until drained.
///
/// Clones share the same queue: keep one clone in the store, drain the other.
#[derive(Debug, Clone, Default)]
pub struct ChangeRecorder {
    queue: Arc<Mutex<Vec<StoreChange>>>,
}

impl ChangeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued change, oldest first.
    pub fn drain(&self) -> Vec<StoreChange> {
        match self.queue.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().map(|q| q.is_empty()).unwrap_or(true)
    }
}

impl StoreObserver for ChangeRecorder {
    fn on_change(&self, change: &StoreChange) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(change.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_shares_queue() {
        let recorder = ChangeRecorder::new();
        let handle = recorder.clone();
        recorder.on_change(&StoreChange::HoverChanged);
        recorder.on_change(&StoreChange::SearchChanged);
        assert_eq!(
            handle.drain(),
            vec![StoreChange::HoverChanged, StoreChange::SearchChanged]
        );
        assert!(handle.is_empty());
    }

    #[test]
    fn test_affects_filter() {
        assert!(StoreChange::SearchChanged.affects_filter());
        assert!(!StoreChange::SelectionChanged.affects_filter());
        assert!(!StoreChange::AnnotationChanged("n".into()).affects_filter());
    }
}
