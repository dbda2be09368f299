//! Task Queue
//!
//! Thread-safe registry of pending tasks keyed by monotonically
//! increasing ids. Registration is safe from any thread; dispatch and
//! flush run pending tasks on the queue owner's thread, always outside
//! the lock.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// A deferred unit of work, invoked at most once.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Identifier of a registered task, unique within its queue's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

#[derive(Default)]
struct QueueState {
    pending: BTreeMap<TaskId, Task>,
    next_id: u64,
}

/// Thread-safe pending-task registry.
///
/// Shared behind `Arc` so registrants and the dispatching thread hold
/// the same queue. The mutex guards only the map; task closures run
/// after the lock is released, so a task may freely register or
/// dispatch further tasks.
pub struct TaskQueue {
    state: Mutex<QueueState>,
}

impl TaskQueue {
    /// Create a new shared queue.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(QueueState::default()),
        })
    }

    /// Register a task for later execution. Never blocks beyond lock
    /// contention; returns the id under which the task is pending.
    ///
    /// Ids are assigned in strict registration order starting at 0 and
    /// are never reused.
    pub fn register_task(&self, task: Task) -> TaskId {
        let mut state = self.state.lock().unwrap();
        let id = TaskId(state.next_id);
        state.next_id += 1;
        state.pending.insert(id, task);
        tracing::trace!("registered task {:?} ({} pending)", id, state.pending.len());
        id
    }

    /// Run and remove one pending task by id.
    ///
    /// Unknown ids are a silent no-op, so dispatching the same id twice
    /// is safe: the task runs exactly once.
    pub fn dispatch_task(&self, id: TaskId) {
        let task = {
            let mut state = self.state.lock().unwrap();
            state.pending.remove(&id)
        };
        if let Some(task) = task {
            task();
        }
    }

    /// Run and remove every currently pending task, in ascending id
    /// order.
    ///
    /// The pending set is taken as one atomic snapshot: tasks
    /// registered while the snapshot runs land in the next flush.
    pub fn flush_task(&self) {
        let taken = {
            let mut state = self.state.lock().unwrap();
            std::mem::take(&mut state.pending)
        };
        if !taken.is_empty() {
            tracing::trace!("flushing {} tasks", taken.len());
        }
        for (_, task) in taken {
            task();
        }
    }

    /// Number of tasks currently pending.
    pub fn pending(&self) -> usize {
        self.state.lock().unwrap().pending.len()
    }
}
