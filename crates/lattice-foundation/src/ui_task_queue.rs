//! UI Task Queue
//!
//! Binds a `TaskQueue` to one execution context's UI thread. Worker and
//! IO threads call `register_task`; only the UI thread dispatches or
//! flushes.

use std::sync::{Arc, Mutex};

use crate::task_queue::{Task, TaskId, TaskQueue};

/// Execution-context handle identifying one UI-owning runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(pub i32);

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task queue permanently bound to one UI context.
///
/// The binding is fixed at creation and never re-bound.
pub struct UiTaskQueue {
    queue: Arc<TaskQueue>,
    context: ContextId,
}

impl UiTaskQueue {
    fn new(context: ContextId) -> Self {
        Self {
            queue: TaskQueue::new(),
            context,
        }
    }

    /// Context this queue is bound to.
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Register a task to run later on the UI thread. Safe from any
    /// thread; this is the sole cross-thread entry point of the core.
    pub fn register_task(&self, task: Task) -> TaskId {
        tracing::trace!("UI task registered for context {}", self.context);
        self.queue.register_task(task)
    }

    /// Run one pending task. UI thread only.
    pub fn dispatch_task(&self, id: TaskId) {
        self.queue.dispatch_task(id);
    }

    /// Run all pending tasks. UI thread only.
    pub fn flush_task(&self) {
        self.queue.flush_task();
    }

    /// Number of tasks currently pending.
    pub fn pending(&self) -> usize {
        self.queue.pending()
    }
}

/// Owner of the per-process UI queue binding.
///
/// Replaces an implicitly-initialized static singleton: construct one
/// at context setup, drop it at teardown. The first `instance` call
/// wins and fixes the context binding; later calls return the same
/// shared queue regardless of the context id they pass.
#[derive(Default)]
pub struct UiTaskRegistry {
    slot: Mutex<Option<Arc<UiTaskQueue>>>,
}

impl UiTaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the shared UI queue, creating and binding it on first call.
    pub fn instance(&self, context: ContextId) -> Arc<UiTaskQueue> {
        let mut slot = self.slot.lock().unwrap();
        match slot.as_ref() {
            Some(existing) => {
                if existing.context != context {
                    tracing::debug!(
                        "UI task queue already bound to context {}, ignoring context {}",
                        existing.context,
                        context
                    );
                }
                Arc::clone(existing)
            }
            None => {
                tracing::debug!("UI task queue bound to context {}", context);
                let queue = Arc::new(UiTaskQueue::new(context));
                *slot = Some(Arc::clone(&queue));
                queue
            }
        }
    }
}
