//! Lattice Foundation - cross-thread task dispatch
//!
//! The only sanctioned channel by which non-UI threads trigger work on
//! the UI thread: tasks are registered from any thread and executed
//! when the UI thread dispatches or flushes its queue.

mod task_queue;
mod ui_task_queue;

pub use task_queue::{Task, TaskId, TaskQueue};
pub use ui_task_queue::{ContextId, UiTaskQueue, UiTaskRegistry};
