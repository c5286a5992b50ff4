//! In-memory storage for tasks and the agent directory
//!
//! One mutator, many readers: all mutation goes through store methods
//! holding the write lock, and readers get clones they cannot use to
//! mutate shared state.

pub mod registry;
pub mod task;

pub use registry::{AgentRegistration, AgentRegistry};
pub use task::{TaskFilter, TaskStore};
