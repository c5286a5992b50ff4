//! In-memory task store with lifecycle enforcement

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    protocol::{A2AError, A2AResult, Artifact, Message, Task, TaskState, TaskStatus},
    stream::ArtifactAssembler,
};

/// In-memory task store
///
/// Holds every task together with its per-task artifact assembler. The
/// store is the single writer for task status and history; callers only
/// submit tasks and append input messages through it, and reads return
/// detached clones.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: RwLock<HashMap<String, TaskEntry>>,
}

#[derive(Debug)]
struct TaskEntry {
    task: Task,
    assembler: ArtifactAssembler,
}

/// Filter for listing tasks
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Only tasks belonging to this session
    pub session_id: Option<String>,

    /// Only tasks currently in this state
    pub state: Option<TaskState>,
}

impl TaskFilter {
    /// Match every task
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one session
    pub fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Restrict to one state
    pub fn state(mut self, state: TaskState) -> Self {
        self.state = Some(state);
        self
    }

    fn matches(&self, task: &Task) -> bool {
        if let Some(session_id) = &self.session_id {
            if &task.session_id != session_id {
                return false;
            }
        }
        if let Some(state) = self.state {
            if task.status.state != state {
                return false;
            }
        }
        true
    }
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a new task with a store-issued id
    ///
    /// The task starts in `submitted` with the initial message as the
    /// first history entry.
    pub async fn submit(
        &self,
        session_id: impl Into<String>,
        message: Message,
    ) -> A2AResult<Task> {
        self.submit_with_id(Uuid::now_v7().to_string(), session_id, message)
            .await
    }

    /// Submit a new task under a caller-issued id
    ///
    /// Rejects an id that is already in use.
    pub async fn submit_with_id(
        &self,
        id: impl Into<String>,
        session_id: impl Into<String>,
        message: Message,
    ) -> A2AResult<Task> {
        message.validate()?;

        let id = id.into();
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&id) {
            return Err(A2AError::Validation(format!("task id already in use: {id}")));
        }

        let mut task = Task::new(id.clone(), session_id);
        task.history = Some(vec![message]);

        tracing::debug!(task_id = %id, session_id = %task.session_id, "task submitted");
        tasks.insert(
            id,
            TaskEntry {
                task: task.clone(),
                assembler: ArtifactAssembler::new(),
            },
        );
        Ok(task)
    }

    /// Fetch a task by id
    pub async fn get(&self, task_id: &str) -> A2AResult<Task> {
        let tasks = self.tasks.read().await;
        tasks
            .get(task_id)
            .map(|entry| entry.task.clone())
            .ok_or_else(|| A2AError::TaskNotFound {
                task_id: task_id.to_string(),
            })
    }

    /// List tasks matching a filter, in no particular order
    pub async fn list(&self, filter: &TaskFilter) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        tasks
            .values()
            .filter(|entry| filter.matches(&entry.task))
            .map(|entry| entry.task.clone())
            .collect()
    }

    /// Apply a status update to a task, enforcing the lifecycle
    pub async fn update_status(&self, task_id: &str, status: TaskStatus) -> A2AResult<Task> {
        let mut tasks = self.tasks.write().await;
        let entry = Self::entry_mut(&mut tasks, task_id)?;

        let to = status.state;
        entry.task.apply_status(status)?;
        tracing::debug!(task_id, state = %to, "task status updated");
        Ok(entry.task.clone())
    }

    /// Append a caller or agent message to a task's history
    pub async fn append_message(&self, task_id: &str, message: Message) -> A2AResult<Task> {
        let mut tasks = self.tasks.write().await;
        let entry = Self::entry_mut(&mut tasks, task_id)?;
        entry.task.append_message(message)?;
        Ok(entry.task.clone())
    }

    /// Ingest an artifact fragment for a task
    ///
    /// Only valid while the task is `working`. Fragments are routed
    /// through the per-task assembler; when a fragment seals its index
    /// the reassembled artifact is recorded on the task and returned.
    pub async fn ingest_artifact(
        &self,
        task_id: &str,
        fragment: Artifact,
    ) -> A2AResult<Option<Artifact>> {
        let mut tasks = self.tasks.write().await;
        let entry = Self::entry_mut(&mut tasks, task_id)?;

        if entry.task.status.state != TaskState::Working {
            return Err(A2AError::Validation(format!(
                "artifacts may only be streamed while working, task is {}",
                entry.task.status.state
            )));
        }

        let sealed = entry.assembler.ingest(fragment)?;
        if let Some(artifact) = &sealed {
            entry.task.push_artifact(artifact.clone());
        }
        Ok(sealed)
    }

    /// Cancel a task
    ///
    /// An explicit `→ canceled` transition; any in-flight streamed
    /// artifact fragments are discarded, never left half-sealed.
    pub async fn cancel(&self, task_id: &str) -> A2AResult<Task> {
        let mut tasks = self.tasks.write().await;
        let entry = Self::entry_mut(&mut tasks, task_id)?;

        entry
            .task
            .apply_status(TaskStatus::new(TaskState::Canceled))?;
        let discarded = entry.assembler.discard_pending();
        tracing::debug!(task_id, discarded = discarded.len(), "task canceled");
        Ok(entry.task.clone())
    }

    fn entry_mut<'a>(
        tasks: &'a mut HashMap<String, TaskEntry>,
        task_id: &str,
    ) -> A2AResult<&'a mut TaskEntry> {
        tasks.get_mut(task_id).ok_or_else(|| A2AError::TaskNotFound {
            task_id: task_id.to_string(),
        })
    }
}
