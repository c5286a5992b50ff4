//! # AgentNest A2A
//!
//! The A2A (Agent2Agent) protocol core behind the AgentNest agent
//! marketplace: the card/task/message/artifact data model, validation,
//! task lifecycle enforcement, streaming artifact reassembly, and an
//! in-memory registry and task store.
//!
//! ## Features
//!
//! - **Wire-faithful types**: `AgentCard`, `Task`, `Message`, `Part`,
//!   and `Artifact` serialize to the A2A JSON shapes, with omitted
//!   optionals staying absent
//! - **Lifecycle enforcement**: the task state machine rejects
//!   transitions out of terminal states and along undefined edges
//! - **Streaming reassembly**: indexed artifact fragments are buffered,
//!   appended, and sealed, with order violations rejected
//! - **Registry and store**: async in-memory storage with one writer and
//!   many readers
//!
//! ## Example
//!
//! ```rust
//! use agentnest_a2a::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), A2AError> {
//!     let store = TaskStore::new();
//!
//!     let task = store
//!         .submit("session-1", Message::user("Summarize this report"))
//!         .await?;
//!     store
//!         .update_status(&task.id, TaskStatus::new(TaskState::Working))
//!         .await?;
//!
//!     let sealed = store
//!         .ingest_artifact(
//!             &task.id,
//!             Artifact::new(0, vec![Part::text("Summary: ...")]).final_chunk(),
//!         )
//!         .await?;
//!     assert!(sealed.is_some());
//!
//!     store
//!         .update_status(&task.id, TaskStatus::new(TaskState::Completed))
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod protocol;
pub mod store;
pub mod stream;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        protocol::{
            A2AError, A2AResult, AgentCard, AgentSkill, Artifact, Message, Part, PlatformAgent,
            Role, Task, TaskState, TaskStatus,
        },
        store::{AgentRegistration, AgentRegistry, TaskFilter, TaskStore},
        stream::ArtifactAssembler,
    };
}
