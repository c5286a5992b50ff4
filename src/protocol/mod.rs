//! Core A2A protocol types and definitions

pub mod agent;
pub mod artifact;
pub mod error;
pub mod message;
pub mod task;

pub use agent::{
    AgentAuthentication, AgentCapabilities, AgentCard, AgentProvider, AgentSkill, PlatformAgent,
};
pub use artifact::Artifact;
pub use error::{A2AError, A2AResult};
pub use message::{FileContent, Message, Metadata, Part, Role};
pub use task::{Task, TaskState, TaskStatus};
