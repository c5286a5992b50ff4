//! A2A artifact types

use serde::{Deserialize, Serialize};

use super::{
    error::{A2AError, A2AResult},
    message::{Metadata, Part},
};

/// An artifact produced by an agent while serving a task
///
/// Artifacts are ordered within a task by `index`. A streaming agent may
/// emit one artifact as several fragments sharing an index: `append`
/// marks a fragment that extends the previously buffered parts, and
/// `lastChunk` marks the terminal fragment. Reassembly is handled by
/// [`crate::stream::ArtifactAssembler`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    /// Human readable name for the artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Human readable description of the artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Contents of the artifact; at least one part
    pub parts: Vec<Part>,

    /// Optional artifact metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Position of this artifact within its task
    pub index: u32,

    /// Whether these parts extend the previously buffered fragment at
    /// the same index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,

    /// Whether this is the terminal fragment of a streamed artifact
    #[serde(rename = "lastChunk", skip_serializing_if = "Option::is_none")]
    pub last_chunk: Option<bool>,
}

impl Artifact {
    /// Create a complete (non-fragment) artifact at `index`
    pub fn new(index: u32, parts: Vec<Part>) -> Self {
        Self {
            name: None,
            description: None,
            parts,
            metadata: None,
            index,
            append: None,
            last_chunk: None,
        }
    }

    /// Set the artifact name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the artifact description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark this fragment as extending the buffered parts at its index
    pub fn appending(mut self) -> Self {
        self.append = Some(true);
        self
    }

    /// Mark this fragment as the terminal one for its index
    pub fn final_chunk(mut self) -> Self {
        self.last_chunk = Some(true);
        self
    }

    /// Whether this fragment extends a previously buffered one
    pub fn is_append(&self) -> bool {
        self.append.unwrap_or(false)
    }

    /// Whether this fragment seals its index
    pub fn is_last_chunk(&self) -> bool {
        self.last_chunk.unwrap_or(false)
    }

    /// Validate the artifact: at least one part, every part well formed
    pub fn validate(&self) -> A2AResult<()> {
        if self.parts.is_empty() {
            return Err(A2AError::Validation(
                "artifact must have at least one part".into(),
            ));
        }
        for part in &self.parts {
            part.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_creation() {
        let artifact = Artifact::new(0, vec![Part::text("result")])
            .with_name("report")
            .with_description("final report");

        assert_eq!(artifact.index, 0);
        assert_eq!(artifact.name.as_deref(), Some("report"));
        assert!(!artifact.is_append());
        assert!(!artifact.is_last_chunk());
    }

    #[test]
    fn test_fragment_flags() {
        let fragment = Artifact::new(2, vec![Part::text("tail")])
            .appending()
            .final_chunk();

        assert!(fragment.is_append());
        assert!(fragment.is_last_chunk());
    }

    #[test]
    fn test_artifact_requires_parts() {
        let artifact = Artifact::new(0, Vec::new());
        assert!(matches!(
            artifact.validate(),
            Err(crate::protocol::A2AError::Validation(_))
        ));

        let artifact = Artifact::new(0, vec![Part::text("content")]);
        assert!(artifact.validate().is_ok());
    }

    #[test]
    fn test_artifact_serialization() {
        let artifact = Artifact::new(1, vec![Part::text("chunk")]).final_chunk();
        let json = serde_json::to_value(&artifact).unwrap();

        assert_eq!(json["index"], 1);
        assert_eq!(json["lastChunk"], true);
        assert!(json.get("append").is_none());
        assert!(json.get("name").is_none());

        let deserialized: Artifact = serde_json::from_value(json).unwrap();
        assert_eq!(artifact, deserialized);
    }
}
