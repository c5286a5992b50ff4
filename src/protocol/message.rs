//! A2A message and part types

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{A2AError, A2AResult};

/// Open string-keyed metadata mapping carried by messages, parts,
/// artifacts, and tasks
pub type Metadata = HashMap<String, Value>;

/// A message in the A2A protocol
///
/// Messages are the unit of communication between a caller and an agent.
/// Each message has a role (user or agent) and one or more parts (text,
/// file, or data). Part order is semantically meaningful and preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,

    /// Message content parts (at least one required)
    pub parts: Vec<Part>,

    /// Optional metadata for the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Message {
    /// Create a user message with a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::text(text)],
            metadata: None,
        }
    }

    /// Create an agent message with a single text part
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            parts: vec![Part::text(text)],
            metadata: None,
        }
    }

    /// Create a new message builder
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Add a metadata field to the message
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Append a content part
    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Validate the message against the part contract
    ///
    /// A message must carry at least one part, and every part must itself
    /// be well formed. Deserialized messages should be validated before use.
    pub fn validate(&self) -> A2AResult<()> {
        if self.parts.is_empty() {
            return Err(A2AError::Validation(
                "message must have at least one part".into(),
            ));
        }
        for part in &self.parts {
            part.validate()?;
        }
        Ok(())
    }
}

/// Builder for constructing validated [`Message`] instances
#[derive(Debug, Default)]
pub struct MessageBuilder {
    role: Option<Role>,
    parts: Vec<Part>,
    metadata: Option<Metadata>,
}

impl MessageBuilder {
    /// Create a new message builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role of the message
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the message parts
    pub fn parts(mut self, parts: Vec<Part>) -> Self {
        self.parts = parts;
        self
    }

    /// Add a single part to the message
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Add a metadata field
    pub fn metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Build the message, rejecting a missing role, zero parts, or any
    /// malformed part
    pub fn build(self) -> A2AResult<Message> {
        let role = self
            .role
            .ok_or_else(|| A2AError::Validation("message role is required".into()))?;

        let message = Message {
            role,
            parts: self.parts,
            metadata: self.metadata,
        };
        message.validate()?;
        Ok(message)
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from a user
    User,

    /// Message from an AI agent
    Agent,
}

/// File content for file parts
///
/// Exactly one of `bytes` (inline base64) or `uri` (reference) must be
/// populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    /// Name of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// MIME type of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Base64-encoded file content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,

    /// URI reference to the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// A part of a message or artifact
///
/// A closed sum over the three content kinds, tagged on the wire by the
/// `type` field: `text`, `file`, or `data`. Consumers match exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Part {
    /// Text content
    Text {
        /// The text content
        text: String,

        /// Optional part metadata
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<Metadata>,
    },

    /// File content, inline or by reference
    File {
        /// The file content
        file: FileContent,

        /// Optional part metadata
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<Metadata>,
    },

    /// Structured key/value data
    Data {
        /// The structured data object
        data: serde_json::Map<String, Value>,

        /// Optional part metadata
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<Metadata>,
    },
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            metadata: None,
        }
    }

    /// Create a file part with a URI reference
    pub fn file_uri(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::File {
            file: FileContent {
                name: Some(name.into()),
                uri: Some(uri.into()),
                ..Default::default()
            },
            metadata: None,
        }
    }

    /// Create a file part with inline base64 bytes
    pub fn file_bytes(
        name: impl Into<String>,
        bytes: impl Into<String>,
        mime_type: Option<String>,
    ) -> Self {
        Self::File {
            file: FileContent {
                name: Some(name.into()),
                mime_type,
                bytes: Some(bytes.into()),
                uri: None,
            },
            metadata: None,
        }
    }

    /// Create a data part
    pub fn data(data: serde_json::Map<String, Value>) -> Self {
        Self::Data {
            data,
            metadata: None,
        }
    }

    /// Validate this part against the part contract
    ///
    /// Text parts must be non-empty. File parts must carry exactly one of
    /// `bytes` or `uri`, and inline bytes must be valid base64.
    pub fn validate(&self) -> A2AResult<()> {
        match self {
            Part::Text { text, .. } => {
                if text.is_empty() {
                    return Err(A2AError::MalformedPart("text part is empty".into()));
                }
            }
            Part::File { file, .. } => match (&file.bytes, &file.uri) {
                (None, None) => {
                    return Err(A2AError::MalformedPart(
                        "file part must have either bytes or uri".into(),
                    ));
                }
                (Some(_), Some(_)) => {
                    return Err(A2AError::MalformedPart(
                        "file part must have exactly one of bytes or uri".into(),
                    ));
                }
                (Some(bytes), None) => {
                    if BASE64.decode(bytes).is_err() {
                        return Err(A2AError::MalformedPart(
                            "file part bytes are not valid base64".into(),
                        ));
                    }
                }
                (None, Some(_)) => {}
            },
            Part::Data { .. } => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello, agent!");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.parts.len(), 1);

        match &msg.parts[0] {
            Part::Text { text, .. } => assert_eq!(text, "Hello, agent!"),
            _ => panic!("Expected text part"),
        }
    }

    #[test]
    fn test_message_builder() {
        let msg = Message::builder()
            .role(Role::Agent)
            .part(Part::text("First"))
            .part(Part::text("Second"))
            .metadata("key", json!("value"))
            .build()
            .unwrap();

        assert_eq!(msg.role, Role::Agent);
        assert_eq!(msg.parts.len(), 2);
        assert!(msg.metadata.is_some());
    }

    #[test]
    fn test_message_builder_missing_role() {
        let result = Message::builder().part(Part::text("Hello")).build();
        assert!(matches!(result, Err(A2AError::Validation(_))));
    }

    #[test]
    fn test_message_builder_no_parts() {
        let result = Message::builder().role(Role::User).build();
        assert!(matches!(result, Err(A2AError::Validation(_))));
    }

    #[test]
    fn test_part_tagging() {
        let text = Part::text("Hello");
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "Hello");

        let file = Part::file_uri("doc.pdf", "https://example.com/doc.pdf");
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["file"]["name"], "doc.pdf");
        assert_eq!(json["file"]["uri"], "https://example.com/doc.pdf");
        assert!(json["file"].get("bytes").is_none());

        let mut data = serde_json::Map::new();
        data.insert("count".into(), json!(42));
        let data = Part::data(data);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "data");
        assert_eq!(json["data"]["count"], 42);
    }

    #[test]
    fn test_file_part_requires_content() {
        let part = Part::File {
            file: FileContent::default(),
            metadata: None,
        };
        assert!(matches!(part.validate(), Err(A2AError::MalformedPart(_))));
    }

    #[test]
    fn test_file_part_rejects_both_bytes_and_uri() {
        let part = Part::File {
            file: FileContent {
                name: Some("f.bin".into()),
                mime_type: None,
                bytes: Some("aGVsbG8=".into()),
                uri: Some("https://example.com/f.bin".into()),
            },
            metadata: None,
        };
        assert!(matches!(part.validate(), Err(A2AError::MalformedPart(_))));
    }

    #[test]
    fn test_file_part_rejects_bad_base64() {
        let part = Part::file_bytes("f.bin", "not base64!!", None);
        assert!(matches!(part.validate(), Err(A2AError::MalformedPart(_))));
    }

    #[test]
    fn test_file_part_accepts_valid_base64() {
        let part = Part::file_bytes("f.txt", "aGVsbG8=", Some("text/plain".into()));
        assert!(part.validate().is_ok());
    }

    #[test]
    fn test_message_serialization_round_trip() {
        let msg = Message::user("Test message").with_metadata("origin", json!("chat"));
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"text\":\"Test message\""));

        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, deserialized);
    }
}
