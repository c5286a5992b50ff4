//! Agent card, capability, and marketplace directory types

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::{A2AError, A2AResult};

/// Agent Card for agent discovery
///
/// The card is the published capability descriptor for an agent: identity,
/// location, supported capabilities, authentication schemes, accepted
/// MIME types, and the skills it offers. Immutable after registration
/// except for owner-driven revisions through the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Name of the agent
    pub name: String,

    /// Human-readable description of the agent
    pub description: String,

    /// Endpoint URL where the agent is reachable
    pub url: Url,

    /// Optional organization attribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<AgentProvider>,

    /// Semantic version of the agent
    pub version: String,

    /// URL to agent documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<Url>,

    /// Optional protocol capabilities
    #[serde(default)]
    pub capabilities: AgentCapabilities,

    /// Supported authentication schemes
    pub authentication: AgentAuthentication,

    /// MIME types accepted as input, in preference order
    pub default_input_modes: Vec<String>,

    /// MIME types produced as output, in preference order
    pub default_output_modes: Vec<String>,

    /// Skills offered by the agent
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    /// Create a card with the required identity fields and text input and
    /// output modes
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: Url,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url,
            provider: None,
            version: version.into(),
            documentation_url: None,
            capabilities: AgentCapabilities::default(),
            authentication: AgentAuthentication::default(),
            default_input_modes: vec!["text/plain".to_string()],
            default_output_modes: vec!["text/plain".to_string()],
            skills: Vec::new(),
        }
    }

    /// Set the provider attribution
    pub fn with_provider(mut self, provider: AgentProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the capabilities
    pub fn with_capabilities(mut self, capabilities: AgentCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the authentication schemes
    pub fn with_authentication(mut self, authentication: AgentAuthentication) -> Self {
        self.authentication = authentication;
        self
    }

    /// Set the accepted input MIME types
    pub fn with_input_modes(mut self, modes: Vec<String>) -> Self {
        self.default_input_modes = modes;
        self
    }

    /// Set the produced output MIME types
    pub fn with_output_modes(mut self, modes: Vec<String>) -> Self {
        self.default_output_modes = modes;
        self
    }

    /// Add a skill to the card
    pub fn with_skill(mut self, skill: AgentSkill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Validate the card for registration
    ///
    /// Identity fields must be non-empty, at least one authentication
    /// scheme and one MIME type in each direction must be listed, and
    /// skill ids must be unique within the card.
    pub fn validate(&self) -> A2AResult<()> {
        if self.name.is_empty() {
            return Err(A2AError::Validation("agent name cannot be empty".into()));
        }
        if self.description.is_empty() {
            return Err(A2AError::Validation(
                "agent description cannot be empty".into(),
            ));
        }
        if self.version.is_empty() {
            return Err(A2AError::Validation("agent version cannot be empty".into()));
        }
        if self.authentication.schemes.is_empty() {
            return Err(A2AError::Validation(
                "agent card must list at least one authentication scheme".into(),
            ));
        }
        if self.default_input_modes.is_empty() {
            return Err(A2AError::Validation(
                "agent card must list at least one input mode".into(),
            ));
        }
        if self.default_output_modes.is_empty() {
            return Err(A2AError::Validation(
                "agent card must list at least one output mode".into(),
            ));
        }

        let mut seen = HashSet::new();
        for skill in &self.skills {
            if skill.id.is_empty() {
                return Err(A2AError::Validation("skill id cannot be empty".into()));
            }
            if !seen.insert(skill.id.as_str()) {
                return Err(A2AError::Validation(format!(
                    "duplicate skill id: {}",
                    skill.id
                )));
            }
            if skill.name.is_empty() || skill.description.is_empty() {
                return Err(A2AError::Validation(format!(
                    "skill {} must have a name and description",
                    skill.id
                )));
            }
        }

        Ok(())
    }
}

/// Organization attribution for an agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentProvider {
    /// Organization name
    pub organization: String,

    /// Organization website
    pub url: Url,
}

/// Agent protocol capabilities, each defaulting to false
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    /// Supports streaming artifact fragments
    #[serde(default)]
    pub streaming: bool,

    /// Supports push notifications via webhooks
    #[serde(default)]
    pub push_notifications: bool,

    /// Reports full state transition history on its tasks
    #[serde(default)]
    pub state_transition_history: bool,
}

impl AgentCapabilities {
    /// Capabilities with every flag off
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable streaming
    pub fn with_streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    /// Enable push notifications
    pub fn with_push_notifications(mut self) -> Self {
        self.push_notifications = true;
        self
    }

    /// Enable state transition history reporting
    pub fn with_state_transition_history(mut self) -> Self {
        self.state_transition_history = true;
        self
    }
}

/// Authentication requirements published on an agent card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentAuthentication {
    /// Supported scheme identifiers, in preference order; non-empty for
    /// a valid card
    pub schemes: Vec<String>,

    /// Optional opaque credential material
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
}

impl Default for AgentAuthentication {
    fn default() -> Self {
        Self {
            schemes: vec!["bearer".to_string()],
            credentials: None,
        }
    }
}

/// A skill offered by an agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    /// Skill identifier, unique within its card
    pub id: String,

    /// Skill name
    pub name: String,

    /// Human-readable description of what the skill does
    pub description: String,

    /// Search tags
    pub tags: Vec<String>,

    /// Example invocations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,

    /// Input MIME types overriding the card defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_modes: Option<Vec<String>>,

    /// Output MIME types overriding the card defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_modes: Option<Vec<String>>,
}

impl AgentSkill {
    /// Create a skill with the required fields
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
            examples: None,
            input_modes: None,
            output_modes: None,
        }
    }

    /// Add a search tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add an example invocation
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples
            .get_or_insert_with(Vec::new)
            .push(example.into());
        self
    }
}

/// A marketplace directory entry
///
/// Combines the simple listing fields with the agent's card when the
/// agent speaks A2A. Identity fields are immutable after registration;
/// only the card may be revised, and only through the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAgent {
    /// Registry-issued identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Directory category
    pub category: String,

    /// Short description for the directory listing
    pub description: String,

    /// Invocation endpoint
    pub api_endpoint: Url,

    /// Whether the agent speaks the A2A protocol
    #[serde(rename = "supportsA2A")]
    pub supports_a2a: bool,

    /// The agent's card, present when `supports_a2a` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_card: Option<AgentCard>,
}
