//! In-memory agent directory

use std::collections::HashMap;

use tokio::sync::RwLock;
use url::Url;
use uuid::Uuid;

use crate::protocol::{A2AError, A2AResult, AgentCard, PlatformAgent};

/// Registration request for a new directory entry
#[derive(Debug, Clone)]
pub struct AgentRegistration {
    /// Display name
    pub name: String,

    /// Directory category
    pub category: String,

    /// Short description for the listing
    pub description: String,

    /// Invocation endpoint
    pub api_endpoint: Url,

    /// The agent's card, when it speaks A2A
    pub agent_card: Option<AgentCard>,
}

impl AgentRegistration {
    /// Create a registration with the required listing fields
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        api_endpoint: Url,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: description.into(),
            api_endpoint,
            agent_card: None,
        }
    }

    /// Attach an agent card
    pub fn with_card(mut self, card: AgentCard) -> Self {
        self.agent_card = Some(card);
        self
    }
}

/// In-memory agent registry
///
/// Entries are created at registration and their identity fields never
/// change afterwards. Only the agent card may be revised, through
/// [`AgentRegistry::update_card`] — the owner's path. Consumers read
/// detached clones.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: RwLock<HashMap<String, PlatformAgent>>,
}

impl AgentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent, validating its card when one is supplied
    ///
    /// Issues the directory id and derives `supportsA2A` from the
    /// presence of a card.
    pub async fn register(&self, registration: AgentRegistration) -> A2AResult<PlatformAgent> {
        if registration.name.is_empty() {
            return Err(A2AError::Validation("agent name cannot be empty".into()));
        }
        if registration.category.is_empty() {
            return Err(A2AError::Validation(
                "agent category cannot be empty".into(),
            ));
        }
        if registration.description.is_empty() {
            return Err(A2AError::Validation(
                "agent description cannot be empty".into(),
            ));
        }
        if let Some(card) = &registration.agent_card {
            card.validate()?;
        }

        let agent = PlatformAgent {
            id: Uuid::now_v7().to_string(),
            name: registration.name,
            category: registration.category,
            description: registration.description,
            api_endpoint: registration.api_endpoint,
            supports_a2a: registration.agent_card.is_some(),
            agent_card: registration.agent_card,
        };

        tracing::debug!(agent_id = %agent.id, name = %agent.name, "agent registered");
        let mut agents = self.agents.write().await;
        agents.insert(agent.id.clone(), agent.clone());
        Ok(agent)
    }

    /// Fetch a directory entry by id
    pub async fn get(&self, agent_id: &str) -> A2AResult<PlatformAgent> {
        let agents = self.agents.read().await;
        agents
            .get(agent_id)
            .cloned()
            .ok_or_else(|| A2AError::AgentNotFound {
                agent_id: agent_id.to_string(),
            })
    }

    /// List every directory entry, sorted by name
    pub async fn list(&self) -> Vec<PlatformAgent> {
        let agents = self.agents.read().await;
        let mut listing: Vec<_> = agents.values().cloned().collect();
        listing.sort_by(|a, b| a.name.cmp(&b.name));
        listing
    }

    /// List the directory entries in a category, sorted by name
    pub async fn list_by_category(&self, category: &str) -> Vec<PlatformAgent> {
        let agents = self.agents.read().await;
        let mut listing: Vec<_> = agents
            .values()
            .filter(|agent| agent.category == category)
            .cloned()
            .collect();
        listing.sort_by(|a, b| a.name.cmp(&b.name));
        listing
    }

    /// Replace an agent's card
    ///
    /// The owner's revision path: the card is validated, identity fields
    /// are untouched, and an agent registered without a card becomes an
    /// A2A agent once one is supplied.
    pub async fn update_card(&self, agent_id: &str, card: AgentCard) -> A2AResult<PlatformAgent> {
        card.validate()?;

        let mut agents = self.agents.write().await;
        let agent = agents
            .get_mut(agent_id)
            .ok_or_else(|| A2AError::AgentNotFound {
                agent_id: agent_id.to_string(),
            })?;

        agent.agent_card = Some(card);
        agent.supports_a2a = true;
        tracing::debug!(agent_id, "agent card revised");
        Ok(agent.clone())
    }
}
